//! Uvicorn ASGI server backends.
use std::process::Command;

use crate::{
    config::{Config, ServerConfig},
    error::ProdServerError,
};

use super::{ServerBackend, format_server_args};

/// Backend for the uvicorn ASGI server.
///
/// Uvicorn's CLI takes the application target as its first positional
/// argument, so the prepared list leads with the ASGI target and all
/// configured options follow untouched.
#[derive(Debug)]
pub struct UvicornServer {
    args: Vec<String>,
    asgi_app: String,
}

impl UvicornServer {
    /// Builds the backend from a server entry.
    pub fn from_config(server: &ServerConfig, config: &Config) -> Result<Self, ProdServerError> {
        Ok(Self {
            args: format_server_args(&server.args),
            asgi_app: config.asgi_target()?.to_string(),
        })
    }
}

impl ServerBackend for UvicornServer {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn prepare_args(&self) -> Vec<String> {
        let mut args = vec![self.asgi_app.clone()];
        args.extend(self.args.iter().cloned());
        args
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new("uvicorn");
        command.args(args);
        command
    }
}

/// Backend running a WSGI application through uvicorn's compatibility mode.
///
/// Identical to [`UvicornServer`] except the target is the WSGI entry point
/// and `--interface=wsgi` is forced immediately after it.
#[derive(Debug)]
pub struct UvicornWsgiServer {
    args: Vec<String>,
    wsgi_app: String,
}

impl UvicornWsgiServer {
    /// Builds the backend from a server entry.
    pub fn from_config(server: &ServerConfig, config: &Config) -> Result<Self, ProdServerError> {
        Ok(Self {
            args: format_server_args(&server.args),
            wsgi_app: config.wsgi_target()?.to_string(),
        })
    }
}

impl ServerBackend for UvicornWsgiServer {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn prepare_args(&self) -> Vec<String> {
        let mut args = vec![self.wsgi_app.clone(), "--interface=wsgi".to_string()];
        args.extend(self.args.iter().cloned());
        args
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new("uvicorn");
        command.args(args);
        command
    }
}
