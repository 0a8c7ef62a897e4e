//! Gunicorn WSGI server backend.
use std::process::Command;

use crate::{
    config::{Config, ServerConfig},
    error::ProdServerError,
};

use super::{ServerBackend, format_server_args};

/// Backend for the gunicorn WSGI server.
///
/// All configured options are forwarded to gunicorn untouched; the WSGI
/// application target is appended as the positional argument gunicorn's own
/// CLI expects.
#[derive(Debug)]
pub struct GunicornServer {
    args: Vec<String>,
    wsgi_app: String,
}

impl GunicornServer {
    /// Builds the backend from a server entry.
    pub fn from_config(server: &ServerConfig, config: &Config) -> Result<Self, ProdServerError> {
        Ok(Self {
            args: format_server_args(&server.args),
            wsgi_app: config.wsgi_target()?.to_string(),
        })
    }
}

impl ServerBackend for GunicornServer {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new("gunicorn");
        command.args(args).arg(&self.wsgi_app);
        command
    }
}
