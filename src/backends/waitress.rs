//! Waitress WSGI server backend.
use std::process::Command;

use crate::{
    config::{Config, ServerConfig},
    error::ProdServerError,
};

use super::{ServerBackend, format_server_args};

/// Name of the waitress runner binary, kept first in the prepared argv.
const RUNNER: &str = "waitress-serve";

/// Backend for the waitress pure-Python WSGI server.
///
/// Waitress expects a full argv in its own CLI convention: the runner name
/// first and the application target last, with options in between. The
/// prepared list is that argv, and the first element doubles as the program
/// to exec.
#[derive(Debug)]
pub struct WaitressServer {
    args: Vec<String>,
    wsgi_app: String,
}

impl WaitressServer {
    /// Builds the backend from a server entry.
    pub fn from_config(server: &ServerConfig, config: &Config) -> Result<Self, ProdServerError> {
        Ok(Self {
            args: format_server_args(&server.args),
            wsgi_app: config.wsgi_target()?.to_string(),
        })
    }
}

impl ServerBackend for WaitressServer {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn prepare_args(&self) -> Vec<String> {
        let mut args = vec![RUNNER.to_string()];
        args.extend(self.args.iter().cloned());
        args.push(self.wsgi_app.clone());
        args
    }

    fn command(&self, args: &[String]) -> Command {
        let program = args.first().map(String::as_str).unwrap_or(RUNNER);
        let mut command = Command::new(program);
        command.args(args.iter().skip(1));
        command
    }
}
