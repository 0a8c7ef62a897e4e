//! Celery message-queue worker backend.
use std::process::Command;

use crate::{config::ServerConfig, error::ProdServerError};

use super::{ServerBackend, format_server_args};

/// Backend to start a celery worker.
///
/// The server entry must name the celery application object; construction
/// fails if it does not.
#[derive(Debug)]
pub struct CeleryWorker {
    args: Vec<String>,
    app: String,
}

impl CeleryWorker {
    /// Builds the worker from a server entry, requiring its `app` field.
    pub fn from_config(name: &str, server: &ServerConfig) -> Result<Self, ProdServerError> {
        let app = server
            .app
            .as_deref()
            .filter(|app| !app.is_empty())
            .ok_or(ProdServerError::MissingField {
                name: name.to_string(),
                field: "app",
            })?;
        Ok(Self {
            args: format_server_args(&server.args),
            app: app.to_string(),
        })
    }
}

impl ServerBackend for CeleryWorker {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new("celery");
        command.arg("-A").arg(&self.app).arg("worker").args(args);
        command
    }
}
