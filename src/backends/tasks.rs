//! Database-backed task worker backend.
use std::process::Command;

use crate::config::{Config, ServerConfig};

use super::{ServerBackend, format_server_args, manage_command};

/// Subcommand of the host application's management CLI that runs the worker.
const SUBCOMMAND: &str = "db_worker";

/// Backend to start a database-queue task worker.
///
/// The worker ships with the host framework, so delegation is a plain
/// management subcommand invocation with the prepared arguments appended.
#[derive(Debug)]
pub struct TasksWorker {
    args: Vec<String>,
    manage: Vec<String>,
}

impl TasksWorker {
    /// Builds the worker from a server entry.
    pub fn from_config(server: &ServerConfig, config: &Config) -> Self {
        Self {
            args: format_server_args(&server.args),
            manage: config.manage.clone(),
        }
    }
}

impl ServerBackend for TasksWorker {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, args: &[String]) -> Command {
        manage_command(&self.manage, SUBCOMMAND, args)
    }
}
