//! Server and worker backends.
//!
//! A backend adapts the generic `args` mapping of a server entry into the
//! invocation shape one specific production server expects, then hands the
//! process over to that server via `exec`. Backends share a single
//! lifecycle: construct from configuration, prepare the argument list,
//! start. Nothing here supervises the delegated process; once `start`
//! succeeds the delegated program owns the process image.
use std::os::unix::process::CommandExt;
use std::process::Command;
use std::str::FromStr;

use indexmap::IndexMap;
use strum_macros::{AsRefStr, EnumString};
use tracing::debug;

use crate::{
    config::{Config, ServerConfig},
    error::ProdServerError,
};

pub mod celery;
pub mod granian;
pub mod gunicorn;
pub mod qcluster;
pub mod tasks;
pub mod uvicorn;
pub mod waitress;

use celery::CeleryWorker;
use granian::GranianServer;
use gunicorn::GunicornServer;
use qcluster::{PythonImportProbe, QclusterWorker};
use tasks::TasksWorker;
use uvicorn::{UvicornServer, UvicornWsgiServer};
use waitress::WaitressServer;

/// Transforms a server entry's `args` mapping into a flag list.
///
/// Each entry becomes the literal `--{name}={value}`, preserving the
/// mapping's declaration order. No validation or escaping is applied.
pub fn format_server_args(args: &IndexMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|(name, value)| format!("--{name}={value}"))
        .collect()
}

/// Contract shared by every backend.
pub trait ServerBackend: std::fmt::Debug {
    /// The normalized argument list stored at construction.
    fn server_args(&self) -> &[String];

    /// Computes the invocation arguments handed to [`ServerBackend::start`].
    ///
    /// The default returns the stored args unchanged; variants prepend or
    /// append items such as the application target or the runner name.
    fn prepare_args(&self) -> Vec<String> {
        self.server_args().to_vec()
    }

    /// Builds the delegated process invocation for the given arguments.
    ///
    /// Every backend must say what it execs; there is no default.
    fn command(&self, args: &[String]) -> Command;

    /// Hands the process over to the delegated server program.
    ///
    /// Only returns on failure, with the underlying OS error unmodified.
    fn start(&self, args: &[String]) -> Result<(), ProdServerError> {
        let mut command = self.command(args);
        debug!(program = ?command.get_program(), "delegating to server program");
        Err(ProdServerError::Delegation(command.exec()))
    }
}

/// The set of backends this build provides, keyed by configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BackendKind {
    /// Gunicorn WSGI server.
    Gunicorn,
    /// Uvicorn ASGI server.
    Uvicorn,
    /// Uvicorn running a WSGI application in compatibility mode.
    UvicornWsgi,
    /// Waitress pure-Python WSGI server.
    Waitress,
    /// Granian serving the ASGI interface.
    GranianAsgi,
    /// Granian serving the WSGI interface.
    GranianWsgi,
    /// Celery message-queue worker.
    Celery,
    /// Database-backed task worker run through the host's management CLI.
    DbWorker,
    /// django-q2 cluster worker (optional external package).
    Qcluster,
}

impl BackendKind {
    /// Resolves a configured backend string, failing with a configuration
    /// error for any name this build does not provide.
    pub fn resolve(name: &str, backend: &str) -> Result<Self, ProdServerError> {
        BackendKind::from_str(backend).map_err(|_| ProdServerError::UnknownBackend {
            name: name.to_string(),
            backend: backend.to_string(),
        })
    }

    /// Constructs the backend for one server entry.
    ///
    /// Construction never launches anything; it only normalizes arguments
    /// and validates backend-specific requirements.
    pub fn build(
        &self,
        name: &str,
        server: &ServerConfig,
        config: &Config,
    ) -> Result<Box<dyn ServerBackend>, ProdServerError> {
        let backend: Box<dyn ServerBackend> = match self {
            BackendKind::Gunicorn => Box::new(GunicornServer::from_config(server, config)?),
            BackendKind::Uvicorn => Box::new(UvicornServer::from_config(server, config)?),
            BackendKind::UvicornWsgi => {
                Box::new(UvicornWsgiServer::from_config(server, config)?)
            }
            BackendKind::Waitress => Box::new(WaitressServer::from_config(server, config)?),
            BackendKind::GranianAsgi => Box::new(GranianServer::asgi(server, config)?),
            BackendKind::GranianWsgi => Box::new(GranianServer::wsgi(server, config)?),
            BackendKind::Celery => Box::new(CeleryWorker::from_config(name, server)?),
            BackendKind::DbWorker => Box::new(TasksWorker::from_config(server, config)),
            BackendKind::Qcluster => {
                let probe = PythonImportProbe::from_manage(&config.manage);
                Box::new(QclusterWorker::from_config(server, config, &probe)?)
            }
        };
        Ok(backend)
    }
}

/// Builds an invocation of the host application's management CLI.
///
/// The configured `manage` argv supplies the program and its leading
/// arguments; the subcommand name and prepared args follow.
pub(crate) fn manage_command(manage: &[String], subcommand: &str, args: &[String]) -> Command {
    let program = manage.first().map(String::as_str).unwrap_or("python");
    let mut command = Command::new(program);
    command
        .args(manage.iter().skip(1))
        .arg(subcommand)
        .args(args);
    command
}
