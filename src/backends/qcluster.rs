//! django-q2 cluster worker backend.
//!
//! django-q2 is an optional package of the host application. Construction
//! verifies it twice before anything is delegated: the package must be
//! importable by the host's interpreter, and the host must have registered
//! it in `installed_apps`. Each failure is its own configuration error.
use std::io;
use std::process::Command;

use crate::{
    config::{Config, ServerConfig},
    error::ProdServerError,
};

use super::{ServerBackend, format_server_args, manage_command};

/// Python module name the host application must register.
const PACKAGE: &str = "django_q";

/// Distribution name used in the install hint.
const DISTRIBUTION: &str = "django-q2";

/// Subcommand of the host application's management CLI that runs the cluster.
const SUBCOMMAND: &str = "qcluster";

/// Checks whether an optional package is available to the host application.
pub trait DependencyProbe {
    /// Returns the underlying failure when `package` cannot be imported.
    fn probe(&self, package: &str) -> Result<(), io::Error>;
}

/// Probes a package by importing it with the host's interpreter.
#[derive(Debug)]
pub struct PythonImportProbe {
    interpreter: String,
}

impl PythonImportProbe {
    /// Uses the first element of the configured `manage` argv as interpreter.
    pub fn from_manage(manage: &[String]) -> Self {
        Self {
            interpreter: manage
                .first()
                .cloned()
                .unwrap_or_else(|| "python".to_string()),
        }
    }
}

impl DependencyProbe for PythonImportProbe {
    fn probe(&self, package: &str) -> Result<(), io::Error> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(format!("import {package}"))
            .output()?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(io::Error::other(format!(
                "'{package}' is not importable by {}: {}",
                self.interpreter,
                stderr.trim()
            )))
        }
    }
}

/// Backend to start a django-q2 cluster worker.
#[derive(Debug)]
pub struct QclusterWorker {
    args: Vec<String>,
    manage: Vec<String>,
}

impl QclusterWorker {
    /// Builds the worker, verifying the optional package is usable.
    pub fn from_config(
        server: &ServerConfig,
        config: &Config,
        probe: &dyn DependencyProbe,
    ) -> Result<Self, ProdServerError> {
        probe
            .probe(PACKAGE)
            .map_err(|source| ProdServerError::MissingDependency {
                package: DISTRIBUTION.to_string(),
                hint: format!("pip install {DISTRIBUTION}"),
                source,
            })?;

        // Exact, case-sensitive match against the host's component list.
        if !config.installed_apps.iter().any(|app| app == PACKAGE) {
            return Err(ProdServerError::UnregisteredApp {
                package: PACKAGE.to_string(),
            });
        }

        Ok(Self {
            args: format_server_args(&server.args),
            manage: config.manage.clone(),
        })
    }
}

impl ServerBackend for QclusterWorker {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, args: &[String]) -> Command {
        manage_command(&self.manage, SUBCOMMAND, args)
    }
}
