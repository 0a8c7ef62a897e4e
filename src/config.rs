//! Configuration management for prodserver.
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::{env, fs, path::Path};

use crate::error::ProdServerError;

/// Represents the structure of the configuration file.
///
/// The file is the process registry: a map of logical server names to the
/// backend that should serve them, plus the handful of facts about the host
/// application the backends need (application entry points, how to invoke
/// its management commands, which components it has registered).
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Configuration version.
    pub version: String,
    /// Dotted path to the host application's WSGI entry point.
    pub wsgi_app: Option<String>,
    /// Dotted path to the host application's ASGI entry point.
    pub asgi_app: Option<String>,
    /// Argv prefix used to run the host application's management subcommands.
    #[serde(default = "default_manage")]
    pub manage: Vec<String>,
    /// Component list of the host application, consulted by backends that
    /// require an optional package to be registered before use.
    #[serde(default)]
    pub installed_apps: Vec<String>,
    /// Map of server names to their respective configurations.
    pub servers: IndexMap<String, ServerConfig>,
}

fn default_manage() -> Vec<String> {
    vec!["python".into(), "manage.py".into()]
}

impl Config {
    /// Resolves the WSGI application target, failing if it is not configured.
    pub fn wsgi_target(&self) -> Result<&str, ProdServerError> {
        self.wsgi_app
            .as_deref()
            .ok_or(ProdServerError::MissingAppTarget { field: "wsgi_app" })
    }

    /// Resolves the ASGI application target, failing if it is not configured.
    pub fn asgi_target(&self) -> Result<&str, ProdServerError> {
        self.asgi_app
            .as_deref()
            .ok_or(ProdServerError::MissingAppTarget { field: "asgi_app" })
    }
}

/// Configuration for an individual server or worker process.
///
/// Keys outside the recognized set are ignored by construction: backends only
/// ever consult these named fields.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    /// Name of the backend used to run this server.
    pub backend: Option<String>,
    /// Options forwarded to the backend, in declaration order.
    #[serde(default)]
    pub args: IndexMap<String, String>,
    /// Application object target for queue-style workers.
    pub app: Option<String>,
}

/// Expands `${VAR}` and `$VAR` references within a string.
fn expand_env_vars(input: &str) -> Result<String, ProdServerError> {
    let re = Regex::new(r"\$\{?([A-Za-z_][A-Za-z0-9_]*)\}?").unwrap();
    let mut missing = None;
    let result = re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        match env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            }
        }
    });
    match missing {
        Some(name) => Err(ProdServerError::MissingEnvVar { name }),
        None => Ok(result.to_string()),
    }
}

/// Loads and parses the configuration file, expanding environment variables.
pub fn load_config(config_path: Option<&str>) -> Result<Config, ProdServerError> {
    let config_path = config_path.map(Path::new).unwrap_or_else(|| {
        if Path::new("prodserver.yaml").exists() {
            Path::new("prodserver.yaml")
        } else {
            Path::new("prodserver.yml")
        }
    });

    let content = fs::read_to_string(config_path).map_err(|e| {
        ProdServerError::ConfigRead(std::io::Error::new(
            e.kind(),
            format!("{} ({})", e, config_path.display()),
        ))
    })?;

    let expanded = expand_env_vars(&content)?;
    let config: Config = serde_yaml::from_str(&expanded)?;
    Ok(config)
}
