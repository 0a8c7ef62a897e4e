//! Granian multi-protocol server backend.
//!
//! Granian takes structured keyword options rather than a free-form flag
//! list, so this backend parses the generic `args` mapping into a typed
//! option set before delegating: hyphenated names are normalized, a small
//! alias table maps user-facing names onto granian's own keywords, numeric
//! and boolean values are converted from their string spellings, and
//! anything unrecognized is dropped.
use std::process::Command;
use std::str::FromStr;

use indexmap::IndexMap;
use strum_macros::AsRefStr;
use tracing::debug;

use crate::{
    config::{Config, ServerConfig},
    error::ProdServerError,
};

use super::ServerBackend;

/// Protocol interface granian should serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Interface {
    Asgi,
    Wsgi,
}

/// Typed option set accepted by granian.
///
/// Every recognized option is a named field; a key absent from this struct
/// simply does not survive parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GranianKwargs {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
    pub blocking_threads: Option<usize>,
    pub backlog: Option<usize>,
    pub reload: Option<bool>,
    pub websockets: Option<bool>,
    pub log_level: Option<String>,
    pub url_path_prefix: Option<String>,
    pub ssl_cert: Option<String>,
    pub ssl_key: Option<String>,
}

impl GranianKwargs {
    /// Parses a server entry's `args` mapping into typed options.
    pub fn from_args(args: &IndexMap<String, String>) -> Result<Self, ProdServerError> {
        let mut kwargs = GranianKwargs::default();
        for (key, value) in args {
            let normalized = key.replace('-', "_");
            let resolved = match normalized.as_str() {
                "host" => "address",
                "threads" => "blocking_threads",
                other => other,
            };
            match resolved {
                "address" => kwargs.address = Some(value.clone()),
                "port" => kwargs.port = Some(parse_integer(key, value)?),
                "workers" => kwargs.workers = Some(parse_integer(key, value)?),
                "blocking_threads" => {
                    kwargs.blocking_threads = Some(parse_integer(key, value)?)
                }
                "backlog" => kwargs.backlog = Some(parse_integer(key, value)?),
                "reload" => kwargs.reload = Some(parse_boolean(key, value)?),
                "websockets" => kwargs.websockets = Some(parse_boolean(key, value)?),
                "log_level" => kwargs.log_level = Some(value.clone()),
                "url_path_prefix" => kwargs.url_path_prefix = Some(value.clone()),
                "ssl_cert" => kwargs.ssl_cert = Some(value.clone()),
                "ssl_key" => kwargs.ssl_key = Some(value.clone()),
                unknown => {
                    debug!(key = unknown, "dropping unrecognized granian option");
                }
            }
        }
        Ok(kwargs)
    }

    /// Renders the options as granian CLI flags.
    fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(address) = &self.address {
            flags.push(format!("--address={address}"));
        }
        if let Some(port) = self.port {
            flags.push(format!("--port={port}"));
        }
        if let Some(workers) = self.workers {
            flags.push(format!("--workers={workers}"));
        }
        if let Some(threads) = self.blocking_threads {
            flags.push(format!("--blocking-threads={threads}"));
        }
        if let Some(backlog) = self.backlog {
            flags.push(format!("--backlog={backlog}"));
        }
        if let Some(reload) = self.reload {
            flags.push(format!("--reload={reload}"));
        }
        if let Some(websockets) = self.websockets {
            flags.push(format!("--websockets={websockets}"));
        }
        if let Some(level) = &self.log_level {
            flags.push(format!("--log-level={level}"));
        }
        if let Some(prefix) = &self.url_path_prefix {
            flags.push(format!("--url-path-prefix={prefix}"));
        }
        if let Some(cert) = &self.ssl_cert {
            flags.push(format!("--ssl-cert={cert}"));
        }
        if let Some(key) = &self.ssl_key {
            flags.push(format!("--ssl-key={key}"));
        }
        flags
    }
}

fn parse_integer<T>(key: &str, value: &str) -> Result<T, ProdServerError>
where
    T: FromStr,
{
    value
        .parse()
        .map_err(|_| ProdServerError::InvalidArgValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected an integer".to_string(),
        })
}

fn parse_boolean(key: &str, value: &str) -> Result<bool, ProdServerError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ProdServerError::InvalidArgValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected one of true/1/yes/on or false/0/no/off".to_string(),
        }),
    }
}

/// Backend for the granian server, serving either interface.
#[derive(Debug)]
pub struct GranianServer {
    target: String,
    interface: Interface,
    kwargs: GranianKwargs,
    args: Vec<String>,
}

impl GranianServer {
    /// Builds a granian backend serving the ASGI interface.
    pub fn asgi(server: &ServerConfig, config: &Config) -> Result<Self, ProdServerError> {
        Self::new(config.asgi_target()?, Interface::Asgi, server)
    }

    /// Builds a granian backend serving the WSGI interface.
    pub fn wsgi(server: &ServerConfig, config: &Config) -> Result<Self, ProdServerError> {
        Self::new(config.wsgi_target()?, Interface::Wsgi, server)
    }

    fn new(
        target: &str,
        interface: Interface,
        server: &ServerConfig,
    ) -> Result<Self, ProdServerError> {
        let kwargs = GranianKwargs::from_args(&server.args)?;
        let args = kwargs.to_flags();
        Ok(Self {
            target: target.to_string(),
            interface,
            kwargs,
            args,
        })
    }

    /// The typed options parsed from the server entry.
    pub fn kwargs(&self) -> &GranianKwargs {
        &self.kwargs
    }
}

impl ServerBackend for GranianServer {
    fn server_args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new("granian");
        command
            .arg(format!("--interface={}", self.interface.as_ref()))
            .args(args)
            .arg(&self.target);
        command
    }
}
