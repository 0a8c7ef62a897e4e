//! Dispatching a named server entry to its backend.
use tracing::info;

use crate::{
    backends::{BackendKind, ServerBackend},
    config::Config,
    error::ProdServerError,
};

/// Prints every registered server name, in configuration order.
pub fn list_servers(config: &Config) {
    for name in config.servers.keys() {
        println!("{name}");
    }
}

/// Resolves a requested server name against the registry and constructs its
/// backend. `None` selects the first registered entry.
pub fn resolve(
    config: &Config,
    name: Option<&str>,
) -> Result<(String, Box<dyn ServerBackend>), ProdServerError> {
    let name = match name {
        Some(name) => name.to_string(),
        None => config
            .servers
            .keys()
            .next()
            .cloned()
            .ok_or(ProdServerError::NoServersConfigured)?,
    };

    let server = config
        .servers
        .get(&name)
        .ok_or_else(|| ProdServerError::UnknownServer {
            name: name.clone(),
            available: config.servers.keys().cloned().collect(),
        })?;

    let backend = server
        .backend
        .as_deref()
        .ok_or_else(|| ProdServerError::MissingBackend { name: name.clone() })?;

    let kind = BackendKind::resolve(&name, backend)?;
    let backend = kind.build(&name, server, config)?;
    Ok((name, backend))
}

/// Runs the full lifecycle for one server entry.
///
/// On success this never returns: the backend execs the delegated server
/// program. Any return value is a failure, either of configuration or of
/// the delegation itself.
pub fn dispatch(config: &Config, name: Option<&str>) -> Result<(), ProdServerError> {
    let (name, backend) = resolve(config, name)?;
    info!("Starting server named {name}");
    let args = backend.prepare_args();
    backend.start(&args)
}
