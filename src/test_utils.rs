use std::sync::{Mutex, MutexGuard, OnceLock};

use indexmap::IndexMap;

use crate::config::{Config, ServerConfig};

/// Global lock for environment variable modifications in tests.
/// Tests that set or rely on unset process environment variables should hold
/// this lock to prevent races between parallel test executions.
pub static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A configuration with both application targets set and an empty registry.
pub fn test_config() -> Config {
    Config {
        version: "1".into(),
        wsgi_app: Some("myproject.wsgi:application".into()),
        asgi_app: Some("myproject.asgi:application".into()),
        manage: vec!["python".into(), "manage.py".into()],
        installed_apps: vec![],
        servers: IndexMap::new(),
    }
}

/// A server entry for the given backend with the given `args` pairs.
pub fn server_entry(backend: &str, pairs: &[(&str, &str)]) -> ServerConfig {
    ServerConfig {
        backend: Some(backend.into()),
        args: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        app: None,
    }
}
