//! Error handling for prodserver.
use thiserror::Error;

/// Defines all possible errors that can occur while dispatching a server.
///
/// Errors fall into two families: configuration errors (bad or incomplete
/// registry entries, missing optional dependencies) which are rendered as a
/// user-facing message at the CLI boundary, and delegation errors raised by
/// the underlying server program, which propagate unmodified.
#[derive(Debug, Error)]
pub enum ProdServerError {
    /// Error reading or accessing the configuration file.
    #[error("Failed to read config file: {0}")]
    ConfigRead(std::io::Error),

    /// Error parsing YAML configuration.
    #[error("Invalid YAML format: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// An environment variable referenced from the config is not set.
    #[error("Missing environment variable referenced from config: {name}")]
    MissingEnvVar {
        /// Variable name as written in the config file.
        name: String,
    },

    /// The `servers` section of the configuration is empty.
    #[error("No servers configured")]
    NoServersConfigured,

    /// The requested server name does not exist in the registry.
    #[error(
        "Server named '{name}' not found in configuration. Available servers: {}",
        available.join(", ")
    )]
    UnknownServer {
        /// The name that was requested.
        name: String,
        /// Every registered server name, in configuration order.
        available: Vec<String>,
    },

    /// A server entry is missing its `backend` field.
    #[error("Backend not configured for server named '{name}'")]
    MissingBackend {
        /// The server entry at fault.
        name: String,
    },

    /// A server entry names a backend this build does not provide.
    #[error("Unknown backend '{backend}' for server named '{name}'")]
    UnknownBackend {
        /// The server entry at fault.
        name: String,
        /// The unrecognized backend string.
        backend: String,
    },

    /// A backend needs `wsgi_app` or `asgi_app` and the config omits it.
    #[error("'{field}' must be configured to start this backend")]
    MissingAppTarget {
        /// The top-level config field that is required.
        field: &'static str,
    },

    /// A server entry is missing a backend-specific required field.
    #[error("Server named '{name}' requires a '{field}' entry in its configuration")]
    MissingField {
        /// The server entry at fault.
        name: String,
        /// The missing field.
        field: &'static str,
    },

    /// An argument value could not be converted to the type the backend needs.
    #[error("Invalid value '{value}' for argument '{key}': {reason}")]
    InvalidArgValue {
        /// Argument name as written in the config.
        key: String,
        /// The offending value.
        value: String,
        /// What the backend expected.
        reason: String,
    },

    /// An optional external package a backend depends on is not installed.
    #[error("{package} is required to use this backend. Install it with `{hint}`.")]
    MissingDependency {
        /// The package that could not be found.
        package: String,
        /// Install command suggested to the user.
        hint: String,
        /// The probe failure that revealed the absence.
        #[source]
        source: std::io::Error,
    },

    /// An optional package is installed but the host app never registered it.
    #[error("Add '{package}' to installed_apps to use this backend")]
    UnregisteredApp {
        /// The component name missing from `installed_apps`.
        package: String,
    },

    /// Failure handing control to the delegated server program.
    #[error(transparent)]
    Delegation(std::io::Error),
}

impl ProdServerError {
    /// Whether this error belongs to the configuration family.
    ///
    /// Configuration errors are caught at the CLI boundary and rendered as a
    /// plain message with a non-zero exit; delegation errors never are.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ProdServerError::Delegation(_))
    }
}
