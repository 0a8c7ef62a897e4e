//! Prodserver is a thin adapter that launches one of several third-party
//! production servers (WSGI/ASGI HTTP servers, task and queue workers) from
//! a uniform configuration file. It resolves a named server entry against
//! the configured registry, normalizes the entry's options into the shape
//! the chosen server expects, and hands the process over to that server.

/// Server and worker backends.
pub mod backends;

/// CLI interface.
pub mod cli;

/// Configuration management.
pub mod config;

/// Server dispatching.
pub mod dispatch;

/// Error handling.
pub mod error;

#[cfg(test)]
pub mod test_utils;
