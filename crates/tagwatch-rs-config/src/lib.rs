//! Configuration model and loading for the Tagwatch service.
//!
//! This crate owns the config schema, JSON5 parsing, and validation used by
//! the server binary and by tests that build configs in code.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Default config filename looked up by the server binary.
pub use loader::DEFAULT_CONFIG_FILE;
/// Configuration schema models.
pub use model::*;
