//! Config file loading and validation.
//!
//! A config is a single JSON5 document; every table and field is optional
//! and falls back to the defaults in `model`.


use crate::{ConfigError, ServiceConfig};
use log::{debug, info};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

/// Default config filename looked up by the server binary.
pub const DEFAULT_CONFIG_FILE: &str = "tagwatch.json5";

impl ServiceConfig {
    /// Load and validate a config from a path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load and validate a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let config: ServiceConfig = json5::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::invalid_field(
                "server.bind",
                format!("`{}` is not a socket address", self.server.bind),
            ));
        }

        let api_base = self.questions.api_base.as_str();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::invalid_field(
                "questions.api_base",
                "must be an http(s) URL",
            ));
        }
        require_non_empty("questions.site", &self.questions.site)?;
        require_non_empty("questions.filter", &self.questions.filter)?;
        if let Some(key) = &self.questions.api_key {
            require_non_empty("questions.api_key", key)?;
        }

        require_non_empty(
            "storage.connection_string_env",
            &self.storage.connection_string_env,
        )?;
        validate_container_name(&self.storage.container)?;

        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::invalid_field(
                "http.timeout_secs",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn require_non_empty(path: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid_field(path, "cannot be empty"));
    }
    Ok(())
}

/// Container names are 3-63 characters of lowercase letters, digits, and
/// single hyphens, starting and ending with a letter or digit.
fn validate_container_name(name: &str) -> Result<(), ConfigError> {
    let path = "storage.container";
    if !(3..=63).contains(&name.len()) {
        return Err(ConfigError::invalid_field(
            path,
            "must be between 3 and 63 characters",
        ));
    }
    if !name
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
    {
        return Err(ConfigError::invalid_field(
            path,
            "only lowercase letters, digits, and hyphens are allowed",
        ));
    }
    if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
        return Err(ConfigError::invalid_field(
            path,
            "hyphens must sit between letters or digits",
        ));
    }
    Ok(())
}
