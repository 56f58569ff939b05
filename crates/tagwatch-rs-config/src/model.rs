//! Configuration schema for Tagwatch.

use serde::{Deserialize, Serialize};

/// Environment variable holding the storage connection string by default.
pub const DEFAULT_CONNECTION_STRING_ENV: &str = "STORAGE_ACCOUNT_CONNECTION_STRING";
/// Container that receives saved agent responses by default.
pub const DEFAULT_CONTAINER: &str = "agent-responses";

/// Root config for the Tagwatch service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub questions: QuestionsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl ServiceConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }
}

/// Builder for assembling a `ServiceConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
        }
    }

    /// Replace the listener configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the question API configuration.
    pub fn questions(mut self, questions: QuestionsConfig) -> Self {
        self.config.questions = questions;
        self
    }

    /// Replace the blob storage configuration.
    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.config.storage = storage;
        self
    }

    /// Replace the outbound HTTP client configuration.
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Finalize and return the built `ServiceConfig`.
    pub fn build(self) -> ServiceConfig {
        self.config
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

/// Stack Exchange search API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QuestionsConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_site")]
    pub site: String,
    /// Named response filter; `withbody` includes the question HTML.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Optional app key, which raises the upstream request quota.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            site: default_site(),
            filter: default_filter(),
            api_key: None,
        }
    }
}

fn default_api_base() -> String {
    "https://api.stackexchange.com/2.3".to_string()
}

fn default_site() -> String {
    "stackoverflow".to_string()
}

fn default_filter() -> String {
    "withbody".to_string()
}

/// Blob storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Environment variable read on every save for the connection string.
    #[serde(default = "default_connection_string_env")]
    pub connection_string_env: String,
    #[serde(default = "default_container")]
    pub container: String,
    /// Fail saves when container creation fails for a reason other than
    /// the container already existing.
    #[serde(default)]
    pub strict_container_create: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            connection_string_env: default_connection_string_env(),
            container: default_container(),
            strict_container_create: false,
        }
    }
}

fn default_connection_string_env() -> String {
    DEFAULT_CONNECTION_STRING_ENV.to_string()
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

/// Outbound HTTP client settings shared by both upstreams.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Whole-request timeout; unset leaves the client default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}
