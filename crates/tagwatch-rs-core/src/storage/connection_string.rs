//! Storage connection strings: where they come from and which account they name.

use crate::StorageError;
use azure_storage::{CloudLocation, ConnectionString, StorageCredentials};
use std::fmt;
use std::io::Read;
use url::{Host, Url};

/// Account used by the local storage emulator.
const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
/// Well-known, public key of the local storage emulator account.
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Where the connection string comes from. Resolved on every save.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionStringSource {
    /// Read from the named environment variable, falling back to a `.env`
    /// file that is re-read on every call.
    Env(String),
    /// A fixed value, for embedding and tests.
    Fixed(String),
}

impl ConnectionStringSource {
    pub fn resolve(&self) -> Result<String, StorageError> {
        match self {
            Self::Env(name) => non_empty(std::env::var(name).ok())
                .or_else(|| from_dotenv(name))
                .ok_or_else(|| StorageError::MissingConnectionString(name.clone())),
            Self::Fixed(value) => non_empty(Some(value.clone())).ok_or_else(|| {
                StorageError::MissingConnectionString("<fixed>".to_string())
            }),
        }
    }
}

impl fmt::Debug for ConnectionStringSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(name) => f.debug_tuple("Env").field(name).finish(),
            Self::Fixed(_) => f.debug_tuple("Fixed").field(&"<redacted>").finish(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn from_dotenv(name: &str) -> Option<String> {
    find_var(dotenvy::dotenv_iter().ok()?, name)
}

/// Value of `name` in a dotenv stream. Unparseable lines are skipped.
fn find_var<R: Read>(iter: dotenvy::Iter<R>, name: &str) -> Option<String> {
    iter.filter_map(Result::ok)
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| non_empty(Some(value)))
}

/// Storage account named by a connection string, with its credentials.
#[derive(Clone)]
pub struct StorageAccount {
    pub account: String,
    /// Blob service base URL, without a trailing slash.
    pub blob_endpoint: String,
    credentials: StorageCredentials,
}

impl StorageAccount {
    /// Parse a connection string.
    ///
    /// `BlobEndpoint` wins over `AccountName`/`EndpointSuffix`; a SAS token
    /// wins over an account key. `UseDevelopmentStorage=true` selects the
    /// local emulator account.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let parsed = ConnectionString::new(raw)
            .map_err(|_| invalid("expected known Key=Value settings separated by ';'"))?;
        if parsed.use_development_storage == Some(true) {
            return Ok(Self::development());
        }

        let blob_endpoint = match (parsed.blob_endpoint, parsed.account_name) {
            (Some(endpoint), _) => endpoint.trim_end_matches('/').to_string(),
            (None, Some(account)) => format!(
                "https://{account}.blob.{}",
                parsed.endpoint_suffix.unwrap_or(DEFAULT_ENDPOINT_SUFFIX)
            ),
            (None, None) => return Err(invalid("AccountName or BlobEndpoint is required")),
        };
        let account = match parsed.account_name {
            Some(account) => account.to_string(),
            None => account_from_endpoint(&blob_endpoint)?,
        };
        let credentials = parsed
            .storage_credentials()
            .map_err(|_| invalid("AccountKey or SharedAccessSignature is required"))?;

        Ok(Self {
            account,
            blob_endpoint,
            credentials,
        })
    }

    fn development() -> Self {
        Self {
            account: DEV_ACCOUNT_NAME.to_string(),
            blob_endpoint: DEV_BLOB_ENDPOINT.to_string(),
            credentials: StorageCredentials::access_key(
                DEV_ACCOUNT_NAME,
                DEV_ACCOUNT_KEY.to_string(),
            ),
        }
    }

    pub(crate) fn location(&self) -> CloudLocation {
        CloudLocation::Custom {
            account: self.account.clone(),
            uri: self.blob_endpoint.clone(),
        }
    }

    pub(crate) fn credentials(&self) -> StorageCredentials {
        self.credentials.clone()
    }
}

impl fmt::Debug for StorageAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageAccount")
            .field("account", &self.account)
            .field("blob_endpoint", &self.blob_endpoint)
            .field("credentials", &"<redacted>")
            .finish()
    }
}

/// Account of a SAS-only endpoint: the first host label, or the first path
/// segment for path-style (emulator) endpoints.
fn account_from_endpoint(endpoint: &str) -> Result<String, StorageError> {
    let url = Url::parse(endpoint).map_err(|_| invalid("BlobEndpoint is not a URL"))?;
    let account = match url.host() {
        Some(Host::Domain(domain)) if domain != "localhost" => domain.split('.').next(),
        _ => url
            .path_segments()
            .and_then(|mut segments| segments.find(|segment| !segment.is_empty())),
    };
    account
        .filter(|account| !account.is_empty())
        .map(str::to_string)
        .ok_or_else(|| invalid("AccountName is required for this BlobEndpoint"))
}

fn invalid(message: impl Into<String>) -> StorageError {
    StorageError::InvalidConnectionString(message.into())
}
