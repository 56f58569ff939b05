//! Shared outbound HTTP client construction.

use log::debug;
use std::time::Duration;
use tagwatch_rs_config::HttpConfig;

/// User agent sent to both upstreams.
const USER_AGENT: &str = concat!("tagwatch/", env!("CARGO_PKG_VERSION"));

/// Build the pooled client used for every upstream call.
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(secs) = config.timeout_secs {
        debug!("outbound request timeout set (secs={})", secs);
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}
