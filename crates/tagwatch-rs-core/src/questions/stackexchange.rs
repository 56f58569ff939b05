//! Stack Exchange API client for the `/questions` search.

use super::QuestionSource;
use crate::QuestionError;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use tagwatch_rs_config::QuestionsConfig;
use tagwatch_rs_protocol::{QuestionItem, QuestionQuery};

/// Response wrapper common to every Stack Exchange method.
#[derive(Debug, Deserialize)]
struct QuestionPage {
    #[serde(default)]
    items: Vec<QuestionItem>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    quota_remaining: Option<i64>,
    /// Seconds the API asks callers to wait before repeating this method.
    #[serde(default)]
    backoff: Option<u64>,
}

/// Error wrapper returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_id: Option<i64>,
    error_name: Option<String>,
    error_message: Option<String>,
}

/// Client bound to a single Stack Exchange site.
#[derive(Debug, Clone)]
pub struct StackExchangeClient {
    http: reqwest::Client,
    api_base: String,
    site: String,
    filter: String,
    api_key: Option<String>,
}

impl StackExchangeClient {
    pub fn new(http: reqwest::Client, config: &QuestionsConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            site: config.site.clone(),
            filter: config.filter.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/questions", self.api_base)
    }

    fn query_pairs(&self, query: &QuestionQuery) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("site", self.site.clone()),
            ("sort", query.sort.clone()),
            ("order", query.order.clone()),
            ("tagged", query.tagged.clone()),
            ("filter", self.filter.clone()),
            ("pagesize", query.pagesize.to_string()),
            ("fromdate", query.window.fromdate.to_string()),
            ("todate", query.window.todate.to_string()),
        ];
        if let Some(key) = &self.api_key {
            pairs.push(("key", key.clone()));
        }
        pairs
    }
}

#[async_trait]
impl QuestionSource for StackExchangeClient {
    async fn search(&self, query: &QuestionQuery) -> Result<Vec<QuestionItem>, QuestionError> {
        debug!(
            "question API search (site={}, tagged={}, sort={}, order={})",
            self.site, query.tagged, query.sort, query.order
        );
        let response = self
            .http
            .get(self.search_url())
            .query(&self.query_pairs(query))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &body));
        }

        let page: QuestionPage =
            serde_json::from_slice(&body).map_err(|err| QuestionError::Decode(err.to_string()))?;
        if let Some(backoff) = page.backoff {
            warn!(
                "question API requested backoff (site={}, seconds={})",
                self.site, backoff
            );
        }
        debug!(
            "question API page (items={}, has_more={}, quota_remaining={:?})",
            page.items.len(),
            page.has_more,
            page.quota_remaining
        );
        Ok(page.items)
    }
}

fn upstream_error(status: u16, body: &[u8]) -> QuestionError {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) => QuestionError::Upstream {
            status,
            error_id: parsed.error_id,
            message: parsed
                .error_message
                .or_else(|| parsed.error_name.clone())
                .unwrap_or_else(|| "no error message".to_string()),
            error_name: parsed.error_name,
        },
        Err(_) => QuestionError::Upstream {
            status,
            error_id: None,
            error_name: None,
            message: String::from_utf8_lossy(body).trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_stub;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Arc;

    type Captured = Arc<Mutex<Option<HashMap<String, String>>>>;

    async fn stub_client(
        status: StatusCode,
        body: Value,
        config: QuestionsConfig,
    ) -> (StackExchangeClient, Captured) {
        let captured: Captured = Arc::default();
        let router = Router::new()
            .route(
                "/2.3/questions",
                get(
                    move |State(captured): State<Captured>,
                          Query(params): Query<HashMap<String, String>>| {
                        let body = body.clone();
                        async move {
                            *captured.lock() = Some(params);
                            (status, Json(body))
                        }
                    },
                ),
            )
            .with_state(captured.clone());
        let addr = spawn_stub(router).await;
        let config = QuestionsConfig {
            api_base: format!("http://{addr}/2.3/"),
            ..config
        };
        (
            StackExchangeClient::new(reqwest::Client::new(), &config),
            captured,
        )
    }

    fn query() -> QuestionQuery {
        QuestionQuery {
            tagged: "python".to_string(),
            pagesize: 3,
            sort: "votes".to_string(),
            order: "asc".to_string(),
            window: tagwatch_rs_protocol::TimeWindow {
                fromdate: 1_000,
                todate: 2_000,
            },
        }
    }

    #[tokio::test]
    async fn sends_single_search_with_all_parameters() {
        let (client, captured) = stub_client(
            StatusCode::OK,
            json!({
                "items": [{
                    "title": "Q",
                    "link": "https://stackoverflow.com/q/1",
                    "body": "<p>hi</p>",
                    "creation_date": 1_500,
                    "score": 4,
                    "tags": ["python"],
                }],
                "has_more": true,
                "quota_remaining": 299,
            }),
            QuestionsConfig::default(),
        )
        .await;

        let items = client.search(&query()).await.expect("search");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body, "<p>hi</p>");
        assert_eq!(items[0].creation_date, 1_500);

        let params = captured.lock().clone().expect("request");
        let expected: HashMap<String, String> = [
            ("site", "stackoverflow"),
            ("sort", "votes"),
            ("order", "asc"),
            ("tagged", "python"),
            ("filter", "withbody"),
            ("pagesize", "3"),
            ("fromdate", "1000"),
            ("todate", "2000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(params, expected);
    }

    #[tokio::test]
    async fn api_key_is_forwarded_when_configured() {
        let (client, captured) = stub_client(
            StatusCode::OK,
            json!({ "items": [] }),
            QuestionsConfig {
                api_key: Some("secret".to_string()),
                ..QuestionsConfig::default()
            },
        )
        .await;

        let items = client.search(&query()).await.expect("search");
        assert!(items.is_empty());
        let params = captured.lock().clone().expect("request");
        assert_eq!(params.get("key").map(String::as_str), Some("secret"));
    }

    #[tokio::test]
    async fn error_body_becomes_upstream_error() {
        let (client, _) = stub_client(
            StatusCode::BAD_REQUEST,
            json!({
                "error_id": 400,
                "error_name": "bad_parameter",
                "error_message": "sort",
            }),
            QuestionsConfig::default(),
        )
        .await;

        let err = client.search(&query()).await.unwrap_err();
        let QuestionError::Upstream {
            status,
            error_id,
            error_name,
            message,
        } = err
        else {
            panic!("expected upstream error");
        };
        assert_eq!(status, 400);
        assert_eq!(error_id, Some(400));
        assert_eq!(error_name.as_deref(), Some("bad_parameter"));
        assert_eq!(message, "sort");
    }

    #[tokio::test]
    async fn malformed_page_is_decode_error() {
        let (client, _) = stub_client(
            StatusCode::OK,
            json!({ "items": [{ "title": "missing fields" }] }),
            QuestionsConfig::default(),
        )
        .await;

        let err = client.search(&query()).await.unwrap_err();
        assert!(matches!(err, QuestionError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_api_is_request_error() {
        let client = StackExchangeClient::new(
            reqwest::Client::new(),
            &QuestionsConfig {
                api_base: "http://127.0.0.1:9".to_string(),
                ..QuestionsConfig::default()
            },
        );
        let err = client.search(&query()).await.unwrap_err();
        assert!(matches!(err, QuestionError::Request(_)));
    }
}
