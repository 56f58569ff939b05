//! Question fetcher: one search against the question API, normalized.

pub mod normalize;
mod stackexchange;

pub use stackexchange::StackExchangeClient;

use crate::QuestionError;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use tagwatch_rs_protocol::{QuestionItem, QuestionQuery, QuestionsParams, QuestionsResponse};

#[async_trait]
/// Upstream search over tagged questions.
pub trait QuestionSource: Send + Sync {
    /// Fetch a single page of questions matching `query`, in upstream order.
    async fn search(&self, query: &QuestionQuery) -> Result<Vec<QuestionItem>, QuestionError>;
}

/// Runs a query against a `QuestionSource` and normalizes the items.
#[derive(Clone)]
pub struct QuestionFetcher {
    source: Arc<dyn QuestionSource>,
}

impl QuestionFetcher {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// Resolve request parameters against `now` (Unix seconds) and fetch.
    pub async fn fetch_params(
        &self,
        params: QuestionsParams,
        now: i64,
    ) -> Result<QuestionsResponse, QuestionError> {
        let query = QuestionQuery::from_params(params, now).ok_or_else(|| {
            QuestionError::InvalidQuery("time window is out of range".to_string())
        })?;
        self.fetch(&query).await
    }

    /// Fetch and normalize one page of results.
    pub async fn fetch(&self, query: &QuestionQuery) -> Result<QuestionsResponse, QuestionError> {
        validate_query(query)?;
        debug!(
            "fetching questions (tagged={}, pagesize={}, fromdate={}, todate={})",
            query.tagged, query.pagesize, query.window.fromdate, query.window.todate
        );
        let items = self.source.search(query).await?;
        let results = items
            .into_iter()
            .map(normalize::to_record)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("fetched questions (count={})", results.len());
        Ok(QuestionsResponse { results })
    }
}

fn validate_query(query: &QuestionQuery) -> Result<(), QuestionError> {
    if query.tagged.trim().is_empty() {
        return Err(QuestionError::InvalidQuery(
            "tagged cannot be empty".to_string(),
        ));
    }
    if query.pagesize == 0 {
        return Err(QuestionError::InvalidQuery(
            "pagesize must be positive".to_string(),
        ));
    }
    if query.window.fromdate >= query.window.todate {
        return Err(QuestionError::InvalidQuery(
            "fromdate must be before todate".to_string(),
        ));
    }
    Ok(())
}
