//! Wire types shared by the Tagwatch server, core, and tests.

mod question;

pub use question::{
    DEFAULT_DAYS, DEFAULT_ORDER, DEFAULT_PAGE_SIZE, DEFAULT_SORT, DEFAULT_TAG, QuestionItem,
    QuestionQuery, QuestionRecord, QuestionsParams, QuestionsResponse, SECONDS_PER_DAY, TimeWindow,
};

use serde::{Deserialize, Serialize};

/// Request body for `POST /save-response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponseRequest {
    /// Text payload persisted verbatim as the blob body.
    pub agent_response: String,
}

/// Response body for `POST /save-response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponseReply {
    /// Name of the blob the payload was written to.
    pub blob_name: String,
}

/// Body returned with every error status generated by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
