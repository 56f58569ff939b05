use async_trait::async_trait;
use parking_lot::Mutex;
use tagwatch_rs_core::{QuestionError, QuestionSource};
use tagwatch_rs_protocol::{QuestionItem, QuestionQuery};

/// Build an upstream item with a fixed link derived from `score`.
pub fn question_item(title: &str, body: &str, creation_date: i64, score: i64) -> QuestionItem {
    QuestionItem {
        title: title.to_string(),
        link: format!("https://stackoverflow.com/questions/{score}"),
        body: body.to_string(),
        creation_date,
        score,
    }
}

/// Returns the same items for every search and records each query.
#[derive(Default)]
pub struct FixedQuestionSource {
    items: Vec<QuestionItem>,
    queries: Mutex<Vec<QuestionQuery>>,
}

impl FixedQuestionSource {
    pub fn new(items: Vec<QuestionItem>) -> Self {
        Self {
            items,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<QuestionQuery> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl QuestionSource for FixedQuestionSource {
    async fn search(&self, query: &QuestionQuery) -> Result<Vec<QuestionItem>, QuestionError> {
        self.queries.lock().push(query.clone());
        Ok(self.items.clone())
    }
}

/// Fails every search the way the upstream rejects a bad parameter.
#[derive(Debug, Default)]
pub struct FailingQuestionSource;

#[async_trait]
impl QuestionSource for FailingQuestionSource {
    async fn search(&self, _query: &QuestionQuery) -> Result<Vec<QuestionItem>, QuestionError> {
        Err(QuestionError::Upstream {
            status: 400,
            error_id: Some(400),
            error_name: Some("bad_parameter".to_string()),
            message: "tagged is invalid".to_string(),
        })
    }
}
