//! Question feed types: query parameters, upstream items, and normalized records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tag queried when the caller does not name one.
pub const DEFAULT_TAG: &str = "artificial-intelligence";
/// Page size requested when the caller does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;
/// Upstream sort field used by default.
pub const DEFAULT_SORT: &str = "creation";
/// Upstream sort order used by default.
pub const DEFAULT_ORDER: &str = "desc";
/// Length of the trailing window in days.
pub const DEFAULT_DAYS: u32 = 7;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Raw query string of `GET /questions`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionsParams {
    #[serde(default)]
    pub tagged: Option<String>,
    #[serde(default)]
    pub pagesize: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub fromdate: Option<i64>,
    #[serde(default)]
    pub todate: Option<i64>,
}

/// Half-open `[fromdate, todate)` window in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub fromdate: i64,
    pub todate: i64,
}

impl TimeWindow {
    /// Window of `days` days ending at `now`. The start saturates at
    /// `i64::MIN`.
    pub fn trailing_days(now: i64, days: u32) -> Self {
        Self {
            fromdate: now.saturating_sub(i64::from(days) * SECONDS_PER_DAY),
            todate: now,
        }
    }

    /// Resolve a window from optional explicit bounds.
    ///
    /// A missing `todate` is `now`; a missing `fromdate` lies `days` days
    /// before the resolved `todate`. Returns `None` when that start is not
    /// representable.
    pub fn resolve(
        now: i64,
        days: u32,
        fromdate: Option<i64>,
        todate: Option<i64>,
    ) -> Option<Self> {
        let todate = todate.unwrap_or(now);
        let fromdate = match fromdate {
            Some(fromdate) => fromdate,
            None => todate.checked_sub(i64::from(days).checked_mul(SECONDS_PER_DAY)?)?,
        };
        Some(Self { fromdate, todate })
    }
}

/// Fully resolved search against the question API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionQuery {
    pub tagged: String,
    pub pagesize: u32,
    pub sort: String,
    pub order: String,
    pub window: TimeWindow,
}

impl QuestionQuery {
    /// Query with every default applied, windowed relative to `now`.
    pub fn with_defaults(now: i64) -> Self {
        Self {
            tagged: DEFAULT_TAG.to_string(),
            pagesize: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
            order: DEFAULT_ORDER.to_string(),
            window: TimeWindow::trailing_days(now, DEFAULT_DAYS),
        }
    }

    /// Fill unset parameters with defaults. The window is computed from `now`
    /// on every call; `None` means the requested window is out of range.
    pub fn from_params(params: QuestionsParams, now: i64) -> Option<Self> {
        let days = params.days.unwrap_or(DEFAULT_DAYS);
        Some(Self {
            window: TimeWindow::resolve(now, days, params.fromdate, params.todate)?,
            tagged: params.tagged.unwrap_or_else(|| DEFAULT_TAG.to_string()),
            pagesize: params.pagesize.unwrap_or(DEFAULT_PAGE_SIZE),
            sort: params.sort.unwrap_or_else(|| DEFAULT_SORT.to_string()),
            order: params.order.unwrap_or_else(|| DEFAULT_ORDER.to_string()),
        })
    }
}

/// A question as returned by the upstream search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub title: String,
    pub link: String,
    /// HTML body; only present when the request asked for it.
    #[serde(default)]
    pub body: String,
    /// Unix seconds.
    pub creation_date: i64,
    pub score: i64,
}

/// Normalized question returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub title: String,
    pub link: String,
    pub content: String,
    pub date: NaiveDate,
    pub score: i64,
}

/// Response body for `GET /questions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub results: Vec<QuestionRecord>,
}
