//! Reshaping of upstream question items into `QuestionRecord`s.

use crate::QuestionError;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tagwatch_rs_protocol::{QuestionItem, QuestionRecord};

/// Content is cut to this many characters after tags are stripped.
pub const MAX_CONTENT_CHARS: usize = 1000;

/// Anything between angle brackets. Entities and malformed markup pass through.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("tag pattern compiles"));

/// Remove every `<...>` sequence from `html`.
pub fn strip_tags(html: &str) -> Cow<'_, str> {
    TAG_PATTERN.replace_all(html, "")
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

/// Replace double quotes with single quotes.
pub fn normalize_quotes(text: &str) -> String {
    text.replace('"', "'")
}

/// UTC calendar date of a Unix timestamp.
pub fn creation_date(timestamp: i64) -> Result<NaiveDate, QuestionError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|datetime| datetime.date_naive())
        .ok_or(QuestionError::InvalidTimestamp(timestamp))
}

/// Normalize one upstream item.
pub fn to_record(item: QuestionItem) -> Result<QuestionRecord, QuestionError> {
    let text = strip_tags(&item.body);
    let content = normalize_quotes(truncate_chars(&text, MAX_CONTENT_CHARS));
    Ok(QuestionRecord {
        title: normalize_quotes(&item.title),
        link: item.link,
        content,
        date: creation_date(item.creation_date)?,
        score: item.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(title: &str, body: &str, creation_date: i64) -> QuestionItem {
        QuestionItem {
            title: title.to_string(),
            link: "https://stackoverflow.com/questions/1/x".to_string(),
            body: body.to_string(),
            creation_date,
            score: 7,
        }
    }

    #[test]
    fn strips_simple_tags() {
        assert_eq!(
            strip_tags("<p>How do I <code>train</code> a model?</p>\n<pre>x</pre>"),
            "How do I train a model?\nx"
        );
    }

    #[test]
    fn tags_spanning_lines_are_removed() {
        assert_eq!(strip_tags("a<img\nsrc='x'>b"), "ab");
    }

    #[test]
    fn entities_and_stray_brackets_are_left_alone() {
        assert_eq!(strip_tags("1 &lt; 2 and 3 < 4"), "1 &lt; 2 and 3 < 4");
        assert_eq!(strip_tags("a <<b> c"), "a < c");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(1200);
        let truncated = truncate_chars(&text, MAX_CONTENT_CHARS);
        assert_eq!(truncated.chars().count(), MAX_CONTENT_CHARS);
        assert_eq!(truncate_chars("short", MAX_CONTENT_CHARS), "short");
    }

    #[test]
    fn truncation_applies_after_stripping() {
        let body = format!("<div>{}</div>", "a".repeat(MAX_CONTENT_CHARS));
        let record = to_record(item("t", &body, 0)).expect("record");
        assert_eq!(record.content, "a".repeat(MAX_CONTENT_CHARS));
    }

    #[test]
    fn quotes_are_replaced_in_title_and_content() {
        let record = to_record(item(
            r#"Why does "self" fail?"#,
            r#"<p class="lead">Use "quotes"</p>"#,
            0,
        ))
        .expect("record");
        assert_eq!(record.title, "Why does 'self' fail?");
        assert_eq!(record.content, "Use 'quotes'");
    }

    #[test]
    fn date_drops_time_of_day_in_utc() {
        // 2024-03-09T23:59:59Z
        let record = to_record(item("t", "", 1_710_028_799)).expect("record");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 9).expect("date"));
        assert_eq!(
            creation_date(1_710_028_800).expect("date"),
            NaiveDate::from_ymd_opt(2024, 3, 10).expect("date")
        );
    }

    #[test]
    fn link_and_score_pass_through() {
        let record = to_record(item("t", "b", 0)).expect("record");
        assert_eq!(record.link, "https://stackoverflow.com/questions/1/x");
        assert_eq!(record.score, 7);
    }

    #[test]
    fn out_of_range_timestamp_is_an_error() {
        let err = to_record(item("t", "b", i64::MAX)).unwrap_err();
        assert!(matches!(err, QuestionError::InvalidTimestamp(i64::MAX)));
    }
}
