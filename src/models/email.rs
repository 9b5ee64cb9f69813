//! Domain model for one AI-processed email record.
//!
//! All content fields are optional; the backend stores whatever the
//! summarizer produced. Display fallbacks live here so every consumer
//! renders missing fields the same way.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for an email without a subject line.
pub const NO_SUBJECT: &str = "No Subject";

/// Placeholder when the summarizer produced no summary.
pub const NO_SUMMARY: &str = "No summary generated";

/// Placeholder when no reply suggestion exists.
pub const NO_REPLY: &str = "No reply generated";

/// Category applied to untagged emails.
pub const DEFAULT_TAG: &str = "General";

/// Record identifier as returned by the server.
/// The API has returned both numeric row ids and string message keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SummaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryId::Number(n) => write!(f, "{}", n),
            SummaryId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One processed email with its generated summary, reply suggestion and tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailSummary {
    #[serde(default)]
    pub id: Option<SummaryId>,
    /// Upstream mailbox message id, when the backend has one.
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default, rename = "from")]
    pub sender: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Short excerpt of the original body.
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub suggested_reply: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    /// ISO-8601 timestamp string from the backend.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An absent or empty string falls back. Empty matches the original UI,
/// which treated `""` the same as a missing field.
fn text_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}

impl EmailSummary {
    pub fn subject_display(&self) -> &str {
        text_or(&self.subject, NO_SUBJECT)
    }

    pub fn summary_display(&self) -> &str {
        text_or(&self.summary, NO_SUMMARY)
    }

    pub fn suggested_reply_display(&self) -> &str {
        text_or(&self.suggested_reply, NO_REPLY)
    }

    pub fn tag_display(&self) -> &str {
        text_or(&self.tag, DEFAULT_TAG)
    }

    /// List key for display. A record without a usable id renders as a dash
    /// rather than breaking the list.
    pub fn id_display(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fallbacks_when_absent() {
        let email = EmailSummary::default();
        assert_eq!(email.subject_display(), NO_SUBJECT);
        assert_eq!(email.summary_display(), NO_SUMMARY);
        assert_eq!(email.suggested_reply_display(), NO_REPLY);
        assert_eq!(email.tag_display(), DEFAULT_TAG);
        assert_eq!(email.id_display(), "-");
    }

    #[test]
    fn test_display_fallbacks_when_empty_string() {
        // The original client treated "" as missing, so we do too
        let email = EmailSummary {
            subject: Some(String::new()),
            summary: Some(String::new()),
            suggested_reply: Some(String::new()),
            tag: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(email.subject_display(), NO_SUBJECT);
        assert_eq!(email.summary_display(), NO_SUMMARY);
        assert_eq!(email.suggested_reply_display(), NO_REPLY);
        assert_eq!(email.tag_display(), DEFAULT_TAG);
    }

    #[test]
    fn test_display_uses_present_values() {
        let email = EmailSummary {
            id: Some(SummaryId::Number(7)),
            subject: Some("Quarterly report".to_string()),
            summary: Some("Numbers are up.".to_string()),
            suggested_reply: Some("Thanks, looks great.".to_string()),
            tag: Some("Work".to_string()),
            ..Default::default()
        };
        assert_eq!(email.subject_display(), "Quarterly report");
        assert_eq!(email.summary_display(), "Numbers are up.");
        assert_eq!(email.suggested_reply_display(), "Thanks, looks great.");
        assert_eq!(email.tag_display(), "Work");
        assert_eq!(email.id_display(), "7");
    }

    #[test]
    fn test_summary_id_parses_number_and_string() {
        let numeric: EmailSummary =
            serde_json::from_str(r#"{"id": 42}"#).expect("numeric id should parse");
        assert_eq!(numeric.id, Some(SummaryId::Number(42)));

        let text: EmailSummary =
            serde_json::from_str(r#"{"id": "msg-42"}"#).expect("string id should parse");
        assert_eq!(text.id, Some(SummaryId::Text("msg-42".to_string())));
    }

    #[test]
    fn test_missing_id_does_not_fail_deserialization() {
        let email: EmailSummary =
            serde_json::from_str(r#"{"subject": "Hi"}"#).expect("record without id should parse");
        assert_eq!(email.id, None);
        assert_eq!(email.subject.as_deref(), Some("Hi"));
    }
}
