//! API client for the email-summarization backend.
//!
//! One authenticated read endpoint: `GET /fetch_emails` returns an object
//! with an `emails` array of processed records. The bearer token rides in
//! the `Authorization` header, attached exactly when a credential is held.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::EmailSummary;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Path of the authorization redirect that starts the sign-in flow
const AUTH_GOOGLE_PATH: &str = "/auth/google";

/// Path of the summaries collection endpoint
const FETCH_EMAILS_PATH: &str = "/fetch_emails";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Success body wrapper. The collection field may be absent or null; both
/// read as an empty list.
#[derive(Debug, Deserialize)]
struct EmailsResponse {
    #[serde(default)]
    emails: Option<Vec<EmailSummary>>,
}

/// API client for the summarization backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    origin: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given backend origin
    pub fn new(origin: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            origin,
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token; subsequent requests go out unauthenticated
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// URL the browser is sent to for sign-in
    pub fn auth_url(&self) -> String {
        format!("{}{}", self.origin, AUTH_GOOGLE_PATH)
    }

    /// Attach `Authorization: Bearer` iff a credential is held.
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch the full list of processed email summaries.
    ///
    /// A single request/response round trip: no retry or pagination. Any
    /// transport failure or non-success status is an error; a success body
    /// without the expected collection degrades to an empty list.
    pub async fn fetch_summaries(&self) -> Result<Vec<EmailSummary>> {
        let url = format!("{}{}", self.origin, FETCH_EMAILS_PATH);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let body = response
            .text()
            .await
            .map_err(ApiError::from)
            .context("Failed to read summaries response body")?;

        let summaries = Self::parse_summaries(&body);
        debug!(count = summaries.len(), "Fetched email summaries");
        Ok(summaries)
    }

    /// Normalize a success body into the summary list.
    ///
    /// Mirrors the tolerant reading the backend's clients have always done:
    /// a missing or null `emails` field, or a body that is not the expected
    /// object at all, reads as an empty list rather than an error.
    fn parse_summaries(body: &str) -> Vec<EmailSummary> {
        match serde_json::from_str::<EmailsResponse>(body) {
            Ok(response) => response.emails.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Unexpected summaries response shape");
                Vec::new()
            }
        }
    }

    #[cfg(test)]
    fn has_auth_header(&self) -> bool {
        self.auth_headers()
            .map(|h| h.contains_key(header::AUTHORIZATION))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SummaryId;

    #[test]
    fn test_parse_summaries_basic() {
        let json = r#"{ "emails": [{ "id": 1, "subject": "Hi" }] }"#;
        let summaries = ApiClient::parse_summaries(json);

        assert_eq!(summaries.len(), 1);
        let email = &summaries[0];
        assert_eq!(email.id, Some(SummaryId::Number(1)));
        assert_eq!(email.subject.as_deref(), Some("Hi"));
        // Unset fields land on their display fallbacks
        assert_eq!(email.summary_display(), "No summary generated");
        assert_eq!(email.suggested_reply_display(), "No reply generated");
        assert_eq!(email.tag_display(), "General");
    }

    #[test]
    fn test_parse_summaries_full_record() {
        let json = r#"{
            "emails": [{
                "id": 3,
                "message_id": "18f2a",
                "from": "alice@example.com",
                "subject": "Lunch?",
                "snippet": "Are you free...",
                "summary": "Alice asks about lunch on Friday.",
                "suggested_reply": "Friday works for me.",
                "tag": "Personal",
                "created_at": "2025-11-02T09:30:00+00:00"
            }]
        }"#;
        let summaries = ApiClient::parse_summaries(json);

        assert_eq!(summaries.len(), 1);
        let email = &summaries[0];
        assert_eq!(email.sender.as_deref(), Some("alice@example.com"));
        assert_eq!(email.message_id.as_deref(), Some("18f2a"));
        assert_eq!(email.tag_display(), "Personal");
        assert_eq!(email.created_at.as_deref(), Some("2025-11-02T09:30:00+00:00"));
    }

    #[test]
    fn test_parse_summaries_null_or_missing_field_is_empty() {
        assert!(ApiClient::parse_summaries(r#"{ "emails": null }"#).is_empty());
        assert!(ApiClient::parse_summaries(r#"{}"#).is_empty());
    }

    #[test]
    fn test_parse_summaries_malformed_body_is_empty() {
        assert!(ApiClient::parse_summaries("not json at all").is_empty());
        assert!(ApiClient::parse_summaries(r#""just a string""#).is_empty());
        assert!(ApiClient::parse_summaries(r#"{ "emails": "nope" }"#).is_empty());
    }

    #[test]
    fn test_parse_summaries_preserves_server_order() {
        let json = r#"{ "emails": [{ "id": 2 }, { "id": 1 }, { "id": 2 }] }"#;
        let summaries = ApiClient::parse_summaries(json);
        // Order as returned, duplicates untouched
        let ids: Vec<_> = summaries.iter().map(|e| e.id_display()).collect();
        assert_eq!(ids, vec!["2", "1", "2"]);
    }

    #[test]
    fn test_bearer_header_attached_iff_token_present() {
        let mut api = ApiClient::new("http://localhost:8000".to_string())
            .expect("client should build");
        assert!(!api.has_auth_header());

        api.set_token("abc123".to_string());
        assert!(api.has_auth_header());
        let headers = api.auth_headers().expect("headers should build");
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );

        api.clear_token();
        assert!(!api.has_auth_header());
    }

    #[test]
    fn test_auth_url() {
        let api = ApiClient::new("http://localhost:8000".to_string())
            .expect("client should build");
        assert_eq!(api.auth_url(), "http://localhost:8000/auth/google");
    }
}
