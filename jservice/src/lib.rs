//! Minimal jService trivia API client.
//!
//! This crate provides a focused client for the jService category
//! endpoint (`GET /api/category?id=N`) with:
//! - Typed category and clue payloads
//! - Uniform error reporting for transport, status and decode failures

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Public endpoint used when no base URL is configured.
pub const API_BASE: &str = "https://jservice.io/api";
const BASE_URL_ENV: &str = "TRIVIA_API_BASE";

/// Errors that can occur when using the jService client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// jService API client.
#[derive(Clone)]
pub struct JService {
    client: reqwest::Client,
    base_url: String,
}

impl JService {
    /// Create a client pointed at the public jService API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(API_BASE)
    }

    /// Create a client pointed at a custom API base, e.g. a local mirror.
    ///
    /// The base should include the `/api` path segment; a trailing slash is ignored.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("API base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Create a client from the `TRIVIA_API_BASE` environment variable,
    /// falling back to the public API.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(BASE_URL_ENV) {
            Ok(base) if !base.trim().is_empty() => Self::with_base_url(base),
            _ => Self::new(),
        }
    }

    /// The API base this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single category with all of its clues.
    pub async fn fetch_category(&self, id: u64) -> Result<CategoryPayload, Error> {
        let url = self.category_url(id);
        debug!(%url, "requesting category");

        let response = self
            .client
            .get(&url)
            .headers(Self::build_headers())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        CategoryPayload::from_json(&body)
    }

    fn category_url(&self, id: u64) -> String {
        format!("{}/category?id={id}", self.base_url)
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A category as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub id: u64,
    pub title: String,
    pub clues: Vec<CluePayload>,
}

impl CategoryPayload {
    /// Decode a category response body.
    ///
    /// Only the presence of `id`, `title` and `clues` is checked; any
    /// other fields the API sends are ignored.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))
    }
}

/// A single clue inside a category payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CluePayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,
}

impl CluePayload {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JService::new().unwrap();
        assert_eq!(client.base_url(), API_BASE);
    }

    #[test]
    fn test_client_with_base_url_trims_slash() {
        let client = JService::with_base_url("http://localhost:3000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(
            client.category_url(42),
            "http://localhost:3000/api/category?id=42"
        );
    }

    #[test]
    fn test_empty_base_url_rejected() {
        assert!(matches!(
            JService::with_base_url("/"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_category() {
        let body = r#"{
            "id": 11531,
            "title": "mixed bag",
            "clues_count": 2,
            "clues": [
                {"id": 1, "answer": "<i>Paris</i>", "question": "City of Light", "value": 200},
                {"id": 2, "answer": "a dog", "question": "Man's best friend", "value": 400}
            ]
        }"#;

        let category = CategoryPayload::from_json(body).unwrap();
        assert_eq!(category.id, 11531);
        assert_eq!(category.title, "mixed bag");
        assert_eq!(category.clues.len(), 2);
        assert_eq!(category.clues[0], CluePayload::new("City of Light", "<i>Paris</i>"));
    }

    #[test]
    fn test_null_clue_fields_become_empty() {
        let body = r#"{"id": 7, "title": "t", "clues": [{"question": null, "answer": "x"}]}"#;
        let category = CategoryPayload::from_json(body).unwrap();
        assert_eq!(category.clues[0].question, "");
        assert_eq!(category.clues[0].answer, "x");
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let body = r#"{"id": 7, "clues": []}"#;
        assert!(matches!(
            CategoryPayload::from_json(body),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        assert!(matches!(
            CategoryPayload::from_json("<html>502</html>"),
            Err(Error::Parse(_))
        ));
    }
}
