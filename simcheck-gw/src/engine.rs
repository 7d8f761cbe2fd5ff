//! Analysis engine client
//!
//! Relays canonical submissions to the external analysis engine over HTTP
//! and maps engine success/failure into the gateway's own contract. One
//! suspending call per request; no retry, no backoff.

use crate::upload::SpooledUpload;
use reqwest::multipart;
use simcheck_common::report::{AnalysisReport, CorpusAddResult};
use std::time::Duration;
use thiserror::Error;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Default timeout for engine requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Engine client errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("engine request failed: {0}")]
    Network(String),

    /// Engine answered with a non-2xx status
    #[error("engine returned error: {0}")]
    Api(String),

    /// Engine answered 2xx but the body did not match the expected shape
    #[error("failed to parse engine response: {0}")]
    Parse(String),
}

impl EngineError {
    /// Diagnostic payload to surface alongside the gateway's 500 response:
    /// the engine's own error message when it sent one, otherwise the
    /// transport or parse failure description.
    pub fn diagnostic(&self) -> String {
        match self {
            EngineError::Network(s) | EngineError::Api(s) | EngineError::Parse(s) => s.clone(),
        }
    }
}

/// HTTP client for the external analysis engine.
///
/// The endpoint is configured once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    base_url: String,
}

impl EngineClient {
    /// Create a client for the engine at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST {engine}/analyze with a multipart `file` part streamed from the
    /// spooled upload, carrying the client's original filename.
    pub async fn analyze_file(&self, upload: &SpooledUpload) -> Result<AnalysisReport, EngineError> {
        debug!(filename = upload.filename(), "Sending file to engine /analyze");

        let form = file_form(upload).await?;
        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        read_json(response).await
    }

    /// POST {engine}/analyze with a JSON `{"text": ...}` body. The text is
    /// forwarded exactly as received, untrimmed.
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisReport, EngineError> {
        debug!(chars = text.len(), "Sending text to engine /analyze");

        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        read_json(response).await
    }

    /// POST {engine}/add-document with a multipart `file` part.
    pub async fn add_document(&self, upload: &SpooledUpload) -> Result<CorpusAddResult, EngineError> {
        debug!(filename = upload.filename(), "Sending file to engine /add-document");

        let form = file_form(upload).await?;
        let response = self
            .http
            .post(format!("{}/add-document", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        read_json(response).await
    }
}

/// Build a multipart form streaming the spool file as the `file` field.
async fn file_form(upload: &SpooledUpload) -> Result<multipart::Form, EngineError> {
    let file = tokio::fs::File::open(upload.path())
        .await
        .map_err(|e| EngineError::Network(format!("failed to open spooled upload: {e}")))?;

    let part = multipart::Part::stream(reqwest::Body::wrap_stream(ReaderStream::new(file)))
        .file_name(upload.filename().to_string());

    Ok(multipart::Form::new().part("file", part))
}

/// Check status, then parse the expected body shape.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, EngineError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EngineError::Api(error_payload(status, &body)));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| EngineError::Parse(e.to_string()))
}

/// Prefer the engine's own `{error}` payload; fall back to the raw body,
/// then to the status line.
fn error_payload(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }

    if body.trim().is_empty() {
        format!("engine returned status {status}")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_payload_prefers_engine_error_field() {
        let payload = error_payload(StatusCode::SERVICE_UNAVAILABLE, r#"{"error": "engine down"}"#);
        assert_eq!(payload, "engine down");
    }

    #[test]
    fn test_error_payload_falls_back_to_raw_body() {
        let payload = error_payload(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(payload, "upstream exploded");
    }

    #[test]
    fn test_error_payload_json_without_error_field_uses_raw_body() {
        let payload = error_payload(StatusCode::BAD_GATEWAY, r#"{"detail": "nope"}"#);
        assert_eq!(payload, r#"{"detail": "nope"}"#);
    }

    #[test]
    fn test_error_payload_empty_body_uses_status() {
        let payload = error_payload(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(payload.contains("503"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = EngineClient::new("http://127.0.0.1:5001/");
        assert_eq!(client.base_url, "http://127.0.0.1:5001");
    }

    #[test]
    fn test_diagnostic_carries_payload() {
        let err = EngineError::Api("engine down".to_string());
        assert_eq!(err.diagnostic(), "engine down");
        assert_eq!(err.to_string(), "engine returned error: engine down");
    }
}
