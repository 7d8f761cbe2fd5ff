//! POST /api/check — submission normalization and analysis relay

use crate::api::{is_multipart, ApiError, ApiResult};
use crate::upload::SpooledUpload;
use crate::AppState;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::Json;
use serde::Deserialize;
use simcheck_common::report::AnalysisReport;
use tracing::info;

const NO_INPUT: &str = "No text or file provided.";

/// JSON request body for the inline-text mode
#[derive(Debug, Deserialize)]
struct CheckTextRequest {
    #[serde(default)]
    text: Option<String>,
}

/// One normalized submission. Exactly one variant per inbound request,
/// decided once at the boundary; downstream code never re-inspects the
/// request.
#[derive(Debug)]
pub(crate) enum Submission {
    File(SpooledUpload),
    Text(String),
}

/// POST /api/check
///
/// Normalizes the inbound request, relays it to the analysis engine, and
/// returns the engine's report verbatim. The spooled upload (if any) is
/// released on every exit path; `SpooledUpload`'s Drop covers the paths
/// the explicit release below does not reach.
pub async fn check(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<AnalysisReport>> {
    let submission = normalize(&state, req).await?;

    let result = match &submission {
        Submission::File(upload) => {
            info!(filename = upload.filename(), "Relaying file submission to analysis engine");
            state.engine.analyze_file(upload).await
        }
        Submission::Text(text) => {
            info!(chars = text.len(), "Relaying text submission to analysis engine");
            state.engine.analyze_text(text).await
        }
    };

    if let Submission::File(upload) = submission {
        upload.release();
    }

    let report = result.map_err(ApiError::analysis)?;
    Ok(Json(report))
}

/// Inspect the inbound request and produce one canonical submission.
///
/// A multipart `file` part wins over any accompanying text. Inline text
/// must be non-empty after trimming; the raw untrimmed text is what gets
/// forwarded to the engine.
async fn normalize(state: &AppState, req: Request) -> ApiResult<Submission> {
    if is_multipart(&req) {
        return normalize_multipart(state, req).await;
    }

    // JSON (or anything else): inline-text mode. An unreadable body simply
    // has no text to offer.
    match Json::<CheckTextRequest>::from_request(req, &()).await {
        Ok(Json(CheckTextRequest { text: Some(text) })) if !text.trim().is_empty() => {
            Ok(Submission::Text(text))
        }
        _ => Err(ApiError::NoInput(NO_INPUT)),
    }
}

async fn normalize_multipart(state: &AppState, req: Request) -> ApiResult<Submission> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ApiError::Analysis {
            details: format!("multipart decode failed: {e}"),
        })?;

    let mut file: Option<SpooledUpload> = None;
    let mut text: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(relay_err)? {
        match field.name() {
            Some("file") if file.is_none() => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload".to_string());
                let bytes = field.bytes().await.map_err(relay_err)?;
                let upload = SpooledUpload::spool(&state.uploads_dir, &filename, &bytes)
                    .await
                    .map_err(|e| ApiError::Analysis {
                        details: format!("failed to spool upload: {e}"),
                    })?;
                file = Some(upload);
            }
            Some("text") => {
                text = Some(field.text().await.map_err(relay_err)?);
            }
            _ => {}
        }
    }

    // File takes precedence regardless of any accompanying text.
    if let Some(upload) = file {
        return Ok(Submission::File(upload));
    }

    match text {
        Some(text) if !text.trim().is_empty() => Ok(Submission::Text(text)),
        _ => Err(ApiError::NoInput(NO_INPUT)),
    }
}

fn relay_err(e: impl std::fmt::Display) -> ApiError {
    ApiError::Analysis {
        details: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineClient;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;

    const BOUNDARY: &str = "X-SIMCHECK-TEST-BOUNDARY";

    fn test_state(uploads_dir: &std::path::Path) -> AppState {
        AppState::new(
            EngineClient::new("http://127.0.0.1:1"),
            uploads_dir.to_path_buf(),
        )
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/api/check")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/check")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_text_is_forwarded_raw() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let submission = normalize(&state, json_request(r#"{"text": "  padded  "}"#))
            .await
            .unwrap();

        // Presence check trims; the payload does not.
        match submission {
            Submission::Text(text) => assert_eq!(text, "  padded  "),
            Submission::File(_) => panic!("expected text submission"),
        }
    }

    #[tokio::test]
    async fn test_json_blank_text_is_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = normalize(&state, json_request(r#"{"text": "   "}"#))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NoInput(_)));
    }

    #[tokio::test]
    async fn test_json_malformed_body_is_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = normalize(&state, json_request("{not json"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NoInput(_)));
    }

    #[tokio::test]
    async fn test_multipart_file_wins_over_text() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let submission = normalize(
            &state,
            multipart_request(&[
                ("text", None, "inline text that must be ignored"),
                ("file", Some("essay.txt"), "file body"),
            ]),
        )
        .await
        .unwrap();

        match submission {
            Submission::File(upload) => {
                assert_eq!(upload.filename(), "essay.txt");
                assert_eq!(std::fs::read(upload.path()).unwrap(), b"file body");
            }
            Submission::Text(_) => panic!("file must take precedence over text"),
        }
    }

    #[tokio::test]
    async fn test_multipart_text_only() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let submission = normalize(
            &state,
            multipart_request(&[("text", None, "just a form field")]),
        )
        .await
        .unwrap();

        match submission {
            Submission::Text(text) => assert_eq!(text, "just a form field"),
            Submission::File(_) => panic!("expected text submission"),
        }
    }

    #[tokio::test]
    async fn test_multipart_without_inputs_is_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = normalize(&state, multipart_request(&[("other", None, "noise")]))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NoInput(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
