//! POST /api/add-document — corpus ingestion relay
//!
//! A narrower one-shot version of the analysis relay: multipart only, file
//! required, engine body relayed verbatim.

use crate::api::{is_multipart, ApiError, ApiResult};
use crate::upload::SpooledUpload;
use crate::AppState;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::Json;
use simcheck_common::report::CorpusAddResult;
use tracing::info;

const NO_FILE: &str = "No file uploaded.";

/// POST /api/add-document
pub async fn add_document(
    State(state): State<AppState>,
    req: Request,
) -> ApiResult<Json<CorpusAddResult>> {
    if !is_multipart(&req) {
        return Err(ApiError::NoInput(NO_FILE));
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ApiError::Ingest {
            details: format!("multipart decode failed: {e}"),
        })?;

    let mut upload: Option<SpooledUpload> = None;
    while let Some(field) = multipart.next_field().await.map_err(ingest_err)? {
        if field.name() == Some("file") && upload.is_none() {
            let filename = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "upload".to_string());
            let bytes = field.bytes().await.map_err(ingest_err)?;
            let spooled = SpooledUpload::spool(&state.uploads_dir, &filename, &bytes)
                .await
                .map_err(|e| ApiError::Ingest {
                    details: format!("failed to spool upload: {e}"),
                })?;
            upload = Some(spooled);
        }
    }

    let Some(upload) = upload else {
        return Err(ApiError::NoInput(NO_FILE));
    };

    info!(filename = upload.filename(), "Relaying corpus document to analysis engine");

    let result = state.engine.add_document(&upload).await;
    upload.release();

    let added = result.map_err(ApiError::ingest)?;
    Ok(Json(added))
}

fn ingest_err(e: impl std::fmt::Display) -> ApiError {
    ApiError::Ingest {
        details: e.to_string(),
    }
}
