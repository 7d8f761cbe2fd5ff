//! Transient upload spooling
//!
//! An uploaded payload is written to the uploads directory so it can be
//! streamed to the analysis engine, then removed before the request handler
//! returns. The handle is owned by exactly one in-flight request.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Ownership handle over one spooled upload.
///
/// The backing file exists for the lifetime of the handle. `release()`
/// removes it on the orderly path; `Drop` covers every other exit (engine
/// error, validation failure, early return), so a request can never leak a
/// spool file. Removal failures are logged and never propagated.
#[derive(Debug)]
pub struct SpooledUpload {
    path: PathBuf,
    filename: String,
    released: bool,
}

impl SpooledUpload {
    /// Write `bytes` to a fresh spool file under `dir`.
    pub async fn spool(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<Self> {
        let path = dir.join(format!("upload_{}", Uuid::new_v4()));
        tokio::fs::write(&path, bytes).await?;

        debug!(
            file = %path.display(),
            bytes = bytes.len(),
            filename = filename,
            "Spooled upload"
        );

        Ok(Self {
            path,
            filename: filename.to_string(),
            released: false,
        })
    }

    /// Path of the spool file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Client-declared filename, forwarded to the engine.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Remove the spool file. Failures are logged, not returned.
    pub fn release(mut self) {
        self.remove_file();
    }

    fn remove_file(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(
                file = %self.path.display(),
                error = %e,
                "Failed to remove spooled upload"
            );
        } else {
            debug!(file = %self.path.display(), "Removed spooled upload");
        }
    }
}

impl Drop for SpooledUpload {
    fn drop(&mut self) {
        self.remove_file();
    }
}
