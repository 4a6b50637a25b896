//! Resume Extractor — plain text from an uploaded PDF.
//!
//! Each upload is written to its own temporary file, so concurrent requests
//! never see each other's resumes. The file is removed when extraction ends,
//! whether it succeeded, failed, or the PDF parser panicked.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parse error: {0}")]
    Parse(String),

    #[error("PDF parser panicked")]
    Panicked,
}

impl From<pdf_extract::OutputError> for ExtractError {
    fn from(e: pdf_extract::OutputError) -> Self {
        ExtractError::Parse(e.to_string())
    }
}

/// Reads every page of the PDF at `path` in page order, joined by single spaces.
pub fn extract_resume_text(path: &Path) -> Result<String, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }
    let pages = pdf_extract::extract_text_by_pages(path)?;
    debug!("Extracted {} page(s) from {}", pages.len(), path.display());
    Ok(pages.join(" "))
}

/// Persists `upload` to a fresh temp file and extracts it on the blocking pool.
pub async fn extract_resume_bytes(upload: Bytes) -> Result<String, ExtractError> {
    extract_upload_with(upload, extract_resume_text).await
}

/// Writes `upload` to a temp file and runs `extractor` on it in `spawn_blocking`.
/// A panic inside `extractor` surfaces as `ExtractError::Panicked`.
async fn extract_upload_with<F>(upload: Bytes, extractor: F) -> Result<String, ExtractError>
where
    F: FnOnce(&Path) -> Result<String, ExtractError> + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || -> Result<String, ExtractError> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(&upload)?;
        file.flush()?;
        extractor(file.path())
        // `file` drops here and the temp file is deleted
    })
    .await;

    match joined {
        Ok(result) => result,
        Err(e) if e.is_panic() => {
            warn!("PDF extraction panicked");
            Err(ExtractError::Panicked)
        }
        Err(e) => Err(ExtractError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))),
    }
}
