//! Axum route handler for the match endpoint.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::matching::extract::extract_resume_bytes;
use crate::matching::keywords::diff_keywords;
use crate::matching::normalize::{normalize_optional, normalize_text};
use crate::matching::similarity::cosine_similarity;
use crate::state::AppState;

pub const MISSING_INPUT: &str = "Missing resume or job description";
pub const MISSING_RESUME_FILE: &str = "Missing resume file";
pub const EXPECTED_MULTIPART: &str = "Expected a multipart/form-data request";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields pulled out of the multipart form. Unknown and repeated fields are skipped.
#[derive(Debug, Default)]
pub struct MatchForm {
    pub resume: Option<Bytes>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    /// Normalized job description text.
    pub job_description: String,
    pub match_score: f32,
    pub matched_keywords: Vec<String>,
    pub suggested_keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /match_custom
///
/// Scores an uploaded PDF resume against a free-text job description:
/// extract → normalize → validate → encode → cosine score → keyword diff.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn handle_match_custom(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected non-multipart request: {e}");
        AppError::Validation(EXPECTED_MULTIPART.to_string())
    })?;
    let form = read_match_form(&mut multipart).await?;

    let upload = form
        .resume
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_RESUME_FILE.to_string()))?;

    let resume_text = normalize_text(&extract_resume_bytes(upload).await?);
    let job_text = normalize_optional(form.job_description.as_deref());

    if resume_text.is_empty() || job_text.is_empty() {
        return Err(AppError::Validation(MISSING_INPUT.to_string()));
    }

    let (resume_embedding, job_embedding) = tokio::try_join!(
        state.encoder.encode(&resume_text),
        state.encoder.encode(&job_text)
    )?;
    if resume_embedding.len() != job_embedding.len() {
        return Err(AppError::Encoding(format!(
            "dimension mismatch: resume {} vs job {}",
            resume_embedding.len(),
            job_embedding.len()
        )));
    }

    let match_score = cosine_similarity(&resume_embedding, &job_embedding);
    let keywords = diff_keywords(&resume_text, &job_text);

    info!(
        "Match complete: score={match_score:.3}, matched={}, suggested={}",
        keywords.matched.len(),
        keywords.suggested.len()
    );

    Ok(Json(MatchResponse {
        job_description: job_text,
        match_score,
        matched_keywords: keywords.matched,
        suggested_keywords: keywords.suggested,
    }))
}

async fn read_match_form(multipart: &mut Multipart) -> Result<MatchForm, AppError> {
    let mut form = MatchForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            // Only file parts count as the resume; the first one wins.
            Some("resume") if form.resume.is_none() && field.file_name().is_some() => {
                form.resume = Some(field.bytes().await?)
            }
            Some("job_description") if form.job_description.is_none() => {
                form.job_description = Some(field.text().await?)
            }
            other => debug!("Skipping multipart field {other:?}"),
        }
    }

    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
