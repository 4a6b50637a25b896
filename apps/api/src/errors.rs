use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::matching::extract::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Internal detail is logged, never sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Multipart(e) => {
                tracing::warn!("Multipart error: {e}");
                let status = e.status();
                let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "Upload too large"
                } else {
                    "Malformed multipart request"
                };
                (status, message.to_string())
            }
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Could not read text from the uploaded PDF".to_string(),
                )
            }
            AppError::Encoding(msg) => {
                tracing::error!("Encoding error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to encode text".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_message() {
        let response =
            AppError::Validation("Missing resume or job description".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Missing resume or job description"})
        );
    }

    #[tokio::test]
    async fn test_extraction_maps_to_422_without_leaking_detail() {
        let err = ExtractError::Parse("xref table at offset 1234 is broken".to_string());
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().contains("xref"));
    }

    #[tokio::test]
    async fn test_parser_panic_maps_to_422() {
        let response = AppError::from(ExtractError::Panicked).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Could not read text from the uploaded PDF"})
        );
    }

    #[tokio::test]
    async fn test_encoding_maps_to_500_generic_message() {
        let response = AppError::Encoding("onnx session exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Failed to encode text"})
        );
    }

    #[tokio::test]
    async fn test_internal_maps_to_500_generic_message() {
        let response = AppError::Internal(anyhow::anyhow!("secret path /srv/x")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "An internal server error occurred");
    }
}
