use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error taxonomy for the whole request-handling surface.
///
/// Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl below
/// is the single place where errors become HTTP statuses and JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller supplied invalid input (missing title, blank text).
    #[error("{0}")]
    Validation(String),

    /// Referenced note does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A required credential is absent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream completion API answered with a non-success status.
    #[error("upstream API error {status}: {detail}")]
    Upstream { status: StatusCode, detail: String },

    /// The request to the upstream completion API never completed.
    #[error("upstream request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    /// Underlying persistence failure.
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Append the failure detail outside release builds only.
fn with_detail(message: &str, detail: &str) -> String {
    if cfg!(debug_assertions) && !detail.is_empty() {
        format!("{message}: {detail}")
    } else {
        message.to_string()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Configuration(msg) => {
                tracing::error!("configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    with_detail("Summarization is not configured", msg),
                )
            }
            Self::Upstream { status, detail } => {
                tracing::error!("upstream API error {status}: {detail}");
                match *status {
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        (StatusCode::UNAUTHORIZED, "Invalid API key".to_string())
                    }
                    StatusCode::TOO_MANY_REQUESTS => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "Rate limit exceeded, please try again later".to_string(),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        with_detail("Failed to generate summary", detail),
                    ),
                }
            }
            Self::UpstreamTransport(e) => {
                tracing::error!("upstream request failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    with_detail("Failed to generate summary", &e.to_string()),
                )
            }
            Self::Store(e) => {
                tracing::error!("database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    with_detail("Database error", &e.to_string()),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
