use akira_anilist::AniListError;
use akira_core::error::CoreError;
use akira_scraper::ScraperError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message returned for every 500. Details are logged only.
const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, the external client errors, and
/// adds HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent `{error, code}` JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `akira_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// AniList lookup failed.
    #[error(transparent)]
    AniList(#[from] AniListError),

    /// The scraping webhook failed or is not configured.
    #[error(transparent)]
    Scraper(#[from] ScraperError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

// --- Extractor rejections ---
//
// Malformed bodies, path segments and query strings are client errors with
// axum's message as the `error` text.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => internal("Internal core error", msg),
            },

            // --- Database errors ---
            AppError::Database(err) => internal("Database error", err),

            // --- Upstream clients ---
            AppError::AniList(AniListError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                AniListError::NotFound.to_string(),
            ),
            AppError::AniList(err) => upstream("AniList", err),
            AppError::Scraper(ScraperError::NotConfigured) => (
                StatusCode::BAD_REQUEST,
                "SCRAPER_NOT_CONFIGURED",
                ScraperError::NotConfigured.to_string(),
            ),
            AppError::Scraper(err @ ScraperError::InvalidUrl(_)) => {
                internal("Scraper misconfigured", err)
            }
            AppError::Scraper(err) => upstream("Scraper", err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal("Internal error", msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(
    context: &str,
    detail: &dyn std::fmt::Display,
) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn upstream(service: &str, err: &dyn std::fmt::Display) -> (StatusCode, &'static str, String) {
    tracing::warn!(service, error = %err, "Upstream request failed");
    (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
}
