use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::bookings::lifecycle::TransitionError;

/// Where unauthenticated admin requests are sent back to.
pub const LOGIN_ROUTE: &str = "#admin-login";

/// Persistence-layer error shared by every store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row violates an invariant the domain type relies on.
    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Login required")]
    LoginRequired,

    #[error("Failed to fetch {what}")]
    FetchFailed {
        what: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Failed to submit booking")]
    SubmissionFailed(#[source] StoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(AuthError),
}

impl AppError {
    /// Wraps a read failure so the client only sees a generic banner message.
    pub fn fetch(what: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::FetchFailed { what, source }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            other => AppError::Auth(other),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        AppError::Conflict(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::ConfirmationRequired(msg) => (
                StatusCode::BAD_REQUEST,
                "CONFIRMATION_REQUIRED",
                msg.clone(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            ),
            AppError::LoginRequired => {
                let body = Json(json!({
                    "error": {
                        "code": "LOGIN_REQUIRED",
                        "message": "Authentication required",
                        "redirect": LOGIN_ROUTE
                    }
                }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            AppError::FetchFailed { what, source } => {
                tracing::error!("Failed to fetch {what}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FETCH_FAILED",
                    format!("Failed to fetch {what}"),
                )
            }
            AppError::SubmissionFailed(e) => {
                tracing::error!("Booking submission failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SUBMISSION_FAILED",
                    "Failed to submit booking. Please try again.".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Auth(e) => {
                tracing::error!("Auth error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AUTH_ERROR",
                    "An authentication error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
