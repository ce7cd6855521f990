pub mod handlers;
pub mod password;
pub mod provider;
pub mod session;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use thiserror::Error;

use crate::errors::AppError;
use crate::models::admin::AdminSession;
use crate::state::AppState;

pub use provider::{AuthProvider, PgAuthProvider};
pub use session::SessionGate;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("{0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Extracts the bearer token from an `Authorization` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Admin-only extractor. Rejects with `LOGIN_REQUIRED` unless the request
/// carries a bearer token for a live session.
#[derive(Debug, Clone)]
pub struct AdminGuard(pub AdminSession);

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::LoginRequired)?;

        match state.sessions.current(token).await? {
            Some(session) => Ok(AdminGuard(session)),
            None => Err(AppError::LoginRequired),
        }
    }
}
