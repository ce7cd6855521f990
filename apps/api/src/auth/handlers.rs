//! Axum route handlers for the admin session.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::models::admin::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    /// Bare username or full email address.
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSession> for SessionResponse {
    fn from(s: AdminSession) -> Self {
        Self {
            token: s.token,
            email: s.email,
            expires_at: s.expires_at,
        }
    }
}

/// POST /api/v1/admin/session
pub async fn handle_sign_in(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }
    let session = state.sessions.sign_in(&req.username, &req.password).await?;
    Ok(Json(session.into()))
}

/// GET /api/v1/admin/session
pub async fn handle_current_session(
    AdminGuard(session): AdminGuard,
) -> Json<CurrentSessionResponse> {
    Json(CurrentSessionResponse {
        email: session.email,
        expires_at: session.expires_at,
    })
}

/// DELETE /api/v1/admin/session
pub async fn handle_sign_out(
    AdminGuard(session): AdminGuard,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.sessions.sign_out(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
