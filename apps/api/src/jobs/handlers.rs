//! Axum route handlers for job progress entries.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::extract::{JsonBody, Path, Query};
use crate::jobs::service;
use crate::models::job_progress::{JobProgress, JobProgressInput, PublicJobProgress};
use crate::routes::ConfirmQuery;
use crate::state::AppState;

/// GET /api/v1/job-progress
pub async fn handle_public_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicJobProgress>>, AppError> {
    Ok(Json(service::list_public(state.jobs.as_ref()).await?))
}

/// GET /api/v1/admin/jobs
pub async fn handle_list_jobs(
    _admin: AdminGuard,
    State(state): State<AppState>,
) -> Result<Json<Vec<JobProgress>>, AppError> {
    Ok(Json(service::list_all(state.jobs.as_ref()).await?))
}

/// POST /api/v1/admin/jobs
pub async fn handle_create_job(
    _admin: AdminGuard,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<JobProgressInput>,
) -> Result<(StatusCode, Json<JobProgress>), AppError> {
    let job = service::create(state.jobs.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/v1/admin/jobs/:id
pub async fn handle_update_job(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(input): JsonBody<JobProgressInput>,
) -> Result<Json<JobProgress>, AppError> {
    Ok(Json(service::update(state.jobs.as_ref(), id, input).await?))
}

/// POST /api/v1/admin/jobs/:id/toggle
pub async fn handle_toggle_job(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobProgress>, AppError> {
    Ok(Json(service::toggle_enabled(state.jobs.as_ref(), id).await?))
}

/// DELETE /api/v1/admin/jobs/:id?confirm=true
pub async fn handle_delete_job(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<StatusCode, AppError> {
    confirm.require("delete this job")?;
    service::delete(state.jobs.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
