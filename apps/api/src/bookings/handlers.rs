//! Axum route handlers for public booking submission and admin moderation.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AdminGuard;
use crate::bookings::lifecycle::{Partition, Transition};
use crate::bookings::service;
use crate::bookings::store::Page;
use crate::bookings::validation::BookingForm;
use crate::errors::AppError;
use crate::extract::{JsonBody, Path, Query};
use crate::models::booking::{BookingView, PartitionCounts};
use crate::routes::ConfirmQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SubmitBookingResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsQuery {
    #[serde(default)]
    pub partition: Partition,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EmptyBinResponse {
    pub removed: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Public
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/bookings
pub async fn handle_submit_booking(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<BookingForm>,
) -> Result<(StatusCode, Json<SubmitBookingResponse>), AppError> {
    let booking = service::submit(state.bookings.as_ref(), form).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitBookingResponse {
            id: booking.id,
            created_at: booking.created_at,
        }),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Admin inbox
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/admin/bookings
pub async fn handle_list_bookings(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(params): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let page = Page::new(params.limit, params.offset);
    let bookings = service::list(state.bookings.as_ref(), params.partition, page).await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}

/// GET /api/v1/admin/bookings/counts
pub async fn handle_booking_counts(
    _admin: AdminGuard,
    State(state): State<AppState>,
) -> Result<Json<PartitionCounts>, AppError> {
    Ok(Json(service::counts(state.bookings.as_ref()).await?))
}

/// GET /api/v1/admin/bookings/:id
pub async fn handle_get_booking(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    let booking = service::get(state.bookings.as_ref(), id).await?;
    Ok(Json(booking.into()))
}

async fn transition(
    state: &AppState,
    id: Uuid,
    transition: Transition,
) -> Result<Json<BookingView>, AppError> {
    let booking = service::apply(state.bookings.as_ref(), id, transition).await?;
    Ok(Json(booking.into()))
}

/// POST /api/v1/admin/bookings/:id/read
pub async fn handle_mark_read(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    transition(&state, id, Transition::MarkRead).await
}

/// POST /api/v1/admin/bookings/:id/archive
pub async fn handle_archive(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    transition(&state, id, Transition::Archive).await
}

/// POST /api/v1/admin/bookings/:id/unarchive
pub async fn handle_unarchive(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    transition(&state, id, Transition::Unarchive).await
}

/// POST /api/v1/admin/bookings/:id/delete
pub async fn handle_soft_delete(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    transition(&state, id, Transition::SoftDelete).await
}

/// POST /api/v1/admin/bookings/:id/restore
pub async fn handle_restore(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    transition(&state, id, Transition::Restore).await
}

// ────────────────────────────────────────────────────────────────────────────
// Recycle bin
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/admin/recycle-bin
pub async fn handle_recycle_bin(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let page = Page::new(params.limit, params.offset);
    let bookings = service::list(state.bookings.as_ref(), Partition::Deleted, page).await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}

/// DELETE /api/v1/admin/recycle-bin/:id?confirm=true
pub async fn handle_purge_booking(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<StatusCode, AppError> {
    confirm.require("permanently delete this booking")?;
    service::hard_delete(state.bookings.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/recycle-bin?confirm=true
pub async fn handle_empty_recycle_bin(
    _admin: AdminGuard,
    State(state): State<AppState>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<Json<EmptyBinResponse>, AppError> {
    confirm.require("permanently delete all bookings in the recycle bin")?;
    let removed = service::empty_recycle_bin(state.bookings.as_ref()).await?;
    Ok(Json(EmptyBinResponse { removed }))
}
