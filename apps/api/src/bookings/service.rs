use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::bookings::lifecycle::{Partition, Transition};
use crate::bookings::store::{BookingStore, Page};
use crate::bookings::validation::{describe_issues, validate_booking, BookingForm};
use crate::errors::AppError;
use crate::models::booking::{Booking, PartitionCounts};

/// Validates and stores a public booking. Persistence failures surface as a
/// generic retry prompt.
pub async fn submit(store: &dyn BookingStore, form: BookingForm) -> Result<Booking, AppError> {
    let new = validate_booking(form).map_err(|issues| AppError::Validation(describe_issues(&issues)))?;
    let booking = store.insert(new).await.map_err(AppError::SubmissionFailed)?;
    info!(
        booking_id = %booking.id,
        service_type = booking.service_type.label(),
        "Booking submitted"
    );
    Ok(booking)
}

pub async fn list(
    store: &dyn BookingStore,
    partition: Partition,
    page: Page,
) -> Result<Vec<Booking>, AppError> {
    let what = match partition {
        Partition::Deleted => "deleted bookings",
        _ => "bookings",
    };
    store.list(partition, page).await.map_err(AppError::fetch(what))
}

pub async fn counts(store: &dyn BookingStore) -> Result<PartitionCounts, AppError> {
    store.counts().await.map_err(AppError::fetch("booking counts"))
}

pub async fn get(store: &dyn BookingStore, id: Uuid) -> Result<Booking, AppError> {
    store
        .get(id)
        .await
        .map_err(AppError::fetch("booking"))?
        .ok_or_else(|| not_found(id))
}

/// Loads the booking, applies `transition` and persists the result.
/// Read-modify-write without locking: concurrent admins race, last write wins.
pub async fn apply(
    store: &dyn BookingStore,
    id: Uuid,
    transition: Transition,
) -> Result<Booking, AppError> {
    let current = get(store, id).await?;
    let now = Utc::now();
    let next = current.status.apply(transition, now)?;
    let saved = store
        .save_status(id, &next, now)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!(
        booking_id = %id,
        action = transition.as_str(),
        from = current.status.partition().as_str(),
        to = saved.status.partition().as_str(),
        "Booking updated"
    );
    Ok(saved)
}

/// Permanently removes one booking from the recycle bin.
pub async fn hard_delete(store: &dyn BookingStore, id: Uuid) -> Result<(), AppError> {
    if store.purge(id).await? {
        info!(booking_id = %id, "Booking permanently deleted");
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "Booking {id} not found in recycle bin"
        )))
    }
}

/// Permanently removes every booking in the recycle bin.
pub async fn empty_recycle_bin(store: &dyn BookingStore) -> Result<u64, AppError> {
    let removed = store.purge_all().await?;
    info!(removed, "Recycle bin emptied");
    Ok(removed)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Booking {id} not found"))
}
