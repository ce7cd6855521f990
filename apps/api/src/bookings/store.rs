//! Booking persistence: the `BookingStore` seam and its PostgreSQL backend.
//!
//! `AppState` holds an `Arc<dyn BookingStore>`. The store only persists state
//! computed by `bookings::lifecycle`; it never decides transitions itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::bookings::lifecycle::{BookingStatus, Partition};
use crate::errors::StoreError;
use crate::models::booking::{Booking, BookingRow, NewBooking, PartitionCounts};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;

/// Limit/offset window over a partition listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, StoreError>;

    /// Bookings in `partition`. Live partitions are newest-first by
    /// `created_at`; the deleted partition is newest-first by `deleted_at`.
    async fn list(&self, partition: Partition, page: Page) -> Result<Vec<Booking>, StoreError>;

    async fn counts(&self) -> Result<PartitionCounts, StoreError>;

    /// Persists `status` for `id`, stamping `updated_at`. `None` when no such booking.
    async fn save_status(
        &self,
        id: Uuid,
        status: &BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, StoreError>;

    /// Permanently removes `id` if it is in the recycle bin.
    async fn purge(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Permanently removes every booking in the recycle bin.
    async fn purge_all(&self) -> Result<u64, StoreError>;
}

fn partition_filter(partition: Partition) -> &'static str {
    match partition {
        Partition::New => "is_deleted = FALSE AND is_read = FALSE AND is_archived = FALSE",
        Partition::Read => "is_deleted = FALSE AND is_read = TRUE AND is_archived = FALSE",
        Partition::Archived => "is_deleted = FALSE AND is_archived = TRUE",
        Partition::Deleted => "is_deleted = TRUE",
    }
}

fn partition_order(partition: Partition) -> &'static str {
    match partition {
        Partition::Deleted => "deleted_at DESC, id",
        _ => "created_at DESC, id",
    }
}

pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let row: BookingRow = sqlx::query_as(
            r#"
            INSERT INTO bookings
                (id, name, email, mobile, address, service_type, preferred_contact, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.mobile)
        .bind(&booking.address)
        .bind(booking.service_type.label())
        .bind(booking.preferred_contact.as_str())
        .bind(&booking.notes)
        .fetch_one(&self.pool)
        .await?;

        Booking::try_from(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        let row: Option<BookingRow> = sqlx::query_as("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn list(&self, partition: Partition, page: Page) -> Result<Vec<Booking>, StoreError> {
        let sql = format!(
            "SELECT * FROM bookings WHERE {} ORDER BY {} LIMIT $1 OFFSET $2",
            partition_filter(partition),
            partition_order(partition),
        );
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        debug!(
            partition = partition.as_str(),
            rows = rows.len(),
            "Listed bookings"
        );
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn counts(&self) -> Result<PartitionCounts, StoreError> {
        Ok(sqlx::query_as::<_, PartitionCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE NOT is_deleted AND NOT is_read AND NOT is_archived) AS "new",
                COUNT(*) FILTER (WHERE NOT is_deleted AND is_read AND NOT is_archived) AS "read",
                COUNT(*) FILTER (WHERE NOT is_deleted AND is_archived) AS "archived",
                COUNT(*) FILTER (WHERE is_deleted) AS "deleted"
            FROM bookings
            "#,
        )
        .fetch_one(&self.pool)
        .await?)
    }

    async fn save_status(
        &self,
        id: Uuid,
        status: &BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, StoreError> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
            UPDATE bookings
            SET is_read = $2, is_archived = $3, is_deleted = $4, deleted_at = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.inbox.is_read())
        .bind(status.inbox.is_archived())
        .bind(status.is_deleted())
        .bind(status.lifecycle.deleted_at())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn purge(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND is_deleted = TRUE")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM bookings WHERE is_deleted = TRUE")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
