use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::job_progress::{JobProgress, JobProgressInput};

/// Job progress persistence. No version column: concurrent edits are last
/// writer wins. Listings are ordered by `display_order`, ties by creation.
#[async_trait]
pub trait JobProgressStore: Send + Sync {
    async fn create(
        &self,
        input: &JobProgressInput,
        now: DateTime<Utc>,
    ) -> Result<JobProgress, StoreError>;

    async fn update(
        &self,
        id: Uuid,
        input: &JobProgressInput,
        now: DateTime<Utc>,
    ) -> Result<Option<JobProgress>, StoreError>;

    async fn toggle_enabled(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<JobProgress>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn list_all(&self) -> Result<Vec<JobProgress>, StoreError>;

    async fn list_enabled(&self) -> Result<Vec<JobProgress>, StoreError>;
}

pub struct PgJobProgressStore {
    pool: PgPool,
}

impl PgJobProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobProgressStore for PgJobProgressStore {
    async fn create(
        &self,
        input: &JobProgressInput,
        now: DateTime<Utc>,
    ) -> Result<JobProgress, StoreError> {
        Ok(sqlx::query_as::<_, JobProgress>(
            r#"
            INSERT INTO job_progress
                (id, job_name, customer_info, progress_percentage, description,
                 display_order, is_enabled, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.job_name)
        .bind(&input.customer_info)
        .bind(input.progress_percentage)
        .bind(&input.description)
        .bind(input.display_order)
        .bind(input.is_enabled)
        .bind(now)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update(
        &self,
        id: Uuid,
        input: &JobProgressInput,
        now: DateTime<Utc>,
    ) -> Result<Option<JobProgress>, StoreError> {
        Ok(sqlx::query_as::<_, JobProgress>(
            r#"
            UPDATE job_progress
            SET job_name = $2, customer_info = $3, progress_percentage = $4,
                description = $5, display_order = $6, is_enabled = $7, last_updated = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.job_name)
        .bind(&input.customer_info)
        .bind(input.progress_percentage)
        .bind(&input.description)
        .bind(input.display_order)
        .bind(input.is_enabled)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn toggle_enabled(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<JobProgress>, StoreError> {
        Ok(sqlx::query_as::<_, JobProgress>(
            r#"
            UPDATE job_progress
            SET is_enabled = NOT is_enabled, last_updated = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_progress WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<JobProgress>, StoreError> {
        Ok(sqlx::query_as::<_, JobProgress>(
            "SELECT * FROM job_progress ORDER BY display_order ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_enabled(&self) -> Result<Vec<JobProgress>, StoreError> {
        Ok(sqlx::query_as::<_, JobProgress>(
            r#"
            SELECT * FROM job_progress
            WHERE is_enabled = TRUE
            ORDER BY display_order ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}
