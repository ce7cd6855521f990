use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::content::{NewProject, NewTestimonial, Project, Testimonial};

/// Category value meaning "no filter" on the projects page.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

impl ProjectFilter {
    /// Category to match on, with "All" and blank treated as absent.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestimonialFilter {
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Sample rows inserted and marker written.
    Seeded { projects: usize, testimonials: usize },
    /// Content already present from before markers existed; only the marker was written.
    MarkedExisting,
    /// Marker already present; nothing done.
    AlreadySeeded,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Projects newest-completed first.
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError>;

    /// Testimonials newest first.
    async fn list_testimonials(
        &self,
        filter: &TestimonialFilter,
    ) -> Result<Vec<Testimonial>, StoreError>;

    /// Inserts the sample content unless `marker` is recorded, all in one
    /// transaction together with the marker itself.
    async fn seed_once(
        &self,
        marker: &str,
        projects: &[NewProject],
        testimonials: &[NewTestimonial],
    ) -> Result<SeedOutcome, StoreError>;
}

pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::boolean IS NULL OR featured = $2)
            ORDER BY completed_date DESC, created_at DESC
            LIMIT $3
            "#,
        )
        .bind(filter.category())
        .bind(filter.featured)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_testimonials(
        &self,
        filter: &TestimonialFilter,
    ) -> Result<Vec<Testimonial>, StoreError> {
        Ok(sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT * FROM testimonials
            WHERE ($1::boolean IS NULL OR featured = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(filter.featured)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn seed_once(
        &self,
        marker: &str,
        projects: &[NewProject],
        testimonials: &[NewTestimonial],
    ) -> Result<SeedOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;

        let marked: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bootstrap_markers WHERE name = $1)")
                .bind(marker)
                .fetch_one(&mut *tx)
                .await?;
        if marked {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&mut *tx)
            .await?;

        let outcome = if existing > 0 {
            SeedOutcome::MarkedExisting
        } else {
            for p in projects {
                sqlx::query(
                    r#"
                    INSERT INTO projects
                        (id, title, description, category, location, image_url, featured,
                         completed_date, challenge, solution, result)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(p.title)
                .bind(p.description)
                .bind(p.category)
                .bind(p.location)
                .bind(p.image_url)
                .bind(p.featured)
                .bind(p.completed_date)
                .bind(p.challenge)
                .bind(p.solution)
                .bind(p.result)
                .execute(&mut *tx)
                .await?;
            }
            for t in testimonials {
                sqlx::query(
                    r#"
                    INSERT INTO testimonials
                        (id, client_name, location, project_type, quote, rating, featured)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(t.client_name)
                .bind(t.location)
                .bind(t.project_type)
                .bind(t.quote)
                .bind(t.rating)
                .bind(t.featured)
                .execute(&mut *tx)
                .await?;
            }
            SeedOutcome::Seeded {
                projects: projects.len(),
                testimonials: testimonials.len(),
            }
        };

        sqlx::query("INSERT INTO bootstrap_markers (name) VALUES ($1)")
            .bind(marker)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(marker, ?outcome, "Bootstrap marker recorded");
        Ok(outcome)
    }
}
