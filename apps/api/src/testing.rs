//! In-memory store and provider implementations for unit and router tests.
//!
//! Orderings and filters mirror the SQL in the Pg implementations so that
//! service-level tests exercise the same observable behavior.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::auth::{AuthError, AuthProvider, SessionGate};
use crate::bookings::lifecycle::{BookingStatus, Partition};
use crate::bookings::store::{BookingStore, Page};
use crate::bookings::validation::BookingForm;
use crate::config::Config;
use crate::content::store::{ContentStore, ProjectFilter, SeedOutcome, TestimonialFilter};
use crate::errors::StoreError;
use crate::jobs::store::JobProgressStore;
use crate::models::admin::{AdminSession, AdminUser};
use crate::models::booking::{Booking, NewBooking, PartitionCounts};
use crate::models::content::{NewProject, NewTestimonial, Project, Testimonial};
use crate::models::job_progress::{JobProgress, JobProgressInput};
use crate::state::AppState;

pub const ADMIN_USERNAME: &str = "BigPezza";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const EMAIL_DOMAIN: &str = "evasonbuilding.com";

pub fn jane_doe_form() -> BookingForm {
    BookingForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        mobile: "07700 900123".to_string(),
        address: "12 High Street, Hitchin".to_string(),
        service_type: "Kitchen Renovation".to_string(),
        preferred_contact: Some("email".to_string()),
        notes: Some("Looking to start in spring".to_string()),
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/evason_test".to_string(),
        port: 0,
        rust_log: "info".to_string(),
        admin_email_domain: EMAIL_DOMAIN.to_string(),
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        session_ttl_hours: 12,
        seed_sample_content: true,
    }
}

/// App state over empty in-memory stores with the admin account provisioned.
pub async fn test_state() -> AppState {
    let provider = Arc::new(MemoryAuthProvider::default());
    let email = crate::auth::session::qualify_identifier(ADMIN_USERNAME, EMAIL_DOMAIN);
    provider
        .sign_up(&email, ADMIN_PASSWORD)
        .await
        .expect("provision test admin");
    AppState {
        bookings: Arc::new(MemoryBookingStore::default()),
        jobs: Arc::new(MemoryJobProgressStore::default()),
        content: Arc::new(MemoryContentStore::default()),
        sessions: SessionGate::new(provider, EMAIL_DOMAIN, Duration::hours(1)),
    }
}

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

// ────────────────────────────────────────────────────────────────────────────
// Bookings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryBookingStore {
    rows: Mutex<Vec<Booking>>,
    fail: bool,
}

impl MemoryBookingStore {
    /// A store whose every call fails as if the database were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        self.check()?;
        let booking = Booking::from_new(Uuid::new_v4(), booking, Utc::now());
        self.rows.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, partition: Partition, page: Page) -> Result<Vec<Booking>, StoreError> {
        self.check()?;
        let mut out: Vec<Booking> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| partition.contains(&b.status))
            .cloned()
            .collect();
        match partition {
            Partition::Deleted => out.sort_by(|a, b| {
                b.status
                    .lifecycle
                    .deleted_at()
                    .cmp(&a.status.lifecycle.deleted_at())
                    .then(a.id.cmp(&b.id))
            }),
            _ => out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id))),
        }
        Ok(out
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn counts(&self) -> Result<PartitionCounts, StoreError> {
        self.check()?;
        let mut counts = PartitionCounts::default();
        for b in self.rows.lock().unwrap().iter() {
            match b.status.partition() {
                Partition::New => counts.new += 1,
                Partition::Read => counts.read += 1,
                Partition::Archived => counts.archived += 1,
                Partition::Deleted => counts.deleted += 1,
            }
        }
        Ok(counts)
    }

    async fn save_status(
        &self,
        id: Uuid,
        status: &BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|b| b.id == id).map(|b| {
            b.status = *status;
            b.updated_at = now;
            b.clone()
        }))
    }

    async fn purge(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| !(b.id == id && b.status.is_deleted()));
        Ok(rows.len() < before)
    }

    async fn purge_all(&self) -> Result<u64, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| !b.status.is_deleted());
        Ok((before - rows.len()) as u64)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job progress
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryJobProgressStore {
    rows: Mutex<Vec<JobProgress>>,
}

impl MemoryJobProgressStore {
    fn sorted(&self, enabled_only: bool) -> Vec<JobProgress> {
        let mut out: Vec<JobProgress> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|j| !enabled_only || j.is_enabled)
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        out
    }
}

#[async_trait]
impl JobProgressStore for MemoryJobProgressStore {
    async fn create(
        &self,
        input: &JobProgressInput,
        now: DateTime<Utc>,
    ) -> Result<JobProgress, StoreError> {
        let job = JobProgress {
            id: Uuid::new_v4(),
            job_name: input.job_name.clone(),
            customer_info: input.customer_info.clone(),
            progress_percentage: input.progress_percentage,
            description: input.description.clone(),
            display_order: input.display_order,
            is_enabled: input.is_enabled,
            last_updated: now,
            created_at: now,
        };
        self.rows.lock().unwrap().push(job.clone());
        Ok(job)
    }

    async fn update(
        &self,
        id: Uuid,
        input: &JobProgressInput,
        now: DateTime<Utc>,
    ) -> Result<Option<JobProgress>, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|j| j.id == id).map(|j| {
            j.job_name = input.job_name.clone();
            j.customer_info = input.customer_info.clone();
            j.progress_percentage = input.progress_percentage;
            j.description = input.description.clone();
            j.display_order = input.display_order;
            j.is_enabled = input.is_enabled;
            j.last_updated = now;
            j.clone()
        }))
    }

    async fn toggle_enabled(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<JobProgress>, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|j| j.id == id).map(|j| {
            j.is_enabled = !j.is_enabled;
            j.last_updated = now;
            j.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|j| j.id != id);
        Ok(rows.len() < before)
    }

    async fn list_all(&self) -> Result<Vec<JobProgress>, StoreError> {
        Ok(self.sorted(false))
    }

    async fn list_enabled(&self) -> Result<Vec<JobProgress>, StoreError> {
        Ok(self.sorted(true))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ContentTables {
    projects: Vec<Project>,
    testimonials: Vec<Testimonial>,
    markers: HashSet<String>,
}

#[derive(Default)]
pub struct MemoryContentStore {
    tables: Mutex<ContentTables>,
}

fn limited<T>(items: Vec<T>, limit: Option<i64>) -> Vec<T> {
    match limit {
        Some(l) => items.into_iter().take(l.max(0) as usize).collect(),
        None => items,
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        let mut out: Vec<Project> = self
            .tables
            .lock()
            .unwrap()
            .projects
            .iter()
            .filter(|p| filter.category().map_or(true, |c| p.category == c))
            .filter(|p| filter.featured.map_or(true, |f| p.featured == f))
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            b.completed_date
                .cmp(&a.completed_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(limited(out, filter.limit))
    }

    async fn list_testimonials(
        &self,
        filter: &TestimonialFilter,
    ) -> Result<Vec<Testimonial>, StoreError> {
        let mut out: Vec<Testimonial> = self
            .tables
            .lock()
            .unwrap()
            .testimonials
            .iter()
            .filter(|t| filter.featured.map_or(true, |f| t.featured == f))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(limited(out, filter.limit))
    }

    async fn seed_once(
        &self,
        marker: &str,
        projects: &[NewProject],
        testimonials: &[NewTestimonial],
    ) -> Result<SeedOutcome, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.markers.contains(marker) {
            return Ok(SeedOutcome::AlreadySeeded);
        }
        let outcome = if !tables.projects.is_empty() {
            SeedOutcome::MarkedExisting
        } else {
            let now = Utc::now();
            tables.projects.extend(projects.iter().map(|p| Project {
                id: Uuid::new_v4(),
                title: p.title.to_string(),
                description: p.description.to_string(),
                category: p.category.to_string(),
                location: p.location.to_string(),
                image_url: p.image_url.to_string(),
                images: None,
                featured: p.featured,
                completed_date: p.completed_date,
                challenge: p.challenge.map(str::to_string),
                solution: p.solution.map(str::to_string),
                result: p.result.map(str::to_string),
                created_at: now,
            }));
            tables.testimonials.extend(testimonials.iter().map(|t| Testimonial {
                id: Uuid::new_v4(),
                client_name: t.client_name.to_string(),
                location: t.location.to_string(),
                project_type: t.project_type.to_string(),
                quote: t.quote.to_string(),
                rating: t.rating,
                featured: t.featured,
                created_at: now,
            }));
            SeedOutcome::Seeded {
                projects: projects.len(),
                testimonials: testimonials.len(),
            }
        };
        tables.markers.insert(marker.to_string());
        Ok(outcome)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Auth
// ────────────────────────────────────────────────────────────────────────────

/// Compares plaintext secrets; Argon2 itself is covered in `auth::password`.
#[derive(Default)]
pub struct MemoryAuthProvider {
    users: Mutex<Vec<(AdminUser, String)>>,
    sessions: Mutex<HashMap<String, AdminSession>>,
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let email = email.trim().to_lowercase();
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.email == email) {
            return Err(AuthError::EmailTaken);
        }
        let user = AdminUser {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        };
        users.push((user.clone(), password.to_string()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let email = email.trim().to_lowercase();
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, secret)| u.email == email && secret == password)
            .map(|(u, _)| u.clone())
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn list_users(&self) -> Result<Vec<AdminUser>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn persist_session(&self, session: &AdminSession) -> Result<(), AuthError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<AdminSession>, AuthError> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn active_sessions(&self, now: DateTime<Utc>) -> Result<Vec<AdminSession>, AuthError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| !s.is_expired(now))
            .cloned()
            .collect())
    }

    async fn revoke_session(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn prune_sessions(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}
