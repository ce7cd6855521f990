pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;

use crate::auth::handlers as auth;
use crate::bookings::handlers as bookings;
use crate::content::handlers as content;
use crate::errors::AppError;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

/// `?confirm=true` guard for destructive admin endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmQuery {
    pub fn require(&self, action: &str) -> Result<(), AppError> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::ConfirmationRequired(format!(
                "Pass confirm=true to {action}"
            )))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public site
        .route("/api/v1/projects", get(content::handle_list_projects))
        .route("/api/v1/testimonials", get(content::handle_list_testimonials))
        .route("/api/v1/job-progress", get(jobs::handle_public_jobs))
        .route("/api/v1/bookings", post(bookings::handle_submit_booking))
        // Admin session
        .route(
            "/api/v1/admin/session",
            post(auth::handle_sign_in)
                .get(auth::handle_current_session)
                .delete(auth::handle_sign_out),
        )
        // Booking inbox
        .route("/api/v1/admin/bookings", get(bookings::handle_list_bookings))
        .route(
            "/api/v1/admin/bookings/counts",
            get(bookings::handle_booking_counts),
        )
        .route("/api/v1/admin/bookings/:id", get(bookings::handle_get_booking))
        .route(
            "/api/v1/admin/bookings/:id/read",
            post(bookings::handle_mark_read),
        )
        .route(
            "/api/v1/admin/bookings/:id/archive",
            post(bookings::handle_archive),
        )
        .route(
            "/api/v1/admin/bookings/:id/unarchive",
            post(bookings::handle_unarchive),
        )
        .route(
            "/api/v1/admin/bookings/:id/delete",
            post(bookings::handle_soft_delete),
        )
        .route(
            "/api/v1/admin/bookings/:id/restore",
            post(bookings::handle_restore),
        )
        // Recycle bin
        .route(
            "/api/v1/admin/recycle-bin",
            get(bookings::handle_recycle_bin).delete(bookings::handle_empty_recycle_bin),
        )
        .route(
            "/api/v1/admin/recycle-bin/:id",
            delete(bookings::handle_purge_booking),
        )
        // Job progress
        .route(
            "/api/v1/admin/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/v1/admin/jobs/:id",
            put(jobs::handle_update_job).delete(jobs::handle_delete_job),
        )
        .route("/api/v1/admin/jobs/:id/toggle", post(jobs::handle_toggle_job))
        .with_state(state)
}
