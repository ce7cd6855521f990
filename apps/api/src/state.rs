use std::sync::Arc;

use crate::auth::SessionGate;
use crate::bookings::store::BookingStore;
use crate::content::store::ContentStore;
use crate::jobs::store::JobProgressStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingStore>,
    pub jobs: Arc<dyn JobProgressStore>,
    pub content: Arc<dyn ContentStore>,
    /// Admin sessions. Every admin route goes through this gate.
    pub sessions: SessionGate,
}
