mod auth;
mod bookings;
mod bootstrap;
mod config;
mod content;
mod db;
mod errors;
mod extract;
mod jobs;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{PgAuthProvider, SessionGate};
use crate::bookings::store::PgBookingStore;
use crate::config::Config;
use crate::content::store::PgContentStore;
use crate::db::{create_pool, run_migrations};
use crate::jobs::store::PgJobProgressStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Evason API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Auth collaborator and session gate
    let provider = Arc::new(PgAuthProvider::new(db.clone()).await?);
    let sessions = SessionGate::new(
        provider,
        config.admin_email_domain.clone(),
        chrono::Duration::hours(config.session_ttl_hours),
    );

    let content = Arc::new(PgContentStore::new(db.clone()));

    let report = bootstrap::run(&config, content.as_ref(), &sessions).await;
    info!(
        admin = ?report.admin,
        content = ?report.content,
        sessions = report.sessions_restored,
        "Bootstrap complete"
    );

    // Build app state
    let state = AppState {
        bookings: Arc::new(PgBookingStore::new(db.clone())),
        jobs: Arc::new(PgJobProgressStore::new(db)),
        content,
        sessions,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the public site once its domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
