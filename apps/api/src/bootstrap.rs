//! One-time startup work, run before the listener binds.
//!
//! Each step is idempotent: the admin account is only created when missing,
//! sample content is guarded by a persisted marker, and session restoration
//! just reloads whatever is still valid. A failing step is logged and the
//! remaining steps still run, so a seeding problem never keeps the site down.

use tracing::{error, info};

use crate::auth::{AuthError, AuthProvider, SessionGate};
use crate::config::Config;
use crate::content::samples::{sample_projects, sample_testimonials, SAMPLE_CONTENT_MARKER};
use crate::content::store::{ContentStore, SeedOutcome};
use crate::errors::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminProvisioning {
    Created,
    AlreadyExists,
    /// No password configured.
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin: AdminProvisioning,
    /// `None` when seeding is disabled or failed.
    pub content: Option<SeedOutcome>,
    pub sessions_restored: usize,
}

pub async fn provision_admin(
    provider: &dyn AuthProvider,
    email: &str,
    password: &str,
) -> Result<AdminProvisioning, AuthError> {
    let exists = provider
        .list_users()
        .await?
        .iter()
        .any(|u| u.email.eq_ignore_ascii_case(email));
    if exists {
        return Ok(AdminProvisioning::AlreadyExists);
    }

    match provider.sign_up(email, password).await {
        Ok(_) => Ok(AdminProvisioning::Created),
        // Lost a race with another instance starting up.
        Err(AuthError::EmailTaken) => Ok(AdminProvisioning::AlreadyExists),
        Err(e) => Err(e),
    }
}

pub async fn seed_sample_content(content: &dyn ContentStore) -> Result<SeedOutcome, StoreError> {
    content
        .seed_once(
            SAMPLE_CONTENT_MARKER,
            &sample_projects(),
            &sample_testimonials(),
        )
        .await
}

pub async fn run(config: &Config, content: &dyn ContentStore, sessions: &SessionGate) -> BootstrapReport {
    let admin = match &config.admin_password {
        None => {
            info!("ADMIN_PASSWORD not set; skipping admin provisioning");
            AdminProvisioning::Skipped
        }
        Some(password) => {
            let email = sessions.qualify(&config.admin_username);
            match provision_admin(sessions.provider(), &email, password).await {
                Ok(outcome) => {
                    info!(email = %email, ?outcome, "Admin provisioning checked");
                    outcome
                }
                Err(e) => {
                    error!(email = %email, "Admin provisioning failed: {e}");
                    AdminProvisioning::Failed
                }
            }
        }
    };

    let content = if config.seed_sample_content {
        match seed_sample_content(content).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(marker = SAMPLE_CONTENT_MARKER, "Sample content seeding failed: {e}");
                None
            }
        }
    } else {
        None
    };

    let sessions_restored = match sessions.restore().await {
        Ok(n) => n,
        Err(e) => {
            error!("Session restore failed: {e}");
            0
        }
    };

    BootstrapReport {
        admin,
        content,
        sessions_restored,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::content::store::{ProjectFilter, TestimonialFilter};
    use crate::testing::{
        test_config, MemoryAuthProvider, MemoryContentStore, ADMIN_PASSWORD, ADMIN_USERNAME,
        EMAIL_DOMAIN,
    };

    fn gate() -> SessionGate {
        SessionGate::new(
            Arc::new(MemoryAuthProvider::default()),
            EMAIL_DOMAIN,
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_bootstrap_twice_seeds_once() {
        let config = test_config();
        let content = MemoryContentStore::default();
        let sessions = gate();

        let first = run(&config, &content, &sessions).await;
        assert_eq!(
            first.content,
            Some(SeedOutcome::Seeded {
                projects: 6,
                testimonials: 10
            })
        );
        assert_eq!(first.admin, AdminProvisioning::Created);

        let second = run(&config, &content, &sessions).await;
        assert_eq!(second.content, Some(SeedOutcome::AlreadySeeded));
        assert_eq!(second.admin, AdminProvisioning::AlreadyExists);

        let projects = content.list_projects(&ProjectFilter::default()).await.unwrap();
        assert_eq!(projects.len(), 6);
        let testimonials = content
            .list_testimonials(&TestimonialFilter::default())
            .await
            .unwrap();
        assert_eq!(testimonials.len(), 10);
    }

    #[tokio::test]
    async fn test_provisioned_admin_can_sign_in() {
        let sessions = gate();
        run(&test_config(), &MemoryContentStore::default(), &sessions).await;
        assert!(sessions.sign_in(ADMIN_USERNAME, ADMIN_PASSWORD).await.is_ok());
        assert_eq!(sessions.provider().list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_password_skips_provisioning() {
        let config = Config {
            admin_password: None,
            ..test_config()
        };
        let sessions = gate();
        let report = run(&config, &MemoryContentStore::default(), &sessions).await;
        assert_eq!(report.admin, AdminProvisioning::Skipped);
        assert!(sessions.provider().list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeding_disabled() {
        let config = Config {
            seed_sample_content: false,
            ..test_config()
        };
        let content = MemoryContentStore::default();
        let report = run(&config, &content, &gate()).await;
        assert_eq!(report.content, None);
        assert!(content
            .list_projects(&ProjectFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_existing_projects_only_marked() {
        let content = MemoryContentStore::default();
        content
            .seed_once("earlier", &sample_projects()[..1], &[])
            .await
            .unwrap();
        let outcome = seed_sample_content(&content).await.unwrap();
        assert_eq!(outcome, SeedOutcome::MarkedExisting);
        assert_eq!(
            content.list_projects(&ProjectFilter::default()).await.unwrap().len(),
            1
        );
    }
}
