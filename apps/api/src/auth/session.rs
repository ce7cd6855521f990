//! Admin session gate: the only access check in front of the back office.
//!
//! `SessionGate` is process-scoped and carried in `AppState`. It is populated
//! by `sign_in` or by `restore` at startup, and emptied by `sign_out` or
//! expiry. Persisted sessions survive restarts through the `AuthProvider`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::provider::AuthProvider;
use crate::auth::AuthError;
use crate::models::admin::AdminSession;

/// Turns a bare username into an email on the admin domain.
/// Identifiers that already contain "@" are used as given.
pub fn qualify_identifier(identifier: &str, domain: &str) -> String {
    let identifier = identifier.trim();
    if identifier.contains('@') {
        identifier.to_string()
    } else {
        format!("{identifier}@{domain}")
    }
}

fn new_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn AuthProvider>,
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
    email_domain: String,
    ttl: Duration,
}

impl SessionGate {
    pub fn new(provider: Arc<dyn AuthProvider>, email_domain: impl Into<String>, ttl: Duration) -> Self {
        Self {
            provider,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            email_domain: email_domain.into(),
            ttl,
        }
    }

    pub fn provider(&self) -> &dyn AuthProvider {
        self.provider.as_ref()
    }

    pub fn qualify(&self, identifier: &str) -> String {
        qualify_identifier(identifier, &self.email_domain)
    }

    /// Deletes expired persisted sessions, then loads the rest into the
    /// cache. Returns how many are cached.
    pub async fn restore(&self) -> Result<usize, AuthError> {
        let now = Utc::now();
        let pruned = self.provider.prune_sessions(now).await?;
        let active = self.provider.active_sessions(now).await?;
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(now));
        for s in active {
            sessions.insert(s.token.clone(), s);
        }
        info!(sessions = sessions.len(), pruned, "Admin sessions restored");
        Ok(sessions.len())
    }

    pub async fn sign_in(&self, identifier: &str, secret: &str) -> Result<AdminSession, AuthError> {
        let email = self.qualify(identifier);
        let user = match self.provider.sign_in(&email, secret).await {
            Ok(user) => user,
            Err(AuthError::InvalidCredentials) => {
                warn!("Admin sign-in rejected");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Internal("session expiry out of range".to_string()))?;
        let session = AdminSession {
            token: new_token(),
            user_id: user.id,
            email: user.email,
            created_at: now,
            expires_at,
        };
        self.provider.persist_session(&session).await?;

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(now));
        sessions.insert(session.token.clone(), session.clone());
        drop(sessions);

        info!(user_id = %session.user_id, expires_at = %session.expires_at, "Admin signed in");
        Ok(session)
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.write().await.remove(token);
        self.provider.revoke_session(token).await?;
        info!("Admin signed out");
        Ok(())
    }

    /// The live session for `token`, if any. Tokens missing from the cache are
    /// looked up in persistence; expired sessions are evicted on sight.
    pub async fn current(&self, token: &str) -> Result<Option<AdminSession>, AuthError> {
        let now = Utc::now();
        let cached = self.sessions.read().await.get(token).cloned();
        let session = match cached {
            Some(s) => Some(s),
            None => self.provider.find_session(token).await?,
        };

        match session {
            Some(s) if !s.is_expired(now) => {
                self.sessions
                    .write()
                    .await
                    .entry(s.token.clone())
                    .or_insert_with(|| s.clone());
                Ok(Some(s))
            }
            Some(s) => {
                self.sessions.write().await.remove(&s.token);
                self.provider.revoke_session(&s.token).await?;
                info!(user_id = %s.user_id, "Admin session expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
