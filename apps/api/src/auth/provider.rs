use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::AuthError;
use crate::models::admin::{AdminSession, AdminUser};

/// Credential and session backend behind the session gate.
///
/// Emails arrive already qualified; implementations compare them
/// case-insensitively. `sign_in` must not reveal whether the email or the
/// password was wrong.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AdminUser, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError>;

    async fn list_users(&self) -> Result<Vec<AdminUser>, AuthError>;

    async fn persist_session(&self, session: &AdminSession) -> Result<(), AuthError>;

    async fn find_session(&self, token: &str) -> Result<Option<AdminSession>, AuthError>;

    /// Sessions that have not expired as of `now`.
    async fn active_sessions(&self, now: DateTime<Utc>) -> Result<Vec<AdminSession>, AuthError>;

    async fn revoke_session(&self, token: &str) -> Result<(), AuthError>;

    /// Deletes sessions that expired at or before `now`. Returns how many.
    async fn prune_sessions(&self, now: DateTime<Utc>) -> Result<u64, AuthError>;
}

#[derive(FromRow)]
struct CredentialRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

pub struct PgAuthProvider {
    pool: PgPool,
    /// Verified against when the email is unknown, so both failure paths cost
    /// one Argon2 verification.
    dummy_hash: String,
}

impl PgAuthProvider {
    pub async fn new(pool: PgPool) -> Result<Self, AuthError> {
        let dummy_hash = hash_password_blocking(Uuid::new_v4().to_string()).await?;
        Ok(Self { pool, dummy_hash })
    }
}

#[async_trait]
impl AuthProvider for PgAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let email = email.trim().to_lowercase();
        let password_hash = hash_password_blocking(password.to_string()).await?;
        let user: Option<AdminUser> = sqlx::query_as(
            r#"
            INSERT INTO admin_users (id, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&email)
        .bind(&password_hash)
        .fetch_optional(&self.pool)
        .await?;

        let user = user.ok_or(AuthError::EmailTaken)?;
        info!(user_id = %user.id, email = %user.email, "Admin user registered");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT id, email, password_hash, created_at FROM admin_users WHERE email = $1",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            verify_password_blocking(password.to_string(), self.dummy_hash.clone()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if verify_password_blocking(password.to_string(), row.password_hash).await? {
            Ok(AdminUser {
                id: row.id,
                email: row.email,
                created_at: row.created_at,
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn list_users(&self) -> Result<Vec<AdminUser>, AuthError> {
        Ok(sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, created_at FROM admin_users ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn persist_session(&self, session: &AdminSession) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO admin_sessions (token, user_id, email, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(&session.email)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<AdminSession>, AuthError> {
        Ok(
            sqlx::query_as::<_, AdminSession>("SELECT * FROM admin_sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn active_sessions(&self, now: DateTime<Utc>) -> Result<Vec<AdminSession>, AuthError> {
        Ok(
            sqlx::query_as::<_, AdminSession>("SELECT * FROM admin_sessions WHERE expires_at > $1")
                .bind(now)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn revoke_session(&self, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn prune_sessions(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
