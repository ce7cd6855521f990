use anyhow::{Context, Result};

/// One year. Longer admin sessions are rejected at startup.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Domain appended to bare admin usernames at sign-in.
    pub admin_email_domain: String,
    pub admin_username: String,
    /// When absent, no admin account is provisioned at startup.
    pub admin_password: Option<String>,
    pub session_ttl_hours: i64,
    pub seed_sample_content: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            admin_email_domain: env_or("ADMIN_EMAIL_DOMAIN", "evasonbuilding.com"),
            admin_username: env_or("ADMIN_USERNAME", "BigPezza"),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
            session_ttl_hours: parse_ttl_hours(&env_or("SESSION_TTL_HOURS", "12")).with_context(
                || format!("SESSION_TTL_HOURS must be a whole number of hours between 1 and {MAX_SESSION_TTL_HOURS}"),
            )?,
            seed_sample_content: parse_flag(&env_or("SEED_SAMPLE_CONTENT", "true"))
                .context("SEED_SAMPLE_CONTENT must be true or false")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_ttl_hours(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|h| (1..=MAX_SESSION_TTL_HOURS).contains(h))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_bounds() {
        assert_eq!(parse_ttl_hours("12"), Some(12));
        assert_eq!(parse_ttl_hours("8760"), Some(MAX_SESSION_TTL_HOURS));
        assert_eq!(parse_ttl_hours("8761"), None);
        assert_eq!(parse_ttl_hours("10000000000"), None);
        assert_eq!(parse_ttl_hours("0"), None);
        assert_eq!(parse_ttl_hours("-3"), None);
        assert_eq!(parse_ttl_hours("twelve"), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
