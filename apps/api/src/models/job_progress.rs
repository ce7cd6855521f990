use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobProgress {
    pub id: Uuid,
    pub job_name: String,
    pub customer_info: String,
    pub progress_percentage: i32,
    pub description: String,
    pub display_order: i32,
    pub is_enabled: bool,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Editable fields; `create` and `update` both take the full set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobProgressInput {
    pub job_name: String,
    #[serde(default)]
    pub customer_info: String,
    #[serde(default)]
    pub progress_percentage: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// What the public progress page sees.
#[derive(Debug, Clone, Serialize)]
pub struct PublicJobProgress {
    pub id: Uuid,
    pub job_name: String,
    pub customer_info: String,
    pub progress_percentage: i32,
    pub description: String,
    pub last_updated: DateTime<Utc>,
}

impl From<JobProgress> for PublicJobProgress {
    fn from(job: JobProgress) -> Self {
        PublicJobProgress {
            id: job.id,
            job_name: job.job_name,
            customer_info: job.customer_info,
            progress_percentage: job.progress_percentage,
            description: job.description,
            last_updated: job.last_updated,
        }
    }
}
