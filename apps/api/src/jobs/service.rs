use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store::JobProgressStore;
use crate::models::job_progress::{JobProgress, JobProgressInput, PublicJobProgress};

pub const MIN_PROGRESS: i32 = 0;
pub const MAX_PROGRESS: i32 = 100;

/// Rejects blank names and percentages outside 0–100.
pub fn validate_job(input: &JobProgressInput) -> Result<(), AppError> {
    let mut problems = Vec::new();
    if input.job_name.trim().is_empty() {
        problems.push("job_name is required".to_string());
    }
    if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&input.progress_percentage) {
        problems.push(format!(
            "progress_percentage must be between {MIN_PROGRESS} and {MAX_PROGRESS}"
        ));
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

pub async fn create(
    store: &dyn JobProgressStore,
    input: JobProgressInput,
) -> Result<JobProgress, AppError> {
    validate_job(&input)?;
    let job = store.create(&input, Utc::now()).await?;
    info!(job_id = %job.id, job_name = %job.job_name, "Job progress created");
    Ok(job)
}

pub async fn update(
    store: &dyn JobProgressStore,
    id: Uuid,
    input: JobProgressInput,
) -> Result<JobProgress, AppError> {
    validate_job(&input)?;
    let job = store
        .update(id, &input, Utc::now())
        .await?
        .ok_or_else(|| not_found(id))?;
    info!(job_id = %id, progress = job.progress_percentage, "Job progress updated");
    Ok(job)
}

pub async fn toggle_enabled(store: &dyn JobProgressStore, id: Uuid) -> Result<JobProgress, AppError> {
    let job = store
        .toggle_enabled(id, Utc::now())
        .await?
        .ok_or_else(|| not_found(id))?;
    info!(job_id = %id, enabled = job.is_enabled, "Job progress toggled");
    Ok(job)
}

pub async fn delete(store: &dyn JobProgressStore, id: Uuid) -> Result<(), AppError> {
    if store.delete(id).await? {
        info!(job_id = %id, "Job progress deleted");
        Ok(())
    } else {
        Err(not_found(id))
    }
}

pub async fn list_all(store: &dyn JobProgressStore) -> Result<Vec<JobProgress>, AppError> {
    store.list_all().await.map_err(AppError::fetch("jobs"))
}

pub async fn list_public(store: &dyn JobProgressStore) -> Result<Vec<PublicJobProgress>, AppError> {
    let jobs = store
        .list_enabled()
        .await
        .map_err(AppError::fetch("job progress"))?;
    Ok(jobs.into_iter().map(PublicJobProgress::from).collect())
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Job {id} not found"))
}
