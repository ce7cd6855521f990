pub mod admin;
pub mod booking;
pub mod content;
pub mod job_progress;
