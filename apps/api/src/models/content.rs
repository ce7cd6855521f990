use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub image_url: String,
    pub images: Option<Vec<String>>,
    pub featured: bool,
    pub completed_date: NaiveDate,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub result: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Images for the gallery view: the `images` array when it has entries,
    /// otherwise the single cover image.
    pub fn gallery(&self) -> Vec<String> {
        match &self.images {
            Some(images) if !images.is_empty() => images.clone(),
            _ => vec![self.image_url.clone()],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub gallery: Vec<String>,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        let gallery = project.gallery();
        ProjectView { project, gallery }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub client_name: String,
    pub location: String,
    pub project_type: String,
    pub quote: String,
    pub rating: i16,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Seed content for a project, before it has an id.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub location: &'static str,
    pub image_url: &'static str,
    pub featured: bool,
    pub completed_date: NaiveDate,
    pub challenge: Option<&'static str>,
    pub solution: Option<&'static str>,
    pub result: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub client_name: &'static str,
    pub location: &'static str,
    pub project_type: &'static str,
    pub quote: &'static str,
    pub rating: i16,
    pub featured: bool,
}
