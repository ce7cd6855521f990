use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;

use crate::content::store::{ProjectFilter, TestimonialFilter};
use crate::errors::AppError;
use crate::extract::Query;
use crate::models::content::{ProjectView, Testimonial};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TestimonialsQuery {
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectsQuery>,
) -> Result<Json<Vec<ProjectView>>, AppError> {
    let filter = ProjectFilter {
        category: params.category,
        featured: params.featured,
        limit: params.limit.map(|l| l.max(0)),
    };
    let projects = state
        .content
        .list_projects(&filter)
        .await
        .map_err(AppError::fetch("projects"))?;
    Ok(Json(projects.into_iter().map(ProjectView::from).collect()))
}

/// GET /api/v1/testimonials
pub async fn handle_list_testimonials(
    State(state): State<AppState>,
    Query(params): Query<TestimonialsQuery>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let filter = TestimonialFilter {
        featured: params.featured,
        limit: params.limit.map(|l| l.max(0)),
    };
    let testimonials = state
        .content
        .list_testimonials(&filter)
        .await
        .map_err(AppError::fetch("testimonials"))?;
    Ok(Json(testimonials))
}
