//! Course Routes (public)
//!
//! Routes:
//! - GET /api/courses - List courses
//! - GET /api/courses/:id - Course details

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::{self, Course, CourseFilter};
use crate::models::{non_empty, CourseLevel, Page, Paginated};
use crate::{AppState, Result};

use super::parse_filter;

/// Build course routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/:id", get(get_course))
}

/// Query parameters for course lists and the course search-filter.
#[derive(Debug, Deserialize, Default)]
pub struct CourseListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub university_id: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub country: Option<String>,
}

impl CourseListQuery {
    pub fn page(&self, state: &AppState) -> Page {
        Page::resolve(self.page, self.limit, &state.pagination)
    }

    pub fn filter(&self) -> Result<CourseFilter> {
        let level = parse_filter("level", &self.level, CourseLevel::from_str)?;
        Ok(CourseFilter {
            search: non_empty(&self.search).map(str::to_string),
            university_id: non_empty(&self.university_id).map(str::to_string),
            level: level.map(|l| l.as_str().to_string()),
            subject: non_empty(&self.subject).map(str::to_string),
            country: non_empty(&self.country).map(str::to_string),
        })
    }
}

/// GET /api/courses
async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Paginated<Course>>> {
    let filter = query.filter()?;
    let result = db::list_courses(&state.db, &filter, query.page(&state)).await?;
    Ok(Json(result))
}

/// GET /api/courses/:id
async fn get_course(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Course>> {
    Ok(Json(db::get_course(&state.db, &id).await?))
}
