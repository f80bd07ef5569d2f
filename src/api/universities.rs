//! University Routes (public)
//!
//! Routes:
//! - GET /api/universities - List universities
//! - GET /api/universities/:id_or_slug - University details with campuses

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{self, Campus, University, UniversityFilter};
use crate::models::{non_empty, Page, Paginated};
use crate::{AppState, Result};

/// Build university routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_universities))
        .route("/:id", get(get_university))
}

/// Query parameters for listing universities.
#[derive(Debug, Deserialize, Default)]
pub struct UniversityListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub country: Option<String>,
    /// Only featured universities
    #[serde(default)]
    pub featured: bool,
}

impl UniversityListQuery {
    pub fn filter(&self) -> UniversityFilter {
        UniversityFilter {
            search: non_empty(&self.search).map(str::to_string),
            country: non_empty(&self.country).map(str::to_string),
            featured_only: self.featured,
        }
    }
}

/// University with its campuses and course count.
#[derive(Debug, Serialize)]
pub struct UniversityDetail {
    #[serde(flatten)]
    pub university: University,
    pub campuses: Vec<Campus>,
    pub course_count: i64,
}

/// GET /api/universities
#[axum::debug_handler]
async fn list_universities(
    State(state): State<AppState>,
    Query(query): Query<UniversityListQuery>,
) -> Result<Json<Paginated<University>>> {
    let page = Page::resolve(query.page, query.limit, &state.pagination);
    let result = db::list_universities(&state.db, &query.filter(), page).await?;
    Ok(Json(result))
}

/// GET /api/universities/:id_or_slug
#[axum::debug_handler]
async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UniversityDetail>> {
    let detail = load_detail(&state, &id).await?;
    Ok(Json(detail))
}

pub(crate) async fn load_detail(state: &AppState, id_or_slug: &str) -> Result<UniversityDetail> {
    let university = db::get_university_by_id_or_slug(&state.db, id_or_slug).await?;
    let campuses = db::list_campuses(&state.db, &university.id).await?;
    let course_count = db::count_university_courses(&state.db, &university.id).await?;

    Ok(UniversityDetail {
        university,
        campuses,
        course_count,
    })
}
