//! Scholarship Routes (public)
//!
//! Routes:
//! - GET /api/scholarships - List scholarships
//! - GET /api/scholarships/:id - Scholarship details

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::{self, Scholarship, ScholarshipFilter};
use crate::models::{non_empty, CourseLevel, Page, Paginated};
use crate::{AppState, Result};

use super::parse_filter;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scholarships))
        .route("/:id", get(get_scholarship))
}

#[derive(Debug, Deserialize, Default)]
pub struct ScholarshipListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub country: Option<String>,
    pub level: Option<String>,
}

impl ScholarshipListQuery {
    pub fn filter(&self) -> Result<ScholarshipFilter> {
        let level = parse_filter("level", &self.level, CourseLevel::from_str)?;
        Ok(ScholarshipFilter {
            search: non_empty(&self.search).map(str::to_string),
            country: non_empty(&self.country).map(str::to_string),
            level: level.map(|l| l.as_str().to_string()),
        })
    }
}

/// GET /api/scholarships
async fn list_scholarships(
    State(state): State<AppState>,
    Query(query): Query<ScholarshipListQuery>,
) -> Result<Json<Paginated<Scholarship>>> {
    let page = Page::resolve(query.page, query.limit, &state.pagination);
    let result = db::list_scholarships(&state.db, &query.filter()?, page).await?;
    Ok(Json(result))
}

/// GET /api/scholarships/:id
async fn get_scholarship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Scholarship>> {
    Ok(Json(db::get_scholarship(&state.db, &id).await?))
}
