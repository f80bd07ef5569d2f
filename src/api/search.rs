//! Search Routes (public)
//!
//! Routes:
//! - GET /api/search?q= - Site-wide search grouped by kind
//! - GET /api/search-filter - Paginated course finder

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::{self, Course};
use crate::models::Paginated;
use crate::services::SearchResults;
use crate::{AppState, Result};

use super::courses::CourseListQuery;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/search-filter", get(search_filter))
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(alias = "search")]
    pub q: Option<String>,
}

/// GET /api/search
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let term = query.q.unwrap_or_default();
    Ok(Json(state.search.search(&term).await?))
}

/// GET /api/search-filter
///
/// Same filters as the course list: country, level, subject,
/// university_id and search.
async fn search_filter(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Paginated<Course>>> {
    let filter = query.filter()?;
    let result = db::list_courses(&state.db, &filter, query.page(&state)).await?;
    tracing::debug!(total = result.total, "Course search-filter");
    Ok(Json(result))
}
