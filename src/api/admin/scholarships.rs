//! Scholarship management.
//!
//! Routes:
//! - GET /api/admin/scholarships - List (filters: country, level, search)
//! - POST /api/admin/scholarships - Create
//! - GET/PUT/DELETE /api/admin/scholarships/:id

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::api::parse_field;
use crate::api::scholarships::ScholarshipListQuery;
use crate::db::{self, Scholarship};
use crate::models::{new_id, nullable, CourseLevel, Page, Paginated};
use crate::services::validation::{if_present, optional, required};
use crate::{metrics, AppState, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scholarships).post(create_scholarship))
        .route(
            "/:id",
            get(get_scholarship)
                .put(update_scholarship)
                .delete(delete_scholarship),
        )
}

#[derive(Debug, Deserialize)]
pub struct ScholarshipRequest {
    pub title: Option<String>,
    pub university_id: Option<String>,
    pub country: Option<String>,
    pub amount: Option<String>,
    pub level: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub deadline: Option<Option<NaiveDate>>,
    pub eligibility: Option<String>,
    pub description: Option<String>,
}

/// Stored form of an optional level. Blank means none.
fn parse_level(value: &Option<String>) -> Result<Option<String>> {
    let level = parse_field("level", value, CourseLevel::from_str)?;
    Ok(level.map(|l| l.as_str().to_string()))
}

/// GET /api/admin/scholarships
async fn list_scholarships(
    State(state): State<AppState>,
    Query(query): Query<ScholarshipListQuery>,
) -> Result<Json<Paginated<Scholarship>>> {
    let page = Page::resolve(query.page, query.limit, &state.pagination);
    Ok(Json(db::list_scholarships(&state.db, &query.filter()?, page).await?))
}

/// POST /api/admin/scholarships
async fn create_scholarship(
    State(state): State<AppState>,
    Json(request): Json<ScholarshipRequest>,
) -> Result<(StatusCode, Json<Scholarship>)> {
    let input = db::CreateScholarship {
        id: new_id(),
        title: required("title", request.title.as_deref())?,
        university_id: optional(request.university_id),
        country: optional(request.country),
        amount: optional(request.amount),
        level: parse_level(&request.level)?,
        deadline: request.deadline.flatten(),
        eligibility: optional(request.eligibility),
        description: optional(request.description),
    };

    // An unknown university_id surfaces as a validation error from the FK
    let scholarship = db::create_scholarship(&state.db, input).await?;
    metrics::record_write("scholarship", "create");
    info!(id = %scholarship.id, "Created scholarship");

    Ok((StatusCode::CREATED, Json(scholarship)))
}

/// GET /api/admin/scholarships/:id
async fn get_scholarship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Scholarship>> {
    Ok(Json(db::get_scholarship(&state.db, &id).await?))
}

/// PUT /api/admin/scholarships/:id
async fn update_scholarship(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ScholarshipRequest>,
) -> Result<Json<Scholarship>> {
    // Blank clears the level
    let level = match &request.level {
        Some(raw) if raw.trim().is_empty() => Some(String::new()),
        _ => parse_level(&request.level)?,
    };

    let input = db::UpdateScholarship {
        title: if_present("title", request.title)?,
        university_id: request.university_id,
        country: request.country,
        amount: request.amount,
        level,
        deadline: request.deadline,
        eligibility: request.eligibility,
        description: request.description,
    };

    let scholarship = db::update_scholarship(&state.db, &id, input).await?;
    metrics::record_write("scholarship", "update");
    Ok(Json(scholarship))
}

/// DELETE /api/admin/scholarships/:id
async fn delete_scholarship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    db::delete_scholarship(&state.db, &id).await?;
    metrics::record_write("scholarship", "delete");
    info!(id = %id, "Deleted scholarship");
    Ok(StatusCode::NO_CONTENT)
}
