//! Course management.
//!
//! Routes:
//! - GET /api/admin/courses - List (same filters as the public list)
//! - POST /api/admin/courses - Create
//! - GET/PUT/DELETE /api/admin/courses/:id

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::api::courses::CourseListQuery;
use crate::db::{self, Course};
use crate::models::{new_id, nullable, CourseLevel, Paginated};
use crate::services::catalog::check_course_placement;
use crate::services::validation::{if_present, optional, required};
use crate::{metrics, AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:id", get(get_course).put(update_course).delete(delete_course))
}

#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub name: Option<String>,
    pub university_id: Option<String>,
    pub campus_id: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub duration: Option<String>,
    /// `null` clears the fee on update
    #[serde(default, deserialize_with = "nullable")]
    pub tuition_fee: Option<Option<f64>>,
    pub currency: Option<String>,
    pub intake: Option<String>,
    pub description: Option<String>,
}

fn parse_level(value: &str) -> Result<CourseLevel> {
    CourseLevel::from_str(value)
        .ok_or_else(|| Error::Validation(format!("Unknown course level: {}", value)))
}

fn check_fee(fee: Option<f64>) -> Result<()> {
    match fee {
        Some(f) if !f.is_finite() || f < 0.0 => Err(Error::Validation(
            "tuition_fee must be a non-negative number".into(),
        )),
        _ => Ok(()),
    }
}

/// GET /api/admin/courses
async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Paginated<Course>>> {
    let filter = query.filter()?;
    Ok(Json(db::list_courses(&state.db, &filter, query.page(&state)).await?))
}

/// POST /api/admin/courses
///
/// Nothing is written unless name, university and level are all present
/// and the campus (if any) belongs to the university.
#[axum::debug_handler]
async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CourseRequest>,
) -> Result<(StatusCode, Json<Course>)> {
    let name = required("name", request.name.as_deref())?;
    let university_id = required("university_id", request.university_id.as_deref())?;
    let level = parse_level(&required("level", request.level.as_deref())?)?;
    let campus_id = optional(request.campus_id);
    let tuition_fee = request.tuition_fee.flatten();
    check_fee(tuition_fee)?;

    check_course_placement(&state.db, &university_id, campus_id.as_deref()).await?;

    let input = db::CreateCourse {
        id: new_id(),
        name,
        university_id,
        campus_id,
        level: level.as_str().to_string(),
        subject: optional(request.subject),
        duration: optional(request.duration),
        tuition_fee,
        currency: optional(request.currency),
        intake: optional(request.intake),
        description: optional(request.description),
    };

    let course = db::create_course(&state.db, input).await?;
    metrics::record_write("course", "create");
    info!(id = %course.id, university_id = %course.university_id, level = %course.level, "Created course");

    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/admin/courses/:id
async fn get_course(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Course>> {
    Ok(Json(db::get_course(&state.db, &id).await?))
}

/// PUT /api/admin/courses/:id
///
/// Moving a course to another university or campus re-checks placement
/// against the merged values.
#[axum::debug_handler]
async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CourseRequest>,
) -> Result<Json<Course>> {
    let existing = db::get_course(&state.db, &id).await?;

    let university_id = if_present("university_id", request.university_id)?;
    let level = match if_present("level", request.level)? {
        Some(l) => Some(parse_level(&l)?.as_str().to_string()),
        None => None,
    };
    check_fee(request.tuition_fee.flatten())?;

    if university_id.is_some() || request.campus_id.is_some() {
        let target_university = university_id.as_deref().unwrap_or(&existing.university_id);
        // Blank campus_id clears the campus
        let target_campus = match &request.campus_id {
            Some(c) => Some(c.trim()).filter(|c| !c.is_empty()),
            None => existing.campus_id.as_deref(),
        };
        check_course_placement(&state.db, target_university, target_campus).await?;
    }

    let input = db::UpdateCourse {
        name: if_present("name", request.name)?,
        university_id,
        campus_id: request.campus_id,
        level,
        subject: request.subject,
        duration: request.duration,
        tuition_fee: request.tuition_fee,
        currency: request.currency,
        intake: request.intake,
        description: request.description,
    };

    let course = db::update_course(&state.db, &id, input).await?;
    metrics::record_write("course", "update");
    info!(id = %course.id, "Updated course");

    Ok(Json(course))
}

/// DELETE /api/admin/courses/:id
async fn delete_course(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    db::delete_course(&state.db, &id).await?;
    metrics::record_write("course", "delete");
    info!(id = %id, "Deleted course");
    Ok(StatusCode::NO_CONTENT)
}
