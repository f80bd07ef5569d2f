//! University and campus management.
//!
//! Routes:
//! - GET /api/admin/universities - List (filters: search, country, featured)
//! - POST /api/admin/universities - Create (slug derived from name if absent)
//! - GET/PUT/DELETE /api/admin/universities/:id
//! - GET /api/admin/universities/:id/campuses - Campuses of a university
//! - POST /api/admin/universities/:id/campuses - Add a campus
//! - PUT/DELETE /api/admin/campuses/:id

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::api::universities::{load_detail, UniversityDetail, UniversityListQuery};
use crate::db::{self, Campus, University};
use crate::models::{new_id, nullable, Page, Paginated};
use crate::services::catalog::unique_university_slug;
use crate::services::validation::{if_present, is_valid_slug, optional, required};
use crate::{metrics, AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/universities", get(list_universities).post(create_university))
        .route(
            "/universities/:id",
            get(get_university)
                .put(update_university)
                .delete(delete_university),
        )
        .route(
            "/universities/:id/campuses",
            get(list_campuses).post(create_campus),
        )
        .route("/campuses/:id", put(update_campus).delete(delete_campus))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUniversityRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub ranking: Option<i64>,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUniversityRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub ranking: Option<Option<i64>>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CampusRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

fn check_slug(slug: &str) -> Result<()> {
    if !is_valid_slug(slug) {
        return Err(Error::Validation(format!(
            "Invalid slug '{}': use lowercase letters, digits and single hyphens",
            slug
        )));
    }
    Ok(())
}

fn check_ranking(ranking: Option<i64>) -> Result<()> {
    match ranking {
        Some(r) if r < 1 => Err(Error::Validation("ranking must be a positive number".into())),
        _ => Ok(()),
    }
}

// ============================================================================
// Universities
// ============================================================================

/// GET /api/admin/universities
async fn list_universities(
    State(state): State<AppState>,
    Query(query): Query<UniversityListQuery>,
) -> Result<Json<Paginated<University>>> {
    let page = Page::resolve(query.page, query.limit, &state.pagination);
    Ok(Json(db::list_universities(&state.db, &query.filter(), page).await?))
}

/// POST /api/admin/universities
#[axum::debug_handler]
async fn create_university(
    State(state): State<AppState>,
    Json(request): Json<CreateUniversityRequest>,
) -> Result<(StatusCode, Json<University>)> {
    let name = required("name", request.name.as_deref())?;
    let country = required("country", request.country.as_deref())?;
    check_ranking(request.ranking)?;

    let slug = match optional(request.slug) {
        Some(slug) => {
            check_slug(&slug)?;
            slug
        }
        None => unique_university_slug(&state.db, &name).await?,
    };

    let input = db::CreateUniversity {
        id: new_id(),
        name,
        slug,
        country,
        city: optional(request.city),
        description: optional(request.description),
        logo_url: optional(request.logo_url),
        website: optional(request.website),
        ranking: request.ranking,
        is_featured: request.is_featured,
    };

    let university = db::create_university(&state.db, input).await?;
    metrics::record_write("university", "create");
    info!(id = %university.id, slug = %university.slug, "Created university");

    Ok((StatusCode::CREATED, Json(university)))
}

/// GET /api/admin/universities/:id
async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UniversityDetail>> {
    Ok(Json(load_detail(&state, &id).await?))
}

/// PUT /api/admin/universities/:id
#[axum::debug_handler]
async fn update_university(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUniversityRequest>,
) -> Result<Json<University>> {
    let slug = if_present("slug", request.slug)?;
    if let Some(slug) = &slug {
        check_slug(slug)?;
    }
    check_ranking(request.ranking.flatten())?;

    let input = db::UpdateUniversity {
        name: if_present("name", request.name)?,
        slug,
        country: if_present("country", request.country)?,
        city: request.city,
        description: request.description,
        logo_url: request.logo_url,
        website: request.website,
        ranking: request.ranking,
        is_featured: request.is_featured,
    };

    let university = db::update_university(&state.db, &id, input).await?;
    metrics::record_write("university", "update");
    info!(id = %university.id, "Updated university");

    Ok(Json(university))
}

/// DELETE /api/admin/universities/:id
///
/// Campuses and courses go with it; scholarships and applications
/// keep their rows with the link cleared.
async fn delete_university(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    db::delete_university(&state.db, &id).await?;
    metrics::record_write("university", "delete");
    info!(id = %id, "Deleted university");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Campuses
// ============================================================================

/// GET /api/admin/universities/:id/campuses
async fn list_campuses(
    State(state): State<AppState>,
    Path(university_id): Path<String>,
) -> Result<Json<Vec<Campus>>> {
    // 404 for an unknown university rather than an empty list
    db::get_university(&state.db, &university_id).await?;
    Ok(Json(db::list_campuses(&state.db, &university_id).await?))
}

/// POST /api/admin/universities/:id/campuses
async fn create_campus(
    State(state): State<AppState>,
    Path(university_id): Path<String>,
    Json(request): Json<CampusRequest>,
) -> Result<(StatusCode, Json<Campus>)> {
    db::get_university(&state.db, &university_id).await?;

    let input = db::CreateCampus {
        id: new_id(),
        university_id,
        name: required("name", request.name.as_deref())?,
        city: optional(request.city),
        address: optional(request.address),
    };

    let campus = db::create_campus(&state.db, input).await?;
    metrics::record_write("campus", "create");
    info!(id = %campus.id, university_id = %campus.university_id, "Created campus");

    Ok((StatusCode::CREATED, Json(campus)))
}

/// PUT /api/admin/campuses/:id
async fn update_campus(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CampusRequest>,
) -> Result<Json<Campus>> {
    let input = db::UpdateCampus {
        name: if_present("name", request.name)?,
        city: request.city,
        address: request.address,
    };

    let campus = db::update_campus(&state.db, &id, input).await?;
    metrics::record_write("campus", "update");
    Ok(Json(campus))
}

/// DELETE /api/admin/campuses/:id
async fn delete_campus(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    db::delete_campus(&state.db, &id).await?;
    metrics::record_write("campus", "delete");
    info!(id = %id, "Deleted campus");
    Ok(StatusCode::NO_CONTENT)
}
