//! Inbox management: study applications, job applications and contact
//! messages.
//!
//! Each list takes `page`, `limit`, `search` (or `q`) and `status`, where
//! a blank or `all` status shows everything. Reviews are partial: a PUT
//! with only `admin_notes` leaves the status alone.
//!
//! Routes:
//! - GET /api/admin/applications, GET/PUT/DELETE /api/admin/applications/:id
//! - GET /api/admin/job-applications, GET/PUT/DELETE /api/admin/job-applications/:id
//! - GET /api/admin/messages, GET/PUT/DELETE /api/admin/messages/:id

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::api::{parse_field, parse_filter, ListQuery};
use crate::db::{
    self, Application, ApplicationFilter, JobApplication, JobApplicationFilter, Message,
    MessageFilter,
};
use crate::models::{
    non_empty, ApplicationStatus, JobApplicationStatus, MessageStatus, Page, Paginated,
};
use crate::{metrics, AppState, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(list_applications))
        .route(
            "/applications/:id",
            get(get_application)
                .put(review_application)
                .delete(delete_application),
        )
        .route("/job-applications", get(list_job_applications))
        .route(
            "/job-applications/:id",
            get(get_job_application)
                .put(review_job_application)
                .delete(delete_job_application),
        )
        .route("/messages", get(list_messages))
        .route(
            "/messages/:id",
            get(get_message).put(review_message).delete(delete_message),
        )
}

/// Body of a review: new status and/or notes.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

/// Job application lists also filter by position.
#[derive(Debug, Deserialize, Default)]
pub struct JobApplicationListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub status: Option<String>,
    pub position: Option<String>,
}

// ============================================================================
// Study applications
// ============================================================================

/// GET /api/admin/applications
async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Application>>> {
    let filter = ApplicationFilter {
        search: query.search_term(),
        status: parse_filter("status", &query.status, ApplicationStatus::from_str)?,
    };
    Ok(Json(db::list_applications(&state.db, &filter, query.page(&state)).await?))
}

/// GET /api/admin/applications/:id
async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>> {
    Ok(Json(db::get_application(&state.db, &id).await?))
}

/// PUT /api/admin/applications/:id
#[axum::debug_handler]
async fn review_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<Application>> {
    let input = db::ReviewApplication {
        status: parse_field("status", &request.status, ApplicationStatus::from_str)?,
        admin_notes: request.admin_notes,
    };

    let application = db::review_application(&state.db, &id, input).await?;
    metrics::record_write("application", "update");
    info!(id = %application.id, status = %application.status, "Reviewed application");

    Ok(Json(application))
}

/// DELETE /api/admin/applications/:id
async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    db::delete_application(&state.db, &id).await?;
    metrics::record_write("application", "delete");
    info!(id = %id, "Deleted application");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Job applications
// ============================================================================

/// GET /api/admin/job-applications
async fn list_job_applications(
    State(state): State<AppState>,
    Query(query): Query<JobApplicationListQuery>,
) -> Result<Json<Paginated<JobApplication>>> {
    let filter = JobApplicationFilter {
        search: non_empty(&query.search).map(str::to_string),
        status: parse_filter("status", &query.status, JobApplicationStatus::from_str)?,
        position: non_empty(&query.position).map(str::to_string),
    };
    let page = Page::resolve(query.page, query.limit, &state.pagination);
    Ok(Json(db::list_job_applications(&state.db, &filter, page).await?))
}

/// GET /api/admin/job-applications/:id
async fn get_job_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobApplication>> {
    Ok(Json(db::get_job_application(&state.db, &id).await?))
}

/// PUT /api/admin/job-applications/:id
#[axum::debug_handler]
async fn review_job_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<JobApplication>> {
    let input = db::ReviewJobApplication {
        status: parse_field("status", &request.status, JobApplicationStatus::from_str)?,
        admin_notes: request.admin_notes,
    };

    let application = db::review_job_application(&state.db, &id, input).await?;
    metrics::record_write("job_application", "update");
    info!(id = %application.id, status = %application.status, "Reviewed job application");

    Ok(Json(application))
}

/// DELETE /api/admin/job-applications/:id
async fn delete_job_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    db::delete_job_application(&state.db, &id).await?;
    metrics::record_write("job_application", "delete");
    info!(id = %id, "Deleted job application");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Contact messages
// ============================================================================

/// GET /api/admin/messages
async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Message>>> {
    let filter = MessageFilter {
        search: query.search_term(),
        status: parse_filter("status", &query.status, MessageStatus::from_str)?,
    };
    Ok(Json(db::list_messages(&state.db, &filter, query.page(&state)).await?))
}

/// GET /api/admin/messages/:id
async fn get_message(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Message>> {
    Ok(Json(db::get_message(&state.db, &id).await?))
}

/// PUT /api/admin/messages/:id
#[axum::debug_handler]
async fn review_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<Message>> {
    let input = db::ReviewMessage {
        status: parse_field("status", &request.status, MessageStatus::from_str)?,
        admin_notes: request.admin_notes,
    };

    let message = db::review_message(&state.db, &id, input).await?;
    metrics::record_write("message", "update");
    Ok(Json(message))
}

/// DELETE /api/admin/messages/:id
async fn delete_message(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    db::delete_message(&state.db, &id).await?;
    metrics::record_write("message", "delete");
    info!(id = %id, "Deleted message");
    Ok(StatusCode::NO_CONTENT)
}
