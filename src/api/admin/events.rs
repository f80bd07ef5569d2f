//! Event management.
//!
//! Routes:
//! - GET /api/admin/events - List, newest date first
//! - POST /api/admin/events - Create
//! - GET/PUT/DELETE /api/admin/events/:id

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::api::ListQuery;
use crate::db::{self, Event};
use crate::models::{new_id, Paginated};
use crate::services::validation::{if_present, optional, required};
use crate::{metrics, AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
}

/// GET /api/admin/events
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Event>>> {
    let search = query.search_term();
    let result = db::list_events(&state.db, search.as_deref(), query.page(&state)).await?;
    Ok(Json(result))
}

/// POST /api/admin/events
async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let input = db::CreateEvent {
        id: new_id(),
        title: required("title", request.title.as_deref())?,
        event_date: request
            .event_date
            .ok_or_else(|| Error::Validation("event_date is required".into()))?,
        location: optional(request.location),
        description: optional(request.description),
        image_url: optional(request.image_url),
        registration_url: optional(request.registration_url),
    };

    let event = db::create_event(&state.db, input).await?;
    metrics::record_write("event", "create");
    info!(id = %event.id, date = %event.event_date, "Created event");

    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/admin/events/:id
async fn get_event(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Event>> {
    Ok(Json(db::get_event(&state.db, &id).await?))
}

/// PUT /api/admin/events/:id
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>> {
    let input = db::UpdateEvent {
        title: if_present("title", request.title)?,
        event_date: request.event_date,
        location: request.location,
        description: request.description,
        image_url: request.image_url,
        registration_url: request.registration_url,
    };

    let event = db::update_event(&state.db, &id, input).await?;
    metrics::record_write("event", "update");
    Ok(Json(event))
}

/// DELETE /api/admin/events/:id
async fn delete_event(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    db::delete_event(&state.db, &id).await?;
    metrics::record_write("event", "delete");
    info!(id = %id, "Deleted event");
    Ok(StatusCode::NO_CONTENT)
}
