//! Event Routes (public)
//!
//! Routes:
//! - GET /api/events - Calendar split into upcoming and past
//! - GET /api/events/:id - Event details

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::{self, Event};
use crate::services::EventsOverview;
use crate::{AppState, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/:id", get(get_event))
}

/// GET /api/events
#[axum::debug_handler]
async fn list_events(State(state): State<AppState>) -> Result<Json<EventsOverview>> {
    Ok(Json(state.events.overview().await?))
}

/// GET /api/events/:id
async fn get_event(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Event>> {
    Ok(Json(db::get_event(&state.db, &id).await?))
}
