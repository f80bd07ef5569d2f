//! Announcement management.
//!
//! Routes:
//! - GET /api/admin/announcements - List (filters: announcement_type, search)
//! - POST /api/admin/announcements - Create
//! - GET /api/admin/announcements/:id - Details
//! - PUT /api/admin/announcements/:id - Update
//! - DELETE /api/admin/announcements/:id - Delete

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::api::{parse_field, parse_filter};
use crate::db::{self, Announcement, AnnouncementFilter};
use crate::models::{new_id, non_empty, AnnouncementType, Page, Paginated};
use crate::services::validation::{if_present, required};
use crate::{metrics, AppState, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_announcements).post(create_announcement))
        .route(
            "/:id",
            get(get_announcement)
                .put(update_announcement)
                .delete(delete_announcement),
        )
}

#[derive(Debug, Deserialize, Default)]
pub struct AnnouncementListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(alias = "q")]
    pub search: Option<String>,
    pub announcement_type: Option<String>,
    /// Only published rows when true
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub announcement_type: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub announcement_type: Option<String>,
    pub is_published: Option<bool>,
}

/// GET /api/admin/announcements
#[axum::debug_handler]
async fn list_announcements(
    State(state): State<AppState>,
    Query(query): Query<AnnouncementListQuery>,
) -> Result<Json<Paginated<Announcement>>> {
    let filter = AnnouncementFilter {
        search: non_empty(&query.search).map(str::to_string),
        announcement_type: parse_filter(
            "announcement_type",
            &query.announcement_type,
            AnnouncementType::from_str,
        )?,
        published_only: query.published.unwrap_or(false),
    };
    let page = Page::resolve(query.page, query.limit, &state.pagination);
    Ok(Json(db::list_announcements(&state.db, &filter, page).await?))
}

/// POST /api/admin/announcements
#[axum::debug_handler]
async fn create_announcement(
    State(state): State<AppState>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    let input = db::CreateAnnouncement {
        id: new_id(),
        title: required("title", request.title.as_deref())?,
        content: required("content", request.content.as_deref())?,
        announcement_type: parse_field(
            "announcement_type",
            &request.announcement_type,
            AnnouncementType::from_str,
        )?
        .unwrap_or_default(),
        is_published: request.is_published,
    };

    let announcement = db::create_announcement(&state.db, input).await?;
    metrics::record_write("announcement", "create");
    info!(id = %announcement.id, kind = %announcement.announcement_type, "Created announcement");

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// GET /api/admin/announcements/:id
async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Announcement>> {
    Ok(Json(db::get_announcement(&state.db, &id).await?))
}

/// PUT /api/admin/announcements/:id
#[axum::debug_handler]
async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>> {
    let input = db::UpdateAnnouncement {
        title: if_present("title", request.title)?,
        content: if_present("content", request.content)?,
        announcement_type: parse_field(
            "announcement_type",
            &request.announcement_type,
            AnnouncementType::from_str,
        )?,
        is_published: request.is_published,
    };

    let announcement = db::update_announcement(&state.db, &id, input).await?;
    metrics::record_write("announcement", "update");
    info!(id = %announcement.id, "Updated announcement");

    Ok(Json(announcement))
}

/// DELETE /api/admin/announcements/:id
async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    db::delete_announcement(&state.db, &id).await?;
    metrics::record_write("announcement", "delete");
    info!(id = %id, "Deleted announcement");
    Ok(StatusCode::NO_CONTENT)
}
