//! Announcement Routes (public)
//!
//! - GET /api/announcements - Published announcements, newest first

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::{self, Announcement, AnnouncementFilter};
use crate::models::{AnnouncementType, Page, Paginated};
use crate::{AppState, Result};

use super::parse_filter;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_published))
}

#[derive(Debug, Deserialize, Default)]
pub struct PublicAnnouncementQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub announcement_type: Option<String>,
}

async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<PublicAnnouncementQuery>,
) -> Result<Json<Paginated<Announcement>>> {
    let filter = AnnouncementFilter {
        search: None,
        announcement_type: parse_filter(
            "announcement_type",
            &query.announcement_type,
            AnnouncementType::from_str,
        )?,
        published_only: true,
    };
    let page = Page::resolve(query.page, query.limit, &state.pagination);
    Ok(Json(db::list_announcements(&state.db, &filter, page).await?))
}
