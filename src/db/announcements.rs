//! Announcement database queries.

use crate::models::{AnnouncementType, Page, Paginated};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

/// Announcement record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub announcement_type: String,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating an announcement.
#[derive(Debug, Clone)]
pub struct CreateAnnouncement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub is_published: bool,
}

/// Input for updating an announcement.
#[derive(Debug, Clone, Default)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub content: Option<String>,
    pub announcement_type: Option<AnnouncementType>,
    pub is_published: Option<bool>,
}

/// Filters for listing announcements.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementFilter {
    pub search: Option<String>,
    pub announcement_type: Option<AnnouncementType>,
    pub published_only: bool,
}

pub async fn create_announcement(
    pool: &DbPool,
    input: CreateAnnouncement,
) -> Result<Announcement> {
    sqlx::query_as::<_, Announcement>(
        r#"
        INSERT INTO announcements (id, title, content, announcement_type, is_published)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.announcement_type.as_str())
    .bind(input.is_published)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, "Announcement"))
}

pub async fn get_announcement(pool: &DbPool, id: &str) -> Result<Announcement> {
    sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Announcement not found: {}", id)))
}

pub async fn update_announcement(
    pool: &DbPool,
    id: &str,
    input: UpdateAnnouncement,
) -> Result<Announcement> {
    let assignments = Assignments::new()
        .text("title", input.title)
        .text("content", input.content)
        .text(
            "announcement_type",
            input.announcement_type.map(|t| t.as_str().to_string()),
        )
        .flag("is_published", input.is_published);

    if assignments.is_empty() {
        return get_announcement(pool, id).await;
    }

    assignments
        .apply::<Announcement>(pool, "announcements", id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Announcement not found: {}", id)))
}

pub async fn delete_announcement(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "announcements", id).await? {
        return Err(Error::NotFound(format!("Announcement not found: {}", id)));
    }
    Ok(())
}

/// List announcements, newest first.
pub async fn list_announcements(
    pool: &DbPool,
    filter: &AnnouncementFilter,
    page: Page,
) -> Result<Paginated<Announcement>> {
    let where_filter = ListFilter::new()
        .eq(
            "announcement_type",
            filter.announcement_type.map(|t| t.as_str()),
        )
        .search(&["title", "content"], filter.search.as_deref())
        .raw_if(filter.published_only, "is_published = 1");

    paginate(
        pool,
        "SELECT *",
        "FROM announcements",
        &where_filter,
        "created_at DESC, id DESC",
        page,
    )
    .await
}
