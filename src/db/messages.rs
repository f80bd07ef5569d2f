//! Contact message database queries.

use crate::models::{MessageStatus, Page, Paginated};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

/// Contact message record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewMessage {
    pub status: Option<MessageStatus>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub search: Option<String>,
    pub status: Option<MessageStatus>,
}

pub async fn create_message(pool: &DbPool, input: CreateMessage) -> Result<Message> {
    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, name, email, phone, subject, message, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.subject)
    .bind(&input.message)
    .bind(MessageStatus::Unread.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, "Message"))
}

pub async fn get_message(pool: &DbPool, id: &str) -> Result<Message> {
    sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Message not found: {}", id)))
}

pub async fn review_message(pool: &DbPool, id: &str, input: ReviewMessage) -> Result<Message> {
    let assignments = Assignments::new()
        .text("status", input.status.map(|s| s.as_str().to_string()))
        .nullable_text("admin_notes", input.admin_notes);

    if assignments.is_empty() {
        return get_message(pool, id).await;
    }

    assignments
        .apply::<Message>(pool, "messages", id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Message not found: {}", id)))
}

pub async fn delete_message(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "messages", id).await? {
        return Err(Error::NotFound(format!("Message not found: {}", id)));
    }
    Ok(())
}

/// Number of messages nobody has opened yet.
pub async fn count_unread_messages(pool: &DbPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE status = ?")
        .bind(MessageStatus::Unread.as_str())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn list_messages(
    pool: &DbPool,
    filter: &MessageFilter,
    page: Page,
) -> Result<Paginated<Message>> {
    let where_filter = ListFilter::new()
        .eq("status", filter.status.map(|s| s.as_str()))
        .search(&["name", "email", "subject", "message"], filter.search.as_deref());

    paginate(
        pool,
        "SELECT *",
        "FROM messages",
        &where_filter,
        "created_at DESC, id DESC",
        page,
    )
    .await
}
