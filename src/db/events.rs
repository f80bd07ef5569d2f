//! Event database queries.

use crate::models::{Page, Paginated};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

/// Event record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub id: String,
    pub title: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
}

/// Input for updating an event.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
}

pub async fn create_event(pool: &DbPool, input: CreateEvent) -> Result<Event> {
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events
            (id, title, event_date, location, description, image_url, registration_url)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.title)
    .bind(input.event_date)
    .bind(&input.location)
    .bind(&input.description)
    .bind(&input.image_url)
    .bind(&input.registration_url)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, "Event"))
}

pub async fn get_event(pool: &DbPool, id: &str) -> Result<Event> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Event not found: {}", id)))
}

pub async fn update_event(pool: &DbPool, id: &str, input: UpdateEvent) -> Result<Event> {
    let assignments = Assignments::new()
        .text("title", input.title)
        .date("event_date", input.event_date)
        .nullable_text("location", input.location)
        .nullable_text("description", input.description)
        .nullable_text("image_url", input.image_url)
        .nullable_text("registration_url", input.registration_url);

    if assignments.is_empty() {
        return get_event(pool, id).await;
    }

    assignments
        .apply::<Event>(pool, "events", id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Event not found: {}", id)))
}

pub async fn delete_event(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "events", id).await? {
        return Err(Error::NotFound(format!("Event not found: {}", id)));
    }
    Ok(())
}

/// All events, newest date first.
///
/// This ordering is what the upcoming/past partition relies on.
pub async fn list_events_newest_first(pool: &DbPool) -> Result<Vec<Event>> {
    sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_date DESC, created_at DESC")
        .fetch_all(pool)
        .await
        .map_err(Error::Database)
}

/// Paginated events for the admin list, newest date first.
pub async fn list_events(
    pool: &DbPool,
    search: Option<&str>,
    page: Page,
) -> Result<Paginated<Event>> {
    let filter = ListFilter::new().search(&["title", "location", "description"], search);
    paginate(
        pool,
        "SELECT *",
        "FROM events",
        &filter,
        "event_date DESC, created_at DESC",
        page,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;

    fn sample(id: &str, date: (i32, u32, u32)) -> CreateEvent {
        CreateEvent {
            id: id.to_string(),
            title: format!("Event {}", id),
            event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            location: None,
            description: None,
            image_url: None,
            registration_url: None,
        }
    }

    #[tokio::test]
    async fn test_events_come_back_newest_first() {
        let pool = init_in_memory().await.unwrap();
        create_event(&pool, sample("a", (2024, 3, 1))).await.unwrap();
        create_event(&pool, sample("b", (2026, 1, 20))).await.unwrap();
        create_event(&pool, sample("c", (2025, 7, 9))).await.unwrap();

        let events = list_events_newest_first(&pool).await.unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_update_event_date() {
        let pool = init_in_memory().await.unwrap();
        create_event(&pool, sample("a", (2024, 3, 1))).await.unwrap();

        let moved = update_event(
            &pool,
            "a",
            UpdateEvent {
                event_date: NaiveDate::from_ymd_opt(2024, 4, 2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(moved.event_date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(moved.title, "Event a");
    }
}
