//! Study application database queries.

use crate::models::{ApplicationStatus, Page, Paginated};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

/// Application record, with the joined university and course names.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub university_id: Option<String>,
    pub course_id: Option<String>,
    pub intake: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,

    #[sqlx(default)]
    pub university_name: Option<String>,
    #[sqlx(default)]
    pub course_name: Option<String>,
}

/// Input for creating an application.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub university_id: Option<String>,
    pub course_id: Option<String>,
    pub intake: Option<String>,
    pub message: Option<String>,
}

/// Admin review update.
#[derive(Debug, Clone, Default)]
pub struct ReviewApplication {
    pub status: Option<ApplicationStatus>,
    pub admin_notes: Option<String>,
}

/// Filters for listing applications.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub search: Option<String>,
    pub status: Option<ApplicationStatus>,
}

const APPLICATION_SELECT: &str =
    "SELECT a.*, u.name AS university_name, c.name AS course_name";
const APPLICATION_FROM: &str = r#"
    FROM applications a
    LEFT JOIN universities u ON u.id = a.university_id
    LEFT JOIN courses c ON c.id = a.course_id
"#;

pub async fn create_application(pool: &DbPool, input: CreateApplication) -> Result<Application> {
    let id = input.id.clone();
    sqlx::query(
        r#"
        INSERT INTO applications
            (id, full_name, email, phone, nationality, university_id, course_id, intake, message, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.id)
    .bind(&input.full_name)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.nationality)
    .bind(&input.university_id)
    .bind(&input.course_id)
    .bind(&input.intake)
    .bind(&input.message)
    .bind(ApplicationStatus::Pending.as_str())
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, "Application"))?;

    get_application(pool, &id).await
}

pub async fn get_application(pool: &DbPool, id: &str) -> Result<Application> {
    let sql = format!("{} {} WHERE a.id = ?", APPLICATION_SELECT, APPLICATION_FROM);
    sqlx::query_as::<_, Application>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Application not found: {}", id)))
}

/// Update status and/or admin notes.
pub async fn review_application(
    pool: &DbPool,
    id: &str,
    input: ReviewApplication,
) -> Result<Application> {
    let assignments = Assignments::new()
        .text("status", input.status.map(|s| s.as_str().to_string()))
        .nullable_text("admin_notes", input.admin_notes);

    if !assignments.is_empty() {
        assignments
            .apply::<Application>(pool, "applications", id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Application not found: {}", id)))?;
    }

    get_application(pool, id).await
}

pub async fn delete_application(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "applications", id).await? {
        return Err(Error::NotFound(format!("Application not found: {}", id)));
    }
    Ok(())
}

/// List applications, newest first.
pub async fn list_applications(
    pool: &DbPool,
    filter: &ApplicationFilter,
    page: Page,
) -> Result<Paginated<Application>> {
    let where_filter = ListFilter::new()
        .eq("a.status", filter.status.map(|s| s.as_str()))
        .search(
            &["a.full_name", "a.email", "a.nationality", "u.name", "c.name"],
            filter.search.as_deref(),
        );

    paginate(
        pool,
        APPLICATION_SELECT,
        APPLICATION_FROM,
        &where_filter,
        "a.created_at DESC, a.id DESC",
        page,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fixtures, init_in_memory};

    fn sample(id: &str, name: &str) -> CreateApplication {
        CreateApplication {
            id: id.to_string(),
            full_name: name.to_string(),
            email: format!("{}@example.com", id),
            phone: None,
            nationality: Some("Nigerian".into()),
            university_id: None,
            course_id: None,
            intake: Some("September 2027".into()),
            message: None,
        }
    }

    #[tokio::test]
    async fn test_new_application_is_pending_with_names() {
        let pool = init_in_memory().await.unwrap();
        fixtures::university(&pool, "u-1", "Leeds", "United Kingdom").await;
        fixtures::course(&pool, "c-1", "MSc Finance", "u-1", "postgraduate").await;

        let mut input = sample("ap-1", "Ada Obi");
        input.university_id = Some("u-1".into());
        input.course_id = Some("c-1".into());
        let app = create_application(&pool, input).await.unwrap();

        assert_eq!(app.status, ApplicationStatus::Pending.as_str());
        assert_eq!(app.university_name.as_deref(), Some("Leeds"));
        assert_eq!(app.course_name.as_deref(), Some("MSc Finance"));
    }

    #[tokio::test]
    async fn test_review_and_filter_by_status() {
        let pool = init_in_memory().await.unwrap();
        create_application(&pool, sample("ap-1", "Ada Obi")).await.unwrap();
        create_application(&pool, sample("ap-2", "Kofi Mensah")).await.unwrap();

        let reviewed = review_application(
            &pool,
            "ap-2",
            ReviewApplication {
                status: Some(ApplicationStatus::Accepted),
                admin_notes: Some("Offer issued".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(reviewed.status, ApplicationStatus::Accepted.as_str());
        assert_eq!(reviewed.admin_notes.as_deref(), Some("Offer issued"));

        let accepted = list_applications(
            &pool,
            &ApplicationFilter {
                status: Some(ApplicationStatus::Accepted),
                ..Default::default()
            },
            Page { page: 1, limit: 10 },
        )
        .await
        .unwrap();
        assert_eq!(accepted.total, 1);
        assert_eq!(accepted.data[0].full_name, "Kofi Mensah");
    }

    #[tokio::test]
    async fn test_review_missing_application() {
        let pool = init_in_memory().await.unwrap();
        let result = review_application(
            &pool,
            "nope",
            ReviewApplication {
                status: Some(ApplicationStatus::Rejected),
                admin_notes: None,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
