//! Job application database queries.

use crate::models::{JobApplicationStatus, Page, Paginated};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

/// Job application record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateJobApplication {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewJobApplication {
    pub status: Option<JobApplicationStatus>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct JobApplicationFilter {
    pub search: Option<String>,
    pub status: Option<JobApplicationStatus>,
    pub position: Option<String>,
}

pub async fn create_job_application(
    pool: &DbPool,
    input: CreateJobApplication,
) -> Result<JobApplication> {
    sqlx::query_as::<_, JobApplication>(
        r#"
        INSERT INTO job_applications
            (id, full_name, email, phone, position, cover_letter, resume_url, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.full_name)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.position)
    .bind(&input.cover_letter)
    .bind(&input.resume_url)
    .bind(JobApplicationStatus::Pending.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, "Job application"))
}

pub async fn get_job_application(pool: &DbPool, id: &str) -> Result<JobApplication> {
    sqlx::query_as::<_, JobApplication>("SELECT * FROM job_applications WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Job application not found: {}", id)))
}

pub async fn review_job_application(
    pool: &DbPool,
    id: &str,
    input: ReviewJobApplication,
) -> Result<JobApplication> {
    let assignments = Assignments::new()
        .text("status", input.status.map(|s| s.as_str().to_string()))
        .nullable_text("admin_notes", input.admin_notes);

    if assignments.is_empty() {
        return get_job_application(pool, id).await;
    }

    assignments
        .apply::<JobApplication>(pool, "job_applications", id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Job application not found: {}", id)))
}

pub async fn delete_job_application(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "job_applications", id).await? {
        return Err(Error::NotFound(format!("Job application not found: {}", id)));
    }
    Ok(())
}

pub async fn list_job_applications(
    pool: &DbPool,
    filter: &JobApplicationFilter,
    page: Page,
) -> Result<Paginated<JobApplication>> {
    let where_filter = ListFilter::new()
        .eq("status", filter.status.map(|s| s.as_str()))
        .eq_ignore_case("position", filter.position.as_deref())
        .search(&["full_name", "email", "position"], filter.search.as_deref());

    paginate(
        pool,
        "SELECT *",
        "FROM job_applications",
        &where_filter,
        "created_at DESC, id DESC",
        page,
    )
    .await
}
