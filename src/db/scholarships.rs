//! Scholarship database queries.

use crate::models::{Page, Paginated};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

/// Scholarship record, with the joined university name when linked.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: String,
    pub title: String,
    pub university_id: Option<String>,
    pub country: Option<String>,
    pub amount: Option<String>,
    pub level: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub eligibility: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,

    #[sqlx(default)]
    pub university_name: Option<String>,
}

/// Input for creating a scholarship.
#[derive(Debug, Clone)]
pub struct CreateScholarship {
    pub id: String,
    pub title: String,
    pub university_id: Option<String>,
    pub country: Option<String>,
    pub amount: Option<String>,
    pub level: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub eligibility: Option<String>,
    pub description: Option<String>,
}

/// Input for updating a scholarship.
#[derive(Debug, Clone, Default)]
pub struct UpdateScholarship {
    pub title: Option<String>,
    pub university_id: Option<String>,
    pub country: Option<String>,
    pub amount: Option<String>,
    pub level: Option<String>,
    pub deadline: Option<Option<NaiveDate>>,
    pub eligibility: Option<String>,
    pub description: Option<String>,
}

/// Filters for listing scholarships.
#[derive(Debug, Clone, Default)]
pub struct ScholarshipFilter {
    pub search: Option<String>,
    pub country: Option<String>,
    pub level: Option<String>,
}

const SCHOLARSHIP_SELECT: &str = "SELECT s.*, u.name AS university_name";
const SCHOLARSHIP_FROM: &str =
    "FROM scholarships s LEFT JOIN universities u ON u.id = s.university_id";

pub async fn create_scholarship(pool: &DbPool, input: CreateScholarship) -> Result<Scholarship> {
    let id = input.id.clone();
    sqlx::query(
        r#"
        INSERT INTO scholarships
            (id, title, university_id, country, amount, level, deadline, eligibility, description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.id)
    .bind(&input.title)
    .bind(&input.university_id)
    .bind(&input.country)
    .bind(&input.amount)
    .bind(&input.level)
    .bind(input.deadline)
    .bind(&input.eligibility)
    .bind(&input.description)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, "Scholarship"))?;

    get_scholarship(pool, &id).await
}

pub async fn get_scholarship(pool: &DbPool, id: &str) -> Result<Scholarship> {
    let sql = format!("{} {} WHERE s.id = ?", SCHOLARSHIP_SELECT, SCHOLARSHIP_FROM);
    sqlx::query_as::<_, Scholarship>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Scholarship not found: {}", id)))
}

pub async fn update_scholarship(
    pool: &DbPool,
    id: &str,
    input: UpdateScholarship,
) -> Result<Scholarship> {
    let assignments = Assignments::new()
        .text("title", input.title)
        .nullable_text("university_id", input.university_id)
        .nullable_text("country", input.country)
        .nullable_text("amount", input.amount)
        .nullable_text("level", input.level)
        .nullable_date("deadline", input.deadline)
        .nullable_text("eligibility", input.eligibility)
        .nullable_text("description", input.description);

    if !assignments.is_empty() {
        assignments
            .apply::<Scholarship>(pool, "scholarships", id)
            .await
            .map_err(|e| Error::from_write(e, "Scholarship"))?
            .ok_or_else(|| Error::NotFound(format!("Scholarship not found: {}", id)))?;
    }

    get_scholarship(pool, id).await
}

pub async fn delete_scholarship(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "scholarships", id).await? {
        return Err(Error::NotFound(format!("Scholarship not found: {}", id)));
    }
    Ok(())
}

/// List scholarships, closest deadline first; open-ended ones last.
pub async fn list_scholarships(
    pool: &DbPool,
    filter: &ScholarshipFilter,
    page: Page,
) -> Result<Paginated<Scholarship>> {
    let where_filter = ListFilter::new()
        .eq_ignore_case("s.country", filter.country.as_deref())
        .eq_ignore_case("s.level", filter.level.as_deref())
        .search(
            &["s.title", "s.description", "s.eligibility", "u.name"],
            filter.search.as_deref(),
        );

    paginate(
        pool,
        SCHOLARSHIP_SELECT,
        SCHOLARSHIP_FROM,
        &where_filter,
        "s.deadline IS NULL, s.deadline ASC, s.title ASC",
        page,
    )
    .await
}
