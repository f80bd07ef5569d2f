//! Course database queries.
//!
//! Course reads always join the owning university (and campus, when set)
//! so list views can show where a course is taught without extra calls.

use crate::models::{Page, Paginated};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

// ============================================================================
// Types
// ============================================================================

/// Course record, with the joined university and campus names.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub university_id: String,
    pub campus_id: Option<String>,
    pub level: String,
    pub subject: Option<String>,
    pub duration: Option<String>,
    pub tuition_fee: Option<f64>,
    pub currency: Option<String>,
    pub intake: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,

    /// Joined from universities (absent on RETURNING rows)
    #[sqlx(default)]
    pub university_name: Option<String>,
    #[sqlx(default)]
    pub university_country: Option<String>,
    #[sqlx(default)]
    pub campus_name: Option<String>,
}

/// Input for creating a course.
#[derive(Debug, Clone)]
pub struct CreateCourse {
    pub id: String,
    pub name: String,
    pub university_id: String,
    pub campus_id: Option<String>,
    pub level: String,
    pub subject: Option<String>,
    pub duration: Option<String>,
    pub tuition_fee: Option<f64>,
    pub currency: Option<String>,
    pub intake: Option<String>,
    pub description: Option<String>,
}

/// Input for updating a course.
#[derive(Debug, Clone, Default)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub university_id: Option<String>,
    pub campus_id: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub duration: Option<String>,
    pub tuition_fee: Option<Option<f64>>,
    pub currency: Option<String>,
    pub intake: Option<String>,
    pub description: Option<String>,
}

/// Filters for listing courses.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub university_id: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub country: Option<String>,
}

const COURSE_SELECT: &str = r#"
    SELECT c.*,
           u.name AS university_name,
           u.country AS university_country,
           cp.name AS campus_name
"#;

const COURSE_FROM: &str = r#"
    FROM courses c
    INNER JOIN universities u ON u.id = c.university_id
    LEFT JOIN campuses cp ON cp.id = c.campus_id
"#;

// ============================================================================
// Queries
// ============================================================================

/// Create a new course.
pub async fn create_course(pool: &DbPool, input: CreateCourse) -> Result<Course> {
    let id = input.id.clone();
    sqlx::query(
        r#"
        INSERT INTO courses
            (id, name, university_id, campus_id, level, subject, duration,
             tuition_fee, currency, intake, description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.id)
    .bind(&input.name)
    .bind(&input.university_id)
    .bind(&input.campus_id)
    .bind(&input.level)
    .bind(&input.subject)
    .bind(&input.duration)
    .bind(input.tuition_fee)
    .bind(&input.currency)
    .bind(&input.intake)
    .bind(&input.description)
    .execute(pool)
    .await
    .map_err(|e| Error::from_write(e, "Course"))?;

    get_course(pool, &id).await
}

/// Get a course by ID.
pub async fn get_course(pool: &DbPool, id: &str) -> Result<Course> {
    let sql = format!("{} {} WHERE c.id = ?", COURSE_SELECT, COURSE_FROM);
    sqlx::query_as::<_, Course>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Course not found: {}", id)))
}

/// Update a course.
pub async fn update_course(pool: &DbPool, id: &str, input: UpdateCourse) -> Result<Course> {
    let assignments = Assignments::new()
        .text("name", input.name)
        .text("university_id", input.university_id)
        .nullable_text("campus_id", input.campus_id)
        .text("level", input.level)
        .nullable_text("subject", input.subject)
        .nullable_text("duration", input.duration)
        .nullable_real("tuition_fee", input.tuition_fee)
        .nullable_text("currency", input.currency)
        .nullable_text("intake", input.intake)
        .nullable_text("description", input.description);

    if !assignments.is_empty() {
        assignments
            .apply::<Course>(pool, "courses", id)
            .await
            .map_err(|e| Error::from_write(e, "Course"))?
            .ok_or_else(|| Error::NotFound(format!("Course not found: {}", id)))?;
    }

    get_course(pool, id).await
}

/// Delete a course.
pub async fn delete_course(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "courses", id).await? {
        return Err(Error::NotFound(format!("Course not found: {}", id)));
    }
    Ok(())
}

/// List courses with their university, newest first.
pub async fn list_courses(
    pool: &DbPool,
    filter: &CourseFilter,
    page: Page,
) -> Result<Paginated<Course>> {
    let where_filter = ListFilter::new()
        .eq("c.university_id", filter.university_id.as_deref())
        .eq("c.level", filter.level.as_deref())
        .eq_ignore_case("c.subject", filter.subject.as_deref())
        .eq_ignore_case("u.country", filter.country.as_deref())
        .search(
            &["c.name", "c.subject", "u.name"],
            filter.search.as_deref(),
        );

    paginate(
        pool,
        COURSE_SELECT,
        COURSE_FROM,
        &where_filter,
        "c.created_at DESC, c.name ASC",
        page,
    )
    .await
}
