//! University database queries.
//!
//! Universities are the anchor of the catalog: courses, campuses and
//! scholarships hang off them.

use crate::models::{Page, Paginated};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, paginate, Assignments, ListFilter};
use super::DbPool;

// ============================================================================
// Types
// ============================================================================

/// University record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct University {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub country: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub ranking: Option<i64>,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a new university.
#[derive(Debug, Clone)]
pub struct CreateUniversity {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub country: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub ranking: Option<i64>,
    pub is_featured: bool,
}

/// Input for updating a university.
#[derive(Debug, Clone, Default)]
pub struct UpdateUniversity {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub ranking: Option<Option<i64>>,
    pub is_featured: Option<bool>,
}

/// Filters for listing universities.
#[derive(Debug, Clone, Default)]
pub struct UniversityFilter {
    pub search: Option<String>,
    pub country: Option<String>,
    pub featured_only: bool,
}

/// A country with the number of universities in it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountrySummary {
    pub country: String,
    pub university_count: i64,
}

// ============================================================================
// Queries
// ============================================================================

/// Create a new university.
pub async fn create_university(pool: &DbPool, input: CreateUniversity) -> Result<University> {
    sqlx::query_as::<_, University>(
        r#"
        INSERT INTO universities
            (id, name, slug, country, city, description, logo_url, website, ranking, is_featured)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.name)
    .bind(&input.slug)
    .bind(&input.country)
    .bind(&input.city)
    .bind(&input.description)
    .bind(&input.logo_url)
    .bind(&input.website)
    .bind(input.ranking)
    .bind(input.is_featured)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, &format!("University with slug '{}'", input.slug)))
}

/// Get a university by ID.
pub async fn get_university(pool: &DbPool, id: &str) -> Result<University> {
    sqlx::query_as::<_, University>("SELECT * FROM universities WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("University not found: {}", id)))
}

/// Get a university by ID or slug.
pub async fn get_university_by_id_or_slug(pool: &DbPool, id_or_slug: &str) -> Result<University> {
    sqlx::query_as::<_, University>("SELECT * FROM universities WHERE id = ? OR slug = ?")
        .bind(id_or_slug)
        .bind(id_or_slug)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("University not found: {}", id_or_slug)))
}

/// Check whether a slug is free.
pub async fn is_university_slug_available(pool: &DbPool, slug: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM universities WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(count == 0)
}

/// Update a university.
pub async fn update_university(
    pool: &DbPool,
    id: &str,
    input: UpdateUniversity,
) -> Result<University> {
    let assignments = Assignments::new()
        .text("name", input.name)
        .text("slug", input.slug)
        .text("country", input.country)
        .nullable_text("city", input.city)
        .nullable_text("description", input.description)
        .nullable_text("logo_url", input.logo_url)
        .nullable_text("website", input.website)
        .nullable_int("ranking", input.ranking)
        .flag("is_featured", input.is_featured);

    if assignments.is_empty() {
        return get_university(pool, id).await;
    }

    assignments
        .apply::<University>(pool, "universities", id)
        .await
        .map_err(|e| Error::from_write(e, "University slug"))?
        .ok_or_else(|| Error::NotFound(format!("University not found: {}", id)))
}

/// Delete a university. Its campuses and courses go with it.
pub async fn delete_university(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "universities", id).await? {
        return Err(Error::NotFound(format!("University not found: {}", id)));
    }
    Ok(())
}

/// List universities, featured and best-ranked first.
pub async fn list_universities(
    pool: &DbPool,
    filter: &UniversityFilter,
    page: Page,
) -> Result<Paginated<University>> {
    let where_filter = ListFilter::new()
        .eq_ignore_case("country", filter.country.as_deref())
        .search(&["name", "city", "country"], filter.search.as_deref())
        .raw_if(filter.featured_only, "is_featured = 1");

    paginate(
        pool,
        "SELECT *",
        "FROM universities",
        &where_filter,
        "is_featured DESC, ranking IS NULL, ranking ASC, name ASC",
        page,
    )
    .await
}

/// Count courses offered by a university.
pub async fn count_university_courses(pool: &DbPool, university_id: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE university_id = ?")
        .bind(university_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Distinct countries that have at least one university, by name.
pub async fn list_countries(pool: &DbPool) -> Result<Vec<CountrySummary>> {
    sqlx::query_as::<_, CountrySummary>(
        r#"
        SELECT country, COUNT(*) AS university_count
        FROM universities
        GROUP BY country
        ORDER BY country ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;

    fn sample(id: &str, name: &str, country: &str) -> CreateUniversity {
        CreateUniversity {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            country: country.to_string(),
            city: None,
            description: None,
            logo_url: None,
            website: None,
            ranking: None,
            is_featured: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_slug() {
        let pool = init_in_memory().await.unwrap();
        create_university(&pool, sample("u-1", "Oxford Brookes", "United Kingdom"))
            .await
            .unwrap();

        let by_slug = get_university_by_id_or_slug(&pool, "oxford-brookes").await.unwrap();
        assert_eq!(by_slug.id, "u-1");
        assert!(!by_slug.is_featured);
    }

    #[tokio::test]
    async fn test_duplicate_slug_error() {
        let pool = init_in_memory().await.unwrap();
        create_university(&pool, sample("u-1", "Deakin", "Australia")).await.unwrap();

        let result = create_university(&pool, sample("u-2", "Deakin", "Australia")).await;
        assert!(matches!(result, Err(Error::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_list_filters_and_countries() {
        let pool = init_in_memory().await.unwrap();
        create_university(&pool, sample("u-1", "Deakin", "Australia")).await.unwrap();
        create_university(&pool, sample("u-2", "Monash", "Australia")).await.unwrap();
        create_university(&pool, sample("u-3", "Leeds", "United Kingdom")).await.unwrap();

        let page = Page { page: 1, limit: 10 };
        let filter = UniversityFilter {
            country: Some("australia".into()),
            ..Default::default()
        };
        let result = list_universities(&pool, &filter, page).await.unwrap();
        assert_eq!(result.total, 2);

        let countries = list_countries(&pool).await.unwrap();
        assert_eq!(
            countries,
            vec![
                CountrySummary { country: "Australia".into(), university_count: 2 },
                CountrySummary { country: "United Kingdom".into(), university_count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_update_partial_and_delete() {
        let pool = init_in_memory().await.unwrap();
        create_university(&pool, sample("u-1", "Leeds", "United Kingdom")).await.unwrap();

        let updated = update_university(
            &pool,
            "u-1",
            UpdateUniversity {
                ranking: Some(Some(75)),
                is_featured: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.ranking, Some(75));
        assert!(updated.is_featured);
        assert_eq!(updated.name, "Leeds");

        delete_university(&pool, "u-1").await.unwrap();
        assert!(matches!(
            delete_university(&pool, "u-1").await,
            Err(Error::NotFound(_))
        ));
    }
}
