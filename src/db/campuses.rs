//! Campus database queries.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::query::{delete_by_id, Assignments};
use super::DbPool;

/// Campus record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Campus {
    pub id: String,
    pub university_id: String,
    pub name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a campus.
#[derive(Debug, Clone)]
pub struct CreateCampus {
    pub id: String,
    pub university_id: String,
    pub name: String,
    pub city: Option<String>,
    pub address: Option<String>,
}

/// Input for updating a campus.
#[derive(Debug, Clone, Default)]
pub struct UpdateCampus {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

pub async fn create_campus(pool: &DbPool, input: CreateCampus) -> Result<Campus> {
    sqlx::query_as::<_, Campus>(
        r#"
        INSERT INTO campuses (id, university_id, name, city, address)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.university_id)
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.address)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, "Campus"))
}

pub async fn get_campus(pool: &DbPool, id: &str) -> Result<Campus> {
    sqlx::query_as::<_, Campus>("SELECT * FROM campuses WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Campus not found: {}", id)))
}

/// List the campuses of a university by name.
pub async fn list_campuses(pool: &DbPool, university_id: &str) -> Result<Vec<Campus>> {
    sqlx::query_as::<_, Campus>(
        "SELECT * FROM campuses WHERE university_id = ? ORDER BY name ASC",
    )
    .bind(university_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}

pub async fn update_campus(pool: &DbPool, id: &str, input: UpdateCampus) -> Result<Campus> {
    let assignments = Assignments::new()
        .text("name", input.name)
        .nullable_text("city", input.city)
        .nullable_text("address", input.address);

    if assignments.is_empty() {
        return get_campus(pool, id).await;
    }

    assignments
        .apply::<Campus>(pool, "campuses", id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Campus not found: {}", id)))
}

pub async fn delete_campus(pool: &DbPool, id: &str) -> Result<()> {
    if !delete_by_id(pool, "campuses", id).await? {
        return Err(Error::NotFound(format!("Campus not found: {}", id)));
    }
    Ok(())
}
