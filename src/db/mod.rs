//! Database layer for Unibridge.
//!
//! Provides SQLite connection pooling and query modules
//! for all domain entities.

mod announcements;
mod applications;
mod campuses;
mod courses;
mod events;
mod job_applications;
mod messages;
#[cfg(test)]
pub(crate) mod fixtures;
mod pool;
mod query;
mod scholarships;
mod universities;

// Re-export all query modules
pub use announcements::*;
pub use applications::*;
pub use campuses::*;
pub use courses::*;
pub use events::*;
pub use job_applications::*;
pub use messages::*;
pub use pool::*;
pub use query::{Assignments, ListFilter, SqlValue};
pub use scholarships::*;
pub use universities::*;

use crate::Result;
use tracing::info;

/// Type alias for the SQLite connection pool.
pub type DbPool = sqlx::SqlitePool;

/// Initialize the database connection pool.
///
/// Creates parent directories if needed and configures SQLite with
/// WAL journaling and foreign keys.
pub async fn init_pool(path: &str) -> Result<DbPool> {
    let pool = create_pool_with_config(path, PoolConfig::default()).await?;
    info!("Database pool initialized: {}", path);
    Ok(pool)
}

/// Open a private in-memory database with the schema applied.
pub async fn init_in_memory() -> Result<DbPool> {
    let pool = create_pool_with_config(":memory:", PoolConfig::test()).await?;
    initialize_schema(&pool).await?;
    Ok(pool)
}

/// Initialize the database schema.
///
/// Applies the complete schema from schema.sql. Uses IF NOT EXISTS
/// clauses so it's safe to run multiple times.
pub async fn initialize_schema(pool: &DbPool) -> Result<()> {
    let schema = include_str!("../../schema.sql");

    info!("Initializing database schema");

    // Split by semicolons and execute each statement
    for statement in schema.split(';') {
        // Strip comment lines, keeping only actual SQL
        let clean_stmt: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let clean_stmt = clean_stmt.trim();
        if clean_stmt.is_empty() {
            continue;
        }
        sqlx::query(clean_stmt).execute(pool).await?;
    }

    info!("Database schema initialized successfully");

    Ok(())
}
