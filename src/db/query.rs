//! Dynamic SQL helpers shared by the entity query modules.
//!
//! List endpoints combine optional equality filters with a free-text
//! search, and PUT handlers only touch supplied columns. Both build SQL
//! fragments plus an ordered list of bindings.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

use super::DbPool;
use crate::models::{Page, Paginated};
use crate::Result;

// ============================================================================
// List filters
// ============================================================================

/// WHERE-clause builder for list queries.
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    clauses: Vec<String>,
    bindings: Vec<String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = ?` when `value` is present.
    pub fn eq(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.clauses.push(format!("{} = ?", column));
            self.bindings.push(value.to_string());
        }
        self
    }

    /// Case-insensitive equality, for free-form columns such as country.
    pub fn eq_ignore_case(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.clauses.push(format!("LOWER({}) = LOWER(?)", column));
            self.bindings.push(value.to_string());
        }
        self
    }

    /// Substring match of `term` against any of `columns`.
    pub fn search(mut self, columns: &[&str], term: Option<&str>) -> Self {
        let Some(term) = term else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(term));
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("{} LIKE ? ESCAPE '\\'", c))
            .collect();
        self.clauses.push(format!("({})", ors.join(" OR ")));
        for _ in columns {
            self.bindings.push(pattern.clone());
        }
        self
    }

    /// A clause with no bindings, e.g. `is_published = 1`.
    pub fn raw(mut self, clause: &str) -> Self {
        self.clauses.push(clause.to_string());
        self
    }

    /// A raw clause applied only when `enabled`.
    pub fn raw_if(self, enabled: bool, clause: &str) -> Self {
        if enabled {
            self.raw(clause)
        } else {
            self
        }
    }

    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Run a filtered, paginated list query and its matching COUNT.
///
/// `select` is the projection (`SELECT c.*, u.name AS ...`), `from` the
/// FROM/JOIN part shared by both statements.
pub async fn paginate<T>(
    pool: &DbPool,
    select: &str,
    from: &str,
    filter: &ListFilter,
    order_by: &str,
    page: Page,
) -> Result<Paginated<T>>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let where_sql = filter.where_sql();

    let count_sql = format!("SELECT COUNT(*) {} {}", from, where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for binding in filter.bindings() {
        count_q = count_q.bind(binding);
    }
    let total = count_q.fetch_one(pool).await?;

    let list_sql = format!(
        "{} {} {} ORDER BY {} LIMIT ? OFFSET ?",
        select, from, where_sql, order_by
    );
    let mut list_q = sqlx::query_as::<_, T>(&list_sql);
    for binding in filter.bindings() {
        list_q = list_q.bind(binding);
    }
    let rows = list_q
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(Paginated::new(rows, total, page))
}

// ============================================================================
// Partial updates
// ============================================================================

/// A typed value bound into an UPDATE statement.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i64>),
    Real(Option<f64>),
    Date(Option<NaiveDate>),
    Flag(bool),
}

/// SET-clause builder for partial updates. Only supplied fields are written.
#[derive(Debug, Default)]
pub struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<SqlValue>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a NOT NULL text column when supplied. Surrounding whitespace is dropped.
    pub fn text(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(SqlValue::Text(Some(value.trim().to_string())));
        }
        self
    }

    /// Set a nullable text column when supplied. A blank string clears it.
    pub fn nullable_text(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            let value = value.trim();
            let value = (!value.is_empty()).then(|| value.to_string());
            self.columns.push(column);
            self.values.push(SqlValue::Text(value));
        }
        self
    }

    /// `Some(None)` clears the column.
    pub fn nullable_int(mut self, column: &'static str, value: Option<Option<i64>>) -> Self {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(SqlValue::Int(value));
        }
        self
    }

    /// `Some(None)` clears the column.
    pub fn nullable_real(mut self, column: &'static str, value: Option<Option<f64>>) -> Self {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(SqlValue::Real(value));
        }
        self
    }

    /// `Some(None)` clears the column.
    pub fn nullable_date(mut self, column: &'static str, value: Option<Option<NaiveDate>>) -> Self {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(SqlValue::Date(value));
        }
        self
    }

    pub fn date(mut self, column: &'static str, value: Option<NaiveDate>) -> Self {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(SqlValue::Date(Some(value)));
        }
        self
    }

    pub fn flag(mut self, column: &'static str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(SqlValue::Flag(value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// `UPDATE {table} SET ... WHERE id = ? RETURNING *`.
    ///
    /// Returns `None` when no row has the id. Callers must check
    /// [`Assignments::is_empty`] first; an empty set only bumps `updated_at`.
    pub async fn apply<T>(self, pool: &DbPool, table: &str, id: &str) -> std::result::Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut sets: Vec<String> = self.columns.iter().map(|c| format!("{} = ?", c)).collect();
        sets.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? RETURNING *",
            table,
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in self.values {
            q = match value {
                SqlValue::Text(v) => q.bind(v),
                SqlValue::Int(v) => q.bind(v),
                SqlValue::Real(v) => q.bind(v),
                SqlValue::Date(v) => q.bind(v),
                SqlValue::Flag(v) => q.bind(v),
            };
        }
        q.bind(id).fetch_optional(pool).await
    }
}

/// Delete a row by id. Returns whether a row was removed.
pub async fn delete_by_id(pool: &DbPool, table: &str, id: &str) -> Result<bool> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
