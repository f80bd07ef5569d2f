//! Catalog rules that span more than one table.

use crate::db::{self, DbPool};
use crate::{Error, Result};

use super::validation::slugify;

/// A free slug for a university name: `name`, then `name-2`, `name-3`, ...
pub async fn unique_university_slug(pool: &DbPool, name: &str) -> Result<String> {
    let base = slugify(name);
    if base.is_empty() {
        return Err(Error::Validation(format!(
            "Cannot derive a slug from name '{}'",
            name
        )));
    }

    if db::is_university_slug_available(pool, &base).await? {
        return Ok(base);
    }

    for n in 2..1000 {
        let candidate = format!("{}-{}", base, n);
        if db::is_university_slug_available(pool, &candidate).await? {
            return Ok(candidate);
        }
    }

    Err(Error::AlreadyExists(format!("University slug '{}'", base)))
}

/// Check that a course's university exists and that its campus, when set,
/// belongs to that university.
pub async fn check_course_placement(
    pool: &DbPool,
    university_id: &str,
    campus_id: Option<&str>,
) -> Result<()> {
    db::get_university(pool, university_id)
        .await
        .map_err(|e| match e {
            Error::NotFound(_) => {
                Error::Validation(format!("University does not exist: {}", university_id))
            }
            other => other,
        })?;

    if let Some(campus_id) = campus_id {
        let campus = db::get_campus(pool, campus_id).await.map_err(|e| match e {
            Error::NotFound(_) => Error::Validation(format!("Campus does not exist: {}", campus_id)),
            other => other,
        })?;
        if campus.university_id != university_id {
            return Err(Error::Validation(format!(
                "Campus {} does not belong to university {}",
                campus_id, university_id
            )));
        }
    }

    Ok(())
}
