//! Data models for Unibridge.
//!
//! Closed vocabularies (course levels, announcement types, workflow
//! statuses) and the pagination types shared by every list endpoint.

mod catalog;
mod pagination;
mod status;

pub use catalog::*;
pub use pagination::*;
pub use status::*;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Generate a new UUID
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trimmed, non-empty view of an optional query value.
///
/// List filters arrive from HTML forms, which send `?status=` for "no
/// filter"; those are treated as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Distinguishes an explicit JSON `null` from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "models::nullable")]`:
/// absent is `None`, `null` is `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
