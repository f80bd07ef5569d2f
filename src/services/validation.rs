//! Input checks applied before any write.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// A required text field: trimmed and non-empty.
pub fn required(field: &str, value: Option<&str>) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Validation(format!("{} is required", field)))
}

/// A required field on a partial update: absent is fine, blank is not.
pub fn if_present(field: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(v) => required(field, Some(&v)).map(Some),
        None => Ok(None),
    }
}

/// An optional text field: trimmed, blank becomes `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A required, syntactically valid email address (lowercased).
pub fn email(value: Option<&str>) -> Result<String> {
    let email = required("email", value)?;
    if !EMAIL_RE.is_match(&email) {
        return Err(Error::Validation(format!("Invalid email address: {}", email)));
    }
    Ok(email.to_lowercase())
}

/// URL-friendly slug: lowercase alphanumerics separated by single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(64);
    slug.trim_end_matches('-').to_string()
}

pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 64
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !s.starts_with('-')
        && !s.ends_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use rstest::rstest;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", Some("  Leeds ")).unwrap(), "Leeds");
        assert!(matches!(required("name", Some("   ")), Err(Error::Validation(_))));
        assert!(matches!(required("name", None), Err(Error::Validation(_))));
    }

    #[test]
    fn test_if_present() {
        assert_eq!(if_present("title", None).unwrap(), None);
        assert_eq!(if_present("title", Some(" Open day ".into())).unwrap(), Some("Open day".into()));
        assert!(if_present("title", Some("".into())).is_err());
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional(Some(" ".into())), None);
        assert_eq!(optional(Some(" Lagos ".into())), Some("Lagos".into()));
    }

    #[test]
    fn test_generated_emails_pass() {
        for _ in 0..20 {
            let address: String = SafeEmail().fake();
            assert!(email(Some(&address)).is_ok(), "{}", address);
        }
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("a@b")]
    #[case("two words@example.com")]
    fn test_bad_emails_rejected(#[case] input: &str) {
        assert!(matches!(email(Some(input)), Err(Error::Validation(_))));
    }

    #[rstest]
    #[case("University of Leeds", "university-of-leeds")]
    #[case("  King's College London ", "king-s-college-london")]
    #[case("École Polytechnique", "cole-polytechnique")]
    #[case("UCL (London)", "ucl-london")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        let slug = slugify(input);
        assert_eq!(slug, expected);
        assert!(is_valid_slug(&slug));
    }
}
