//! Post snapshot type, content validation, and slug generation.
//!
//! A [`PostSnapshot`] is the full set of bilingual content fields that
//! describes a post at a point in time. The live `posts` row and every
//! `post_versions` row carry exactly these fields; rollback copies a
//! snapshot from the ledger back over the live row.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length for a post title (per locale).
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length for post content (per locale).
pub const MAX_CONTENT_LEN: usize = 500_000;

/// Maximum length for a post excerpt (per locale).
pub const MAX_EXCERPT_LEN: usize = 500;

/// The bilingual content fields of a post at a point in time.
///
/// The primary locale is mandatory; the secondary locale and all excerpt /
/// cover-image fields are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSnapshot {
    pub title_primary: String,
    pub title_secondary: Option<String>,
    pub content_primary: String,
    pub content_secondary: Option<String>,
    pub excerpt_primary: Option<String>,
    pub excerpt_secondary: Option<String>,
    pub cover_image: Option<String>,
}

/// Validate a snapshot before it is written to the content store or the
/// version ledger.
///
/// The primary-locale title and content must be non-empty; all fields are
/// bounded in length.
pub fn validate_snapshot(snapshot: &PostSnapshot) -> Result<(), CoreError> {
    validate_title(&snapshot.title_primary)?;
    if let Some(ref title) = snapshot.title_secondary {
        validate_secondary_title(title)?;
    }

    validate_content(&snapshot.content_primary)?;
    if let Some(ref content) = snapshot.content_secondary {
        validate_secondary_content(content)?;
    }

    for excerpt in [&snapshot.excerpt_primary, &snapshot.excerpt_secondary]
        .into_iter()
        .flatten()
    {
        validate_excerpt(excerpt)?;
    }

    Ok(())
}

/// Validate a primary-locale title (non-empty, bounded).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate primary-locale content (non-empty, bounded).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    if content.len() > MAX_CONTENT_LEN {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a secondary-locale title (bounded; may be empty).
pub fn validate_secondary_title(title: &str) -> Result<(), CoreError> {
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Secondary title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate secondary-locale content (bounded; may be empty).
pub fn validate_secondary_content(content: &str) -> Result<(), CoreError> {
    if content.len() > MAX_CONTENT_LEN {
        return Err(CoreError::Validation(format!(
            "Secondary content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an excerpt in either locale (bounded).
pub fn validate_excerpt(excerpt: &str) -> Result<(), CoreError> {
    if excerpt.len() > MAX_EXCERPT_LEN {
        return Err(CoreError::Validation(format!(
            "Excerpt must be at most {MAX_EXCERPT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a post slug (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Generate a URL-safe slug from the primary-locale title.
///
/// Converts to lowercase, replaces spaces and special characters with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive hyphens.
    let mut result = String::with_capacity(slug.len());
    let mut prev_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(title: &str, content: &str) -> PostSnapshot {
        PostSnapshot {
            title_primary: title.to_string(),
            title_secondary: None,
            content_primary: content.to_string(),
            content_secondary: None,
            excerpt_primary: None,
            excerpt_secondary: None,
            cover_image: None,
        }
    }

    // -- validate_snapshot ---------------------------------------------------

    #[test]
    fn snapshot_valid() {
        assert!(validate_snapshot(&snapshot("Hello", "world")).is_ok());
    }

    #[test]
    fn snapshot_empty_title_rejected() {
        assert!(validate_snapshot(&snapshot("", "world")).is_err());
        assert!(validate_snapshot(&snapshot("   ", "world")).is_err());
    }

    #[test]
    fn snapshot_empty_content_rejected() {
        assert!(validate_snapshot(&snapshot("Hello", "")).is_err());
        assert!(validate_snapshot(&snapshot("Hello", "  \n ")).is_err());
    }

    #[test]
    fn snapshot_optional_fields_may_be_absent() {
        let mut s = snapshot("Hello", "world");
        s.title_secondary = Some("Xin chào".to_string());
        s.excerpt_primary = Some("short".to_string());
        assert!(validate_snapshot(&s).is_ok());
    }

    #[test]
    fn snapshot_oversized_excerpt_rejected() {
        let mut s = snapshot("Hello", "world");
        s.excerpt_primary = Some("x".repeat(MAX_EXCERPT_LEN + 1));
        assert!(validate_snapshot(&s).is_err());
    }

    #[test]
    fn snapshot_oversized_secondary_title_rejected() {
        let mut s = snapshot("Hello", "world");
        s.title_secondary = Some("x".repeat(MAX_TITLE_LEN + 1));
        assert!(validate_snapshot(&s).is_err());
    }

    // -- validate_title / validate_content -----------------------------------

    #[test]
    fn title_too_long_rejected() {
        let long = "a".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_title(&long).is_err());
    }

    #[test]
    fn content_too_long_rejected() {
        let long = "x".repeat(MAX_CONTENT_LEN + 1);
        assert!(validate_content(&long).is_err());
    }

    // -- per-field optional validators ---------------------------------------

    #[test]
    fn secondary_fields_bounded_but_may_be_empty() {
        assert!(validate_secondary_title("").is_ok());
        assert!(validate_secondary_content("").is_ok());
        assert!(validate_secondary_title(&"a".repeat(MAX_TITLE_LEN + 1)).is_err());
        assert!(validate_secondary_content(&"x".repeat(MAX_CONTENT_LEN + 1)).is_err());
    }

    #[test]
    fn excerpt_bounded() {
        assert!(validate_excerpt("short").is_ok());
        assert!(validate_excerpt(&"x".repeat(MAX_EXCERPT_LEN + 1)).is_err());
    }

    // -- validate_slug -------------------------------------------------------

    #[test]
    fn slug_valid() {
        assert!(validate_slug("my-first-post").is_ok());
    }

    #[test]
    fn slug_empty_rejected() {
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn slug_uppercase_rejected() {
        assert!(validate_slug("My-Post").is_err());
    }

    // -- generate_slug -------------------------------------------------------

    #[test]
    fn slug_basic_title() {
        assert_eq!(generate_slug("My First Post"), "my-first-post");
    }

    #[test]
    fn slug_special_characters() {
        assert_eq!(
            generate_slug("Rust: Ownership & Borrowing (part 2)"),
            "rust-ownership-borrowing-part-2"
        );
    }

    #[test]
    fn slug_collapses_consecutive_hyphens() {
        assert_eq!(generate_slug("foo---bar"), "foo-bar");
    }

    #[test]
    fn slug_trims_leading_trailing_hyphens() {
        assert_eq!(generate_slug("--hello--"), "hello");
    }
}
