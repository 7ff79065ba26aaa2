//! Version-ledger helpers: change-reason labels and the field-level diff
//! summary shown next to each ledger entry.
//!
//! The ledger itself is append-only: every content mutation records a new
//! immutable snapshot with a strictly increasing per-post version number,
//! and rollback appends a new entry rather than rewinding the counter. The
//! persistence side of that contract lives in `penfolio-db`; this module
//! holds the pure pieces.

use crate::error::CoreError;
use crate::post::PostSnapshot;

/// Maximum length for a client-supplied change reason.
pub const MAX_CHANGE_REASON_LEN: usize = 500;

/// Change reason recorded for the first version of a post.
pub const INITIAL_CHANGE_REASON: &str = "Initial version";

/// Default change reason when an update supplies none.
pub const DEFAULT_CHANGE_REASON: &str = "Content updated";

/// Change reason recorded for a rollback entry, naming the restored version.
pub fn rollback_reason(target_version: i32) -> String {
    format!("Rolled back to version {target_version}")
}

/// Validate a client-supplied change reason (bounded, like every other
/// free-text field that ends up in a ledger row).
pub fn validate_change_reason(reason: &str) -> Result<(), CoreError> {
    if reason.len() > MAX_CHANGE_REASON_LEN {
        return Err(CoreError::Validation(format!(
            "Change reason must be at most {MAX_CHANGE_REASON_LEN} characters"
        )));
    }
    Ok(())
}

/// Compare two snapshots and report which field families differ.
///
/// Field families are `title`, `content`, `excerpt`, and `cover image`; a
/// family is reported once even if both locales changed. Returns
/// `"no changes"` when the snapshots are identical. Pure presentation
/// logic — nothing stored derives from this.
pub fn diff_summary(newer: &PostSnapshot, older: &PostSnapshot) -> String {
    let fields = changed_fields(newer, older);
    if fields.is_empty() {
        "no changes".to_string()
    } else {
        fields
            .iter()
            .map(|f| format!("{f} changed"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The field families that differ between two snapshots, in display order.
pub fn changed_fields(newer: &PostSnapshot, older: &PostSnapshot) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if newer.title_primary != older.title_primary || newer.title_secondary != older.title_secondary
    {
        fields.push("title");
    }
    if newer.content_primary != older.content_primary
        || newer.content_secondary != older.content_secondary
    {
        fields.push("content");
    }
    if newer.excerpt_primary != older.excerpt_primary
        || newer.excerpt_secondary != older.excerpt_secondary
    {
        fields.push("excerpt");
    }
    if newer.cover_image != older.cover_image {
        fields.push("cover image");
    }
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PostSnapshot {
        PostSnapshot {
            title_primary: "A".to_string(),
            title_secondary: Some("Á".to_string()),
            content_primary: "hello".to_string(),
            content_secondary: None,
            excerpt_primary: Some("short".to_string()),
            excerpt_secondary: None,
            cover_image: Some("/img/cover.png".to_string()),
        }
    }

    #[test]
    fn rollback_reason_names_target() {
        assert_eq!(rollback_reason(3), "Rolled back to version 3");
    }

    #[test]
    fn change_reason_bounded() {
        assert!(validate_change_reason("Fixed a typo").is_ok());
        assert!(validate_change_reason(&"x".repeat(MAX_CHANGE_REASON_LEN)).is_ok());
        assert!(validate_change_reason(&"x".repeat(MAX_CHANGE_REASON_LEN + 1)).is_err());
    }

    #[test]
    fn identical_snapshots_report_no_changes() {
        let s = snapshot();
        assert_eq!(diff_summary(&s, &s), "no changes");
        assert!(changed_fields(&s, &s).is_empty());
    }

    #[test]
    fn content_only_change_reports_exactly_content() {
        let older = snapshot();
        let mut newer = older.clone();
        newer.content_primary = "hello world".to_string();
        assert_eq!(diff_summary(&newer, &older), "content changed");
    }

    #[test]
    fn secondary_locale_change_reports_same_family_once() {
        let older = snapshot();
        let mut newer = older.clone();
        newer.title_primary = "B".to_string();
        newer.title_secondary = Some("É".to_string());
        assert_eq!(changed_fields(&newer, &older), vec!["title"]);
    }

    #[test]
    fn multiple_changes_listed_in_display_order() {
        let older = snapshot();
        let mut newer = older.clone();
        newer.title_primary = "B".to_string();
        newer.content_primary = "bye".to_string();
        newer.cover_image = None;
        assert_eq!(
            diff_summary(&newer, &older),
            "title changed, content changed, cover image changed"
        );
    }

    #[test]
    fn excerpt_change_detected() {
        let older = snapshot();
        let mut newer = older.clone();
        newer.excerpt_secondary = Some("tóm tắt".to_string());
        assert_eq!(changed_fields(&newer, &older), vec!["excerpt"]);
    }
}
