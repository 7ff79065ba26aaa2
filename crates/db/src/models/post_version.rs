//! Post version ledger model.
//!
//! Versions are immutable snapshots of post content, created on every
//! content mutation (including rollback) and never edited in place.

use penfolio_core::post::PostSnapshot;
use penfolio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `post_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostVersion {
    pub id: DbId,
    pub post_id: DbId,
    pub title_primary: String,
    pub title_secondary: Option<String>,
    pub content_primary: String,
    pub content_secondary: Option<String>,
    pub excerpt_primary: Option<String>,
    pub excerpt_secondary: Option<String>,
    pub cover_image: Option<String>,
    pub change_reason: Option<String>,
    pub version: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

impl PostVersion {
    /// The content snapshot this ledger entry preserves.
    pub fn snapshot(&self) -> PostSnapshot {
        PostSnapshot {
            title_primary: self.title_primary.clone(),
            title_secondary: self.title_secondary.clone(),
            content_primary: self.content_primary.clone(),
            content_secondary: self.content_secondary.clone(),
            excerpt_primary: self.excerpt_primary.clone(),
            excerpt_secondary: self.excerpt_secondary.clone(),
            cover_image: self.cover_image.clone(),
        }
    }
}

/// Query params for comparing two versions of a post, read in conventional
/// diff direction: changes going *from* the older version *to* the newer.
#[derive(Debug, serde::Deserialize)]
pub struct DiffSummaryRequest {
    /// The older version number.
    pub from: i32,
    /// The newer version number.
    pub to: i32,
}

/// Response for a field-level diff summary between two versions.
#[derive(Debug, Serialize)]
pub struct DiffSummaryResponse {
    pub post_id: DbId,
    pub from: i32,
    pub to: i32,
    /// Field families that differ, in display order.
    pub changed_fields: Vec<&'static str>,
    /// Human-readable summary, e.g. `"title changed, content changed"`.
    pub summary: String,
}

/// Response for a rollback: the updated live post plus the ledger entry
/// recorded for the rollback itself.
#[derive(Debug, Serialize)]
pub struct RollbackResponse {
    pub post: crate::models::post::Post,
    pub version: PostVersion,
}
