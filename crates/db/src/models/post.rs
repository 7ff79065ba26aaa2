//! Post entity and DTO models.

use penfolio_core::post::PostSnapshot;
use penfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `posts` table — the live content store.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub slug: String,
    pub title_primary: String,
    pub title_secondary: Option<String>,
    pub content_primary: String,
    pub content_secondary: Option<String>,
    pub excerpt_primary: Option<String>,
    pub excerpt_secondary: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    /// The content snapshot currently live for this post.
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

/// DTO for creating a new post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title_primary: String,
    pub title_secondary: Option<String>,
    pub content_primary: String,
    pub content_secondary: Option<String>,
    pub excerpt_primary: Option<String>,
    pub excerpt_secondary: Option<String>,
    pub cover_image: Option<String>,
    /// Auto-generated from `title_primary` if `None`.
    pub slug: Option<String>,
    pub is_published: Option<bool>,
}

impl CreatePost {
    /// The snapshot that becomes both the live row and version 1.
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

/// DTO for partially updating a post. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePost {
    pub title_primary: Option<String>,
    pub title_secondary: Option<String>,
    pub content_primary: Option<String>,
    pub content_secondary: Option<String>,
    pub excerpt_primary: Option<String>,
    pub excerpt_secondary: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: Option<bool>,
    /// Recorded on the new ledger entry; defaults to "Content updated".
    pub change_reason: Option<String>,
}

impl UpdatePost {
    /// Whether this patch touches any snapshot field, and therefore must
    /// record a new ledger entry. Publication state is not part of the
    /// snapshot.
    pub fn touches_snapshot(&self) -> bool {
        self.title_primary.is_some()
            || self.title_secondary.is_some()
            || self.content_primary.is_some()
            || self.content_secondary.is_some()
            || self.excerpt_primary.is_some()
            || self.excerpt_secondary.is_some()
            || self.cover_image.is_some()
    }
}
