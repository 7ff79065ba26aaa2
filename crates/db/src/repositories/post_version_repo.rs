//! Repository for the `post_versions` table — the append-only version ledger.
//!
//! Ledger entries are immutable: this repository only inserts and reads,
//! never updates or deletes. Rows disappear solely via cascade when the
//! parent post is deleted.

use penfolio_core::post::PostSnapshot;
use penfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::post_version::PostVersion;

/// Column list for post_versions queries.
const COLUMNS: &str = "id, post_id, title_primary, title_secondary, content_primary, \
    content_secondary, excerpt_primary, excerpt_secondary, cover_image, change_reason, \
    version, created_by, created_at";

/// Provides append and read operations for post version snapshots.
pub struct PostVersionRepo;

impl PostVersionRepo {
    /// Append a new version snapshot, assigning the next version number for
    /// the post in the same statement.
    ///
    /// The number is `COALESCE(MAX(version), 0) + 1` computed inside the
    /// INSERT, so there is no read-then-write window; a concurrent insert
    /// for the same post trips `uq_post_versions_post_id_version` instead
    /// of silently duplicating a number. Accepts any executor so callers
    /// can run it inside a transaction.
    pub async fn create<'e, E>(
        executor: E,
        post_id: DbId,
        snapshot: &PostSnapshot,
        change_reason: Option<&str>,
        created_by: Option<DbId>,
    ) -> Result<PostVersion, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO post_versions
                (post_id, title_primary, title_secondary, content_primary, content_secondary,
                 excerpt_primary, excerpt_secondary, cover_image, change_reason, version, created_by)
             VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9,
                (SELECT COALESCE(MAX(version), 0) + 1 FROM post_versions WHERE post_id = $1),
                $10
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PostVersion>(&query)
            .bind(post_id)
            .bind(&snapshot.title_primary)
            .bind(&snapshot.title_secondary)
            .bind(&snapshot.content_primary)
            .bind(&snapshot.content_secondary)
            .bind(&snapshot.excerpt_primary)
            .bind(&snapshot.excerpt_secondary)
            .bind(&snapshot.cover_image)
            .bind(change_reason)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    /// List all versions for a post, ordered newest first.
    ///
    /// Returns an empty vec for a post with no recorded versions.
    pub async fn list_by_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<PostVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM post_versions
             WHERE post_id = $1
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, PostVersion>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Find a ledger entry by its own id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PostVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM post_versions WHERE id = $1");
        sqlx::query_as::<_, PostVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a specific version of a post by its per-post version number.
    pub async fn find_by_post_and_version(
        pool: &PgPool,
        post_id: DbId,
        version: i32,
    ) -> Result<Option<PostVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM post_versions
             WHERE post_id = $1 AND version = $2"
        );
        sqlx::query_as::<_, PostVersion>(&query)
            .bind(post_id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    /// Get the latest version number for a post (0 if none exist).
    pub async fn latest_version_number(pool: &PgPool, post_id: DbId) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(version), 0) FROM post_versions WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
