//! Repository for the `posts` table — the live content store.
//!
//! Every content mutation goes through here so the version ledger stays
//! consistent: create records version 1, update appends the next version,
//! and rollback overwrites the live row and appends a rollback entry, all
//! inside a single transaction per operation.

use penfolio_core::types::DbId;
use penfolio_core::versioning::{rollback_reason, DEFAULT_CHANGE_REASON, INITIAL_CHANGE_REASON};
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, UpdatePost};
use crate::models::post_version::PostVersion;
use crate::repositories::post_version_repo::PostVersionRepo;

/// Column list for posts queries.
const COLUMNS: &str = "id, slug, title_primary, title_secondary, content_primary, \
    content_secondary, excerpt_primary, excerpt_secondary, cover_image, is_published, \
    created_by, created_at, updated_at";

/// Provides CRUD and rollback operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Create a new post and record its first ledger entry in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePost,
        slug: &str,
        user_id: Option<DbId>,
    ) -> Result<Post, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO posts
                (slug, title_primary, title_secondary, content_primary, content_secondary,
                 excerpt_primary, excerpt_secondary, cover_image, is_published, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, false), $10)
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .bind(&input.title_primary)
            .bind(&input.title_secondary)
            .bind(&input.content_primary)
            .bind(&input.content_secondary)
            .bind(&input.excerpt_primary)
            .bind(&input.excerpt_secondary)
            .bind(&input.cover_image)
            .bind(input.is_published)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        PostVersionRepo::create(
            &mut *tx,
            post.id,
            &input.snapshot(),
            Some(INITIAL_CHANGE_REASON),
            user_id,
        )
        .await?;

        tx.commit().await?;
        Ok(post)
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE slug = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List posts with an optional publication filter, newest updates first.
    pub async fn list(
        pool: &PgPool,
        is_published: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE ($1::BOOL IS NULL OR is_published = $1)
             ORDER BY updated_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(is_published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update and, if any snapshot field changed, append a
    /// new ledger entry — both in one transaction.
    ///
    /// Returns `None` if no post with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
        user_id: Option<DbId>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE posts SET
                title_primary = COALESCE($2, title_primary),
                title_secondary = COALESCE($3, title_secondary),
                content_primary = COALESCE($4, content_primary),
                content_secondary = COALESCE($5, content_secondary),
                excerpt_primary = COALESCE($6, excerpt_primary),
                excerpt_secondary = COALESCE($7, excerpt_secondary),
                cover_image = COALESCE($8, cover_image),
                is_published = COALESCE($9, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title_primary)
            .bind(&input.title_secondary)
            .bind(&input.content_primary)
            .bind(&input.content_secondary)
            .bind(&input.excerpt_primary)
            .bind(&input.excerpt_secondary)
            .bind(&input.cover_image)
            .bind(input.is_published)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(post) = post else {
            return Ok(None);
        };

        if input.touches_snapshot() {
            let reason = input
                .change_reason
                .as_deref()
                .unwrap_or(DEFAULT_CHANGE_REASON);
            PostVersionRepo::create(&mut *tx, post.id, &post.snapshot(), Some(reason), user_id)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(post))
    }

    /// Delete a post. Ledger entries cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a prior snapshot as the live content and append a rollback
    /// entry to the ledger, as one transaction.
    ///
    /// The ledger is never rewound: the rollback entry carries the target's
    /// snapshot under the post's next sequential version number, with a
    /// change reason naming the restored version. Returns `None` if
    /// `version_id` does not exist or belongs to a different post.
    pub async fn rollback_to_version(
        pool: &PgPool,
        post_id: DbId,
        version_id: DbId,
        user_id: Option<DbId>,
    ) -> Result<Option<(Post, PostVersion)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {VERSION_COLUMNS} FROM post_versions WHERE id = $1 AND post_id = $2");
        let target = sqlx::query_as::<_, PostVersion>(&query)
            .bind(version_id)
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(target) = target else {
            return Ok(None);
        };

        let snapshot = target.snapshot();
        let query = format!(
            "UPDATE posts SET
                title_primary = $2,
                title_secondary = $3,
                content_primary = $4,
                content_secondary = $5,
                excerpt_primary = $6,
                excerpt_secondary = $7,
                cover_image = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(post_id)
            .bind(&snapshot.title_primary)
            .bind(&snapshot.title_secondary)
            .bind(&snapshot.content_primary)
            .bind(&snapshot.content_secondary)
            .bind(&snapshot.excerpt_primary)
            .bind(&snapshot.excerpt_secondary)
            .bind(&snapshot.cover_image)
            .fetch_one(&mut *tx)
            .await?;

        let reason = rollback_reason(target.version);
        let entry =
            PostVersionRepo::create(&mut *tx, post_id, &snapshot, Some(&reason), user_id).await?;

        tx.commit().await?;
        Ok(Some((post, entry)))
    }
}

/// Column list for post_versions rows fetched inside rollback.
const VERSION_COLUMNS: &str = "id, post_id, title_primary, title_secondary, content_primary, \
    content_secondary, excerpt_primary, excerpt_secondary, cover_image, change_reason, \
    version, created_by, created_at";
