//! Handlers for the post version ledger: history listing, single-version
//! lookup, rollback, and the field-level diff summary.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use penfolio_core::error::CoreError;
use penfolio_core::types::DbId;
use penfolio_core::versioning::{changed_fields, diff_summary};
use penfolio_db::models::post_version::{DiffSummaryRequest, DiffSummaryResponse, RollbackResponse};
use penfolio_db::repositories::{PostRepo, PostVersionRepo};
use penfolio_events::bus::{PostEvent, POST_ROLLED_BACK};

use crate::error::{AppError, AppResult};
use crate::handlers::posts::ensure_post;
use crate::identity::ActingUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /posts/{id}/versions
///
/// List all ledger entries for a post, newest first. A post that has never
/// recorded a version yields an empty list, not an error.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, post_id).await?;
    let versions = PostVersionRepo::list_by_post(&state.pool, post.id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /posts/{id}/versions/{version}
///
/// Fetch one ledger entry by its per-post version number.
pub async fn get_version(
    State(state): State<AppState>,
    Path((post_id, version)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, post_id).await?;
    let ver = PostVersionRepo::find_by_post_and_version(&state.pool, post.id, version)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "Version {version} not found for post {post_id}"
            )))
        })?;
    Ok(Json(DataResponse { data: ver }))
}

/// POST /posts/{id}/rollback/{version_id}
///
/// Restore a prior snapshot as the live content. The ledger is never
/// rewound: the rollback itself is recorded as the post's next version.
pub async fn rollback(
    actor: ActingUser,
    State(state): State<AppState>,
    Path((post_id, version_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_post(&state.pool, post_id).await?;

    let (post, entry) =
        PostRepo::rollback_to_version(&state.pool, post_id, version_id, actor.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound(format!(
                    "Version {version_id} not found for post {post_id}"
                )))
            })?;

    state.event_bus.publish(
        PostEvent::new(POST_ROLLED_BACK, post.id)
            .with_actor(actor.user_id)
            .with_payload(serde_json::json!({
                "rollback_version": entry.version,
                "change_reason": entry.change_reason,
            })),
    );

    tracing::info!(
        user_id = ?actor.user_id,
        post_id = post.id,
        new_version = entry.version,
        "Post rolled back"
    );

    Ok(Json(DataResponse {
        data: RollbackResponse {
            post,
            version: entry,
        },
    }))
}

/// GET /posts/{id}/versions/diff?from=X&to=Y
///
/// Report which snapshot field families changed going from version X to
/// version Y. Presentation only; nothing stored derives from this.
pub async fn diff_versions(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Query(params): Query<DiffSummaryRequest>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, post_id).await?;

    let from = PostVersionRepo::find_by_post_and_version(&state.pool, post.id, params.from)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "Version {} not found for post {post_id}",
                params.from
            )))
        })?;
    let to = PostVersionRepo::find_by_post_and_version(&state.pool, post.id, params.to)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "Version {} not found for post {post_id}",
                params.to
            )))
        })?;

    let older = from.snapshot();
    let newer = to.snapshot();
    let response = DiffSummaryResponse {
        post_id: post.id,
        from: params.from,
        to: params.to,
        changed_fields: changed_fields(&newer, &older),
        summary: diff_summary(&newer, &older),
    };

    Ok(Json(DataResponse { data: response }))
}
