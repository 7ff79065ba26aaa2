//! Handlers for post CRUD.
//!
//! Every content mutation records a ledger entry (done inside the
//! repository transaction) and publishes an event for cache invalidation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use penfolio_core::error::CoreError;
use penfolio_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use penfolio_core::post::{
    generate_slug, validate_content, validate_excerpt, validate_secondary_content,
    validate_secondary_title, validate_slug, validate_snapshot, validate_title,
};
use penfolio_core::types::DbId;
use penfolio_core::versioning::validate_change_reason;
use penfolio_db::models::post::{CreatePost, Post, UpdatePost};
use penfolio_db::repositories::PostRepo;
use penfolio_events::bus::{PostEvent, POST_CREATED, POST_DELETED, POST_UPDATED};

use crate::error::{AppError, AppResult};
use crate::identity::ActingUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Query param types
-------------------------------------------------------------------------- */

#[derive(Debug, serde::Deserialize)]
pub struct ListPostsParams {
    pub is_published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch a post by id or return 404.
pub(crate) async fn ensure_post(pool: &sqlx::PgPool, id: DbId) -> AppResult<Post> {
    PostRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound(format!("Post with id {id} not found"))))
}

/* --------------------------------------------------------------------------
Post CRUD
-------------------------------------------------------------------------- */

/// GET /posts
///
/// List posts with optional publication filtering.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let posts = PostRepo::list(&state.pool, params.is_published, limit, offset).await?;

    Ok(Json(DataResponse { data: posts }))
}

/// POST /posts
///
/// Create a new post and record version 1. Generates slug from the primary
/// title if not provided.
pub async fn create_post(
    actor: ActingUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    validate_snapshot(&input.snapshot()).map_err(AppError::Core)?;

    // Generate or validate slug.
    let slug = match &input.slug {
        Some(s) => {
            validate_slug(s).map_err(AppError::Core)?;
            s.clone()
        }
        None => generate_slug(&input.title_primary),
    };

    let post = PostRepo::create(&state.pool, &input, &slug, actor.user_id).await?;

    state.event_bus.publish(
        PostEvent::new(POST_CREATED, post.id)
            .with_actor(actor.user_id)
            .with_payload(serde_json::json!({ "version": 1 })),
    );

    tracing::info!(
        user_id = ?actor.user_id,
        post_id = post.id,
        slug = %post.slug,
        "Post created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /posts/{id}
///
/// Fetch a single post by id.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, id).await?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /posts/slug/{slug}
///
/// Fetch a single post by its slug.
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "Post with slug '{slug}' not found"
            )))
        })?;
    Ok(Json(DataResponse { data: post }))
}

/// PUT /posts/{id}
///
/// Partially update a post. Records a new ledger entry whenever any
/// snapshot field is present in the patch. Every field present in the
/// patch is validated against the same bounds creation enforces, so no
/// out-of-bounds value can reach the live row or the ledger.
pub async fn update_post(
    actor: ActingUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title_primary {
        validate_title(title).map_err(AppError::Core)?;
    }
    if let Some(ref title) = input.title_secondary {
        validate_secondary_title(title).map_err(AppError::Core)?;
    }
    if let Some(ref content) = input.content_primary {
        validate_content(content).map_err(AppError::Core)?;
    }
    if let Some(ref content) = input.content_secondary {
        validate_secondary_content(content).map_err(AppError::Core)?;
    }
    for excerpt in [&input.excerpt_primary, &input.excerpt_secondary]
        .into_iter()
        .flatten()
    {
        validate_excerpt(excerpt).map_err(AppError::Core)?;
    }
    if let Some(ref reason) = input.change_reason {
        validate_change_reason(reason).map_err(AppError::Core)?;
    }

    let post = PostRepo::update(&state.pool, id, &input, actor.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!("Post with id {id} not found")))
        })?;

    state.event_bus.publish(
        PostEvent::new(POST_UPDATED, post.id)
            .with_actor(actor.user_id)
            .with_payload(serde_json::json!({
                "recorded_version": input.touches_snapshot(),
            })),
    );

    tracing::info!(
        user_id = ?actor.user_id,
        post_id = post.id,
        recorded_version = input.touches_snapshot(),
        "Post updated"
    );

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /posts/{id}
///
/// Delete a post. Ledger entries cascade with it.
pub async fn delete_post(
    actor: ActingUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PostRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound(format!(
            "Post with id {id} not found"
        ))));
    }

    state
        .event_bus
        .publish(PostEvent::new(POST_DELETED, id).with_actor(actor.user_id));

    tracing::info!(user_id = ?actor.user_id, post_id = id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}
