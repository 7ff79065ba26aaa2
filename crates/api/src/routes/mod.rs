pub mod health;
pub mod posts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /posts                              list, create
/// /posts/{id}                         get, update, delete
/// /posts/slug/{slug}                  get by slug
/// /posts/{id}/versions                version history
/// /posts/{id}/versions/{version}      single version
/// /posts/{id}/versions/diff           diff summary
/// /posts/{id}/rollback/{version_id}   rollback
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/posts", posts::router())
}
