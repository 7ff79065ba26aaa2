//! Route definitions for posts and their version ledger.
//!
//! Registered under `/posts`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{posts, versions};
use crate::state::AppState;

/// Post routes, registered as `/posts`.
///
/// ```text
/// GET    /                              list_posts
/// POST   /                              create_post
/// GET    /slug/{slug}                   get_post_by_slug
/// GET    /{id}                          get_post
/// PUT    /{id}                          update_post
/// DELETE /{id}                          delete_post
/// GET    /{id}/versions                 list_versions
/// GET    /{id}/versions/diff            diff_versions
/// GET    /{id}/versions/{version}       get_version
/// POST   /{id}/rollback/{version_id}    rollback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/slug/{slug}", get(posts::get_post_by_slug))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/versions", get(versions::list_versions))
        .route("/{id}/versions/diff", get(versions::diff_versions))
        .route("/{id}/versions/{version}", get(versions::get_version))
        .route("/{id}/rollback/{version_id}", post(versions::rollback))
}
