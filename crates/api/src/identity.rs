//! Acting-user extractor for audit attribution.
//!
//! Authentication is handled upstream by the identity provider; by the time
//! a request reaches this server, the acting user id (if any) arrives in the
//! `x-user-id` header. The extractor never rejects: an absent or malformed
//! header yields `None`, and ledger entries record a null `created_by`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use penfolio_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The user on whose behalf a request acts, if the identity provider
/// supplied one.
///
/// ```ignore
/// async fn my_handler(actor: ActingUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = ?actor.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ActingUser {
    /// The acting user's id, or `None` for unauthenticated contexts.
    pub user_id: Option<DbId>,
}

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<DbId>().ok());

        Ok(ActingUser { user_id })
    }
}
