//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input via `penfolio_core`, delegate to the
//! corresponding repository in `penfolio_db`, publish mutation events on
//! the bus, and map errors via [`AppError`](crate::error::AppError).

pub mod posts;
pub mod versions;
