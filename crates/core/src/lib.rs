//! Domain logic for the penfolio blog backend.
//!
//! This crate has no internal dependencies so it can be used by the
//! persistence layer, the API server, and any future CLI tooling:
//!
//! - [`types`] — shared id and timestamp aliases.
//! - [`error`] — the [`CoreError`](error::CoreError) domain taxonomy.
//! - [`post`] — the bilingual content snapshot, its validation rules, and
//!   slug generation.
//! - [`pagination`] — list limit/offset clamping.
//! - [`versioning`] — version-ledger helpers: change-reason labels and the
//!   field-level diff summary.

pub mod error;
pub mod pagination;
pub mod post;
pub mod types;
pub mod versioning;
