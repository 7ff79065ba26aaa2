//! Event bus and cache-invalidation infrastructure.
//!
//! Mutations on posts never call into a cache directly; they publish a
//! [`PostEvent`] on the in-process [`EventBus`], and interested consumers
//! (here, the [`CacheInvalidator`]) subscribe independently. This keeps the
//! version ledger and content store decoupled from any caching mechanism.

pub mod bus;
pub mod cache;

pub use bus::{EventBus, PostEvent};
pub use cache::CacheInvalidator;
