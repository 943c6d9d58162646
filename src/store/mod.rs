//! Data access layer.
//!
//! One module per entity. Every function is a stateless wrapper over a SQL
//! statement; anything owned by a user is read and written through its
//! `owner_id`, so a caller can never reach another owner's rows. Each
//! mutating statement commits on its own; there is no batching layer.

pub mod comments;
pub mod reports;
pub mod tags;
pub mod tasks;
pub mod users;

/// Row offset for a 1-indexed page.
pub(crate) fn page_offset(page: u32, limit: u32) -> i64 {
    (page.saturating_sub(1) as i64) * limit as i64
}
