//! Use-case orchestration.
//!
//! Each function composes validation, identity, and store calls for one
//! operation. Checks always run in the same order (primary resource
//! existence, then secondary resource existence and ownership, then
//! relationship conflicts, then uniqueness), so a given bad request fails
//! the same way every time.

pub mod comments;
pub mod reports;
pub mod tags;
pub mod tasks;
pub mod users;
