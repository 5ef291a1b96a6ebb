//! Test doubles for `SessionStore`: mockall expectations for failure
//! injection, and an in-memory store that enforces the same uniqueness rule
//! as the `sessions` table.

pub mod memory;
pub mod repositories;
