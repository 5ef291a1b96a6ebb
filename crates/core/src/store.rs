//! # Session Store
//!
//! Data-access boundary for the session generator. The scheduler never talks
//! to a database directly; callers hand it a `SessionStore` so the pure parts
//! of the pipeline stay testable without a live connection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::session::{ExistingSession, NewSession};

/// Result of inserting one slot of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotInsert {
    Created(ExistingSession),
    /// The (tutor, start, end) slot was taken between classification and insert.
    AlreadyTaken,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Sessions for the tutor at the center overlapping `[from, to)`.
    async fn fetch_existing_sessions(
        &self,
        center_id: Uuid,
        tutor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> eyre::Result<Vec<ExistingSession>>;

    /// Inserts a batch atomically, one `SlotInsert` per input in input order.
    ///
    /// A slot already held by the same tutor is reported as `AlreadyTaken`
    /// and does not fail the batch. Any other failure returns `Err` with
    /// nothing from the batch persisted.
    async fn create_sessions(&self, sessions: &[NewSession]) -> eyre::Result<Vec<SlotInsert>>;
}
