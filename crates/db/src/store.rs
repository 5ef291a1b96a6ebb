use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tutorhub_core::{
    models::session::{ExistingSession, NewSession},
    store::{SessionStore, SlotInsert},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

/// `SessionStore` backed by the Postgres `sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn fetch_existing_sessions(
        &self,
        center_id: Uuid,
        tutor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> eyre::Result<Vec<ExistingSession>> {
        let rows = repositories::session::get_sessions_in_range(
            &self.pool, center_id, tutor_id, from, to,
        )
        .await?;

        rows.into_iter().map(ExistingSession::try_from).collect()
    }

    /// Runs every insert in one transaction. Returning early drops `tx`,
    /// which rolls the batch back.
    async fn create_sessions(&self, sessions: &[NewSession]) -> eyre::Result<Vec<SlotInsert>> {
        let mut tx = self.pool.begin().await?;
        let mut results = Vec::with_capacity(sessions.len());

        for session in sessions {
            let result = match repositories::session::insert_session(&mut *tx, session).await? {
                Some(row) => SlotInsert::Created(ExistingSession::try_from(row)?),
                None => SlotInsert::AlreadyTaken,
            };
            results.push(result);
        }

        tx.commit().await?;
        Ok(results)
    }
}
