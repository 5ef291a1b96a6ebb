use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::eyre;
use tokio::sync::Mutex;
use tutorhub_core::{
    models::session::{ExistingSession, NewSession},
    store::{SessionStore, SlotInsert},
};
use uuid::Uuid;

/// In-process `SessionStore` with the `(tutor_id, start_at, end_at)`
/// uniqueness rule and all-or-nothing batches of the `sessions` table.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<Vec<ExistingSession>>,
    fail_on_insert: Option<usize>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<ExistingSession>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            fail_on_insert: None,
        }
    }

    /// Makes the `n`th insert (1-based) of every batch fail.
    pub fn failing_on_insert(mut self, n: usize) -> Self {
        self.fail_on_insert = Some(n);
        self
    }

    pub async fn sessions(&self) -> Vec<ExistingSession> {
        self.sessions.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Inserts a session as if another caller had committed it.
    pub async fn insert(&self, session: ExistingSession) {
        self.sessions.lock().await.push(session);
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn fetch_existing_sessions(
        &self,
        center_id: Uuid,
        tutor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> eyre::Result<Vec<ExistingSession>> {
        let mut matching: Vec<ExistingSession> = self
            .sessions
            .lock()
            .await
            .iter()
            .filter(|s| s.center_id == center_id && s.tutor_id == tutor_id)
            .filter(|s| s.overlaps(from, to))
            .cloned()
            .collect();
        matching.sort_by_key(|s| (s.start_at_utc, s.id));

        Ok(matching)
    }

    async fn create_sessions(&self, sessions: &[NewSession]) -> eyre::Result<Vec<SlotInsert>> {
        let mut stored = self.sessions.lock().await;
        let mut staged: Vec<ExistingSession> = Vec::new();
        let mut results = Vec::with_capacity(sessions.len());

        for (index, session) in sessions.iter().enumerate() {
            if self.fail_on_insert == Some(index + 1) {
                return Err(eyre!("Injected failure on insert {}", index + 1));
            }

            let taken = stored.iter().chain(staged.iter()).any(|s| {
                s.tutor_id == session.tutor_id
                    && s.is_exact_slot(session.start_at_utc, session.end_at_utc)
            });
            if taken {
                results.push(SlotInsert::AlreadyTaken);
                continue;
            }

            let created = ExistingSession {
                id: Uuid::new_v4(),
                center_id: session.center_id,
                tutor_id: session.tutor_id,
                session_type: session.session_type,
                student_id: session.student_id,
                group_id: session.group_id,
                start_at_utc: session.start_at_utc,
                end_at_utc: session.end_at_utc,
                zoom_link: session.zoom_link.clone(),
            };
            staged.push(created.clone());
            results.push(SlotInsert::Created(created));
        }

        stored.extend(staged);
        Ok(results)
    }
}
