use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use tutorhub_core::{
    models::session::{ExistingSession, NewSession},
    store::{SessionStore, SlotInsert},
};
use uuid::Uuid;

// Mock session store for testing
mock! {
    pub SessionRepo {}

    #[async_trait]
    impl SessionStore for SessionRepo {
        async fn fetch_existing_sessions(
            &self,
            center_id: Uuid,
            tutor_id: Uuid,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<ExistingSession>>;

        async fn create_sessions(
            &self,
            sessions: &[NewSession],
        ) -> eyre::Result<Vec<SlotInsert>>;
    }
}
