use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tutorhub_core::models::session::{ExistingSession, SessionType};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub id: Uuid,
    pub center_id: Uuid,
    pub tutor_id: Uuid,
    pub session_type: String,
    pub student_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub zoom_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbSession> for ExistingSession {
    type Error = eyre::Report;

    fn try_from(row: DbSession) -> Result<Self> {
        let session_type = SessionType::parse(&row.session_type)
            .ok_or_else(|| eyre!("Unknown session type '{}' on session {}", row.session_type, row.id))?;

        Ok(ExistingSession {
            id: row.id,
            center_id: row.center_id,
            tutor_id: row.tutor_id,
            session_type,
            student_id: row.student_id,
            group_id: row.group_id,
            start_at_utc: row.start_at,
            end_at_utc: row.end_at,
            zoom_link: row.zoom_link,
        })
    }
}
