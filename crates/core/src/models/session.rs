use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    OneOnOne,
    Group,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::OneOnOne => "one_on_one",
            SessionType::Group => "group",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "one_on_one" => Some(SessionType::OneOnOne),
            "group" => Some(SessionType::Group),
            _ => None,
        }
    }
}

/// A session already persisted for a tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSession {
    pub id: Uuid,
    pub center_id: Uuid,
    pub tutor_id: Uuid,
    pub session_type: SessionType,
    pub student_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub start_at_utc: DateTime<Utc>,
    pub end_at_utc: DateTime<Utc>,
    pub zoom_link: Option<String>,
}

impl ExistingSession {
    pub fn is_exact_slot(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_at_utc == start && self.end_at_utc == end
    }

    /// Half-open overlap: sessions that merely touch do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end_at_utc && end > self.start_at_utc
    }
}

/// Insert payload for a single generated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub center_id: Uuid,
    pub tutor_id: Uuid,
    pub session_type: SessionType,
    pub student_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub start_at_utc: DateTime<Utc>,
    pub end_at_utc: DateTime<Utc>,
    pub zoom_link: Option<String>,
}
