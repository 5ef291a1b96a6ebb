use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::{ExistingSession, NewSession, SessionType};

/// Parameters for expanding a weekly pattern into concrete sessions.
///
/// Weekdays use ISO numbering (1 = Monday .. 7 = Sunday). Times are local
/// wall-clock values in `timezone`, formatted `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub center_id: Uuid,
    pub tutor_id: Uuid,
    pub session_type: SessionType,
    pub student_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weekdays: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
    pub zoom_link: Option<String>,
}

impl GenerationRequest {
    /// Trimmed zoom link, with blank values treated as absent.
    pub fn effective_zoom_link(&self) -> Option<&str> {
        self.zoom_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    pub fn new_session(&self, occurrence: &Occurrence) -> NewSession {
        NewSession {
            center_id: self.center_id,
            tutor_id: self.tutor_id,
            session_type: self.session_type,
            student_id: self.student_id,
            group_id: self.group_id,
            start_at_utc: occurrence.start_at_utc,
            end_at_utc: occurrence.end_at_utc,
            zoom_link: self.effective_zoom_link().map(str::to_string),
        }
    }
}

/// Request body for the generate endpoints; the center comes from the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSessionsBody {
    pub tutor_id: Uuid,
    pub session_type: SessionType,
    pub student_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weekdays: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
    pub zoom_link: Option<String>,
}

impl GenerateSessionsBody {
    pub fn into_request(self, center_id: Uuid) -> GenerationRequest {
        GenerationRequest {
            center_id,
            tutor_id: self.tutor_id,
            session_type: self.session_type,
            student_id: self.student_id,
            group_id: self.group_id,
            start_date: self.start_date,
            end_date: self.end_date,
            weekdays: self.weekdays,
            start_time: self.start_time,
            end_time: self.end_time,
            timezone: self.timezone,
            zoom_link: self.zoom_link,
        }
    }
}

/// One concrete calendar instance of the recurring pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub local_date: NaiveDate,
    pub start_at_utc: DateTime<Utc>,
    pub end_at_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    NewSlot,
    ExactSlotExists,
    TutorOverlap,
    CreatedConcurrently,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::NewSlot => "new_slot",
            ReasonCode::ExactSlotExists => "exact_slot_exists",
            ReasonCode::TutorOverlap => "tutor_overlap",
            ReasonCode::CreatedConcurrently => "created_concurrently",
        }
    }
}

/// The existing session an occurrence collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRef {
    pub id: Uuid,
    /// Date of the session's start in the request's timezone
    pub local_date: NaiveDate,
    pub start_at_utc: DateTime<Utc>,
    pub end_at_utc: DateTime<Utc>,
}

impl SessionRef {
    pub fn new(session: &ExistingSession, timezone: Tz) -> Self {
        Self {
            id: session.id,
            local_date: session.start_at_utc.with_timezone(&timezone).date_naive(),
            start_at_utc: session.start_at_utc,
            end_at_utc: session.end_at_utc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    WouldCreate,
    WouldSkipDuplicate { existing: SessionRef },
    WouldConflict { existing: SessionRef },
}

impl Classification {
    pub fn reason(&self) -> ReasonCode {
        match self {
            Classification::WouldCreate => ReasonCode::NewSlot,
            Classification::WouldSkipDuplicate { .. } => ReasonCode::ExactSlotExists,
            Classification::WouldConflict { .. } => ReasonCode::TutorOverlap,
        }
    }

    pub fn existing(&self) -> Option<&SessionRef> {
        match self {
            Classification::WouldCreate => None,
            Classification::WouldSkipDuplicate { existing }
            | Classification::WouldConflict { existing } => Some(existing),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedOccurrence {
    pub occurrence: Occurrence,
    pub classification: Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleItem {
    pub date: NaiveDate,
    pub reason: String,
}

/// True total plus a bounded sample for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub sample: Vec<SampleItem>,
}

impl Summary {
    pub fn record(&mut self, item: SampleItem, sample_limit: usize) {
        self.count += 1;
        if self.sample.len() < sample_limit {
            self.sample.push(item);
        }
    }
}

/// Aggregate result shared by preview and commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub range: DateRange,
    pub create_count: usize,
    pub skipped_duplicate_count: usize,
    pub conflict_count: usize,
    pub duplicates_summary: Summary,
    pub conflicts_summary: Summary,
    pub zoom_link_applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub range: DateRange,
    pub would_create_count: usize,
    pub would_skip_duplicate_count: usize,
    pub would_conflict_count: usize,
    pub duplicates_summary: Summary,
    pub conflicts_summary: Summary,
    pub zoom_link_applied: bool,
}

impl From<GenerationOutcome> for PreviewResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            range: outcome.range,
            would_create_count: outcome.create_count,
            would_skip_duplicate_count: outcome.skipped_duplicate_count,
            would_conflict_count: outcome.conflict_count,
            duplicates_summary: outcome.duplicates_summary,
            conflicts_summary: outcome.conflicts_summary,
            zoom_link_applied: outcome.zoom_link_applied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    pub range: DateRange,
    pub created_count: usize,
    pub skipped_duplicate_count: usize,
    pub conflict_count: usize,
    pub duplicates_summary: Summary,
    pub conflicts_summary: Summary,
    pub zoom_link_applied: bool,
}

impl From<GenerationOutcome> for CommitResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            range: outcome.range,
            created_count: outcome.create_count,
            skipped_duplicate_count: outcome.skipped_duplicate_count,
            conflict_count: outcome.conflict_count,
            duplicates_summary: outcome.duplicates_summary,
            conflicts_summary: outcome.conflicts_summary,
            zoom_link_applied: outcome.zoom_link_applied,
        }
    }
}
