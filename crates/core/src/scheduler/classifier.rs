//! # Conflict & Duplicate Classifier
//!
//! Partitions proposed occurrences against a tutor's existing sessions:
//!
//! 1. Exact match on start and end instants -> `WouldSkipDuplicate`
//! 2. Any other overlap (`start < other.end && end > other.start`) -> `WouldConflict`
//! 3. Everything else -> `WouldCreate`
//!
//! The duplicate check runs first, so an exact slot is never reported as a
//! conflict even though it overlaps itself. Sessions of other tutors are
//! ignored; tutors are scheduled independently.

use chrono_tz::Tz;
use uuid::Uuid;

use crate::models::{
    generation::{Classification, ClassifiedOccurrence, Occurrence, SessionRef},
    session::ExistingSession,
};

/// Classifies every occurrence, preserving input order.
///
/// When several existing sessions collide with one occurrence, the earliest
/// (by start, then id) is reported. `timezone` gives the local date carried
/// by the collision reference.
pub fn classify(
    tutor_id: Uuid,
    timezone: Tz,
    occurrences: &[Occurrence],
    existing: &[ExistingSession],
) -> Vec<ClassifiedOccurrence> {
    let mut tutor_sessions: Vec<&ExistingSession> = existing
        .iter()
        .filter(|session| session.tutor_id == tutor_id)
        .collect();
    tutor_sessions.sort_by_key(|session| (session.start_at_utc, session.id));

    occurrences
        .iter()
        .map(|occurrence| ClassifiedOccurrence {
            occurrence: *occurrence,
            classification: classify_one(occurrence, &tutor_sessions, timezone),
        })
        .collect()
}

fn classify_one(
    occurrence: &Occurrence,
    sessions: &[&ExistingSession],
    timezone: Tz,
) -> Classification {
    let (start, end) = (occurrence.start_at_utc, occurrence.end_at_utc);

    if let Some(duplicate) = sessions.iter().find(|s| s.is_exact_slot(start, end)) {
        return Classification::WouldSkipDuplicate {
            existing: SessionRef::new(duplicate, timezone),
        };
    }

    if let Some(conflict) = sessions.iter().find(|s| s.overlaps(start, end)) {
        return Classification::WouldConflict {
            existing: SessionRef::new(conflict, timezone),
        };
    }

    Classification::WouldCreate
}
