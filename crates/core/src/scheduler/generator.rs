//! # Preview/Commit Orchestrator
//!
//! Runs the generation pipeline against a `SessionStore`:
//!
//! 1. Validate the request (before any data access)
//! 2. Fetch the tutor's existing sessions over a window derived only from the
//!    request's dates and timezone
//! 3. Expand and classify (pure, see `GenerationPlan`)
//! 4. Preview stops here; commit inserts every `WouldCreate` occurrence as one
//!    all-or-nothing batch
//!
//! Both entry points share steps 1-3, so with no concurrent writers commit
//! reports exactly the counts preview predicted. Re-running commit creates
//! nothing: the sessions it created earlier now classify as duplicates.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use eyre::eyre;
use tracing::{debug, info, warn};

use crate::{
    errors::{HubError, HubResult},
    models::{
        generation::{
            Classification, ClassifiedOccurrence, DateRange, GenerationOutcome,
            GenerationRequest, Occurrence, ReasonCode, SampleItem, SessionRef, Summary,
        },
        session::{ExistingSession, NewSession, SessionType},
    },
    scheduler::{classifier::classify, expander::RecurrencePattern},
    settings::GeneratorSettings,
    store::{SessionStore, SlotInsert},
};

const CONCURRENT_REASON: &str = "Session was created by a concurrent request";

/// Expanded and classified occurrences for one request and one snapshot of
/// existing sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub range: DateRange,
    pub timezone: Tz,
    pub classified: Vec<ClassifiedOccurrence>,
    pub zoom_link_applied: bool,
}

impl GenerationPlan {
    /// Pure planning step shared by preview and commit.
    pub fn build(
        request: &GenerationRequest,
        pattern: &RecurrencePattern,
        existing: &[ExistingSession],
    ) -> HubResult<Self> {
        let occurrences = pattern.occurrences()?;
        let classified = classify(request.tutor_id, pattern.timezone(), &occurrences, existing);

        Ok(Self {
            range: DateRange {
                from: pattern.start_date(),
                to: pattern.end_date(),
            },
            timezone: pattern.timezone(),
            classified,
            zoom_link_applied: request.effective_zoom_link().is_some(),
        })
    }

    pub fn to_create(&self) -> impl Iterator<Item = &Occurrence> + '_ {
        self.classified
            .iter()
            .filter(|item| item.classification == Classification::WouldCreate)
            .map(|item| &item.occurrence)
    }

    /// Counts and bounded samples, as preview reports them.
    pub fn summarize(&self, sample_limit: usize) -> GenerationOutcome {
        self.tally(sample_limit, &[])
    }

    /// Like `summarize`, but occurrences in `taken` were `WouldCreate` and lost
    /// their slot to a concurrent insert. They count as duplicates and keep
    /// their place in local-date order within the sample.
    fn tally(&self, sample_limit: usize, taken: &[Occurrence]) -> GenerationOutcome {
        let mut outcome = GenerationOutcome {
            range: self.range,
            create_count: 0,
            skipped_duplicate_count: 0,
            conflict_count: 0,
            duplicates_summary: Summary::default(),
            conflicts_summary: Summary::default(),
            zoom_link_applied: self.zoom_link_applied,
        };

        for item in &self.classified {
            match &item.classification {
                Classification::WouldCreate if taken.contains(&item.occurrence) => {
                    outcome.skipped_duplicate_count += 1;
                    outcome.duplicates_summary.record(
                        SampleItem {
                            date: item.occurrence.local_date,
                            reason: CONCURRENT_REASON.to_string(),
                        },
                        sample_limit,
                    );
                }
                Classification::WouldCreate => outcome.create_count += 1,
                Classification::WouldSkipDuplicate { existing } => {
                    outcome.skipped_duplicate_count += 1;
                    outcome.duplicates_summary.record(
                        SampleItem {
                            date: item.occurrence.local_date,
                            reason: self.duplicate_reason(existing),
                        },
                        sample_limit,
                    );
                }
                Classification::WouldConflict { existing } => {
                    outcome.conflict_count += 1;
                    outcome.conflicts_summary.record(
                        SampleItem {
                            date: item.occurrence.local_date,
                            reason: self.conflict_reason(existing),
                        },
                        sample_limit,
                    );
                }
            }
        }

        outcome
    }

    fn duplicate_reason(&self, existing: &SessionRef) -> String {
        format!(
            "Session already scheduled for this tutor at {}",
            self.local_span(existing.start_at_utc, existing.end_at_utc)
        )
    }

    fn conflict_reason(&self, existing: &SessionRef) -> String {
        format!(
            "Overlaps existing session on {} at {}",
            existing.local_date,
            self.local_span(existing.start_at_utc, existing.end_at_utc)
        )
    }

    fn local_span(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        format!(
            "{}-{}",
            start.with_timezone(&self.timezone).format("%H:%M"),
            end.with_timezone(&self.timezone).format("%H:%M")
        )
    }
}

/// Checks everything that can be rejected without touching the store.
///
/// # Errors
///
/// * `HubError::InvalidRequest` - malformed schedule fields, a one-on-one
///   request without a student, or a group request without a group
pub fn validate(
    request: &GenerationRequest,
    settings: &GeneratorSettings,
) -> HubResult<RecurrencePattern> {
    match request.session_type {
        SessionType::OneOnOne if request.student_id.is_none() => {
            return Err(HubError::invalid("studentId is required for one-on-one sessions"));
        }
        SessionType::Group if request.group_id.is_none() => {
            return Err(HubError::invalid("groupId is required for group sessions"));
        }
        _ => {}
    }

    RecurrencePattern::parse(request, settings)
}

/// Validates, expands and classifies against a given snapshot, without I/O.
pub fn plan(
    request: &GenerationRequest,
    existing: &[ExistingSession],
    settings: &GeneratorSettings,
) -> HubResult<GenerationPlan> {
    let pattern = validate(request, settings)?;
    GenerationPlan::build(request, &pattern, existing)
}

/// Dry run: reports what commit would do, persisting nothing.
pub async fn preview(
    store: &dyn SessionStore,
    settings: &GeneratorSettings,
    request: &GenerationRequest,
) -> HubResult<GenerationOutcome> {
    let plan = load_plan(store, settings, request).await?;
    let outcome = plan.summarize(settings.sample_limit);

    debug!(
        "Preview for tutor {}: would_create={}, duplicates={}, conflicts={}",
        request.tutor_id,
        outcome.create_count,
        outcome.skipped_duplicate_count,
        outcome.conflict_count
    );

    Ok(outcome)
}

/// Persists one session per `WouldCreate` occurrence in a single batch.
///
/// A slot the store reports as already taken was created by a concurrent
/// commit; it is counted as a skipped duplicate. Any other store failure
/// aborts the call with `HubError::PersistenceFailure` and leaves nothing from
/// this call persisted; callers retry with a fresh preview and commit.
pub async fn commit(
    store: &dyn SessionStore,
    settings: &GeneratorSettings,
    request: &GenerationRequest,
) -> HubResult<GenerationOutcome> {
    let plan = load_plan(store, settings, request).await?;

    let occurrences: Vec<Occurrence> = plan.to_create().copied().collect();
    let new_sessions: Vec<NewSession> = occurrences
        .iter()
        .map(|occurrence| request.new_session(occurrence))
        .collect();

    let inserted = if new_sessions.is_empty() {
        Vec::new()
    } else {
        store.create_sessions(&new_sessions).await.map_err(|err| {
            HubError::PersistenceFailure(err.wrap_err(format!(
                "Failed to create {} sessions for tutor {}",
                new_sessions.len(),
                request.tutor_id
            )))
        })?
    };
    if inserted.len() != occurrences.len() {
        return Err(HubError::PersistenceFailure(eyre!(
            "Store returned {} results for {} sessions",
            inserted.len(),
            occurrences.len()
        )));
    }

    let mut taken = Vec::new();
    for (occurrence, result) in occurrences.iter().zip(&inserted) {
        match result {
            SlotInsert::Created(session) => {
                debug!("Created session {} on {}", session.id, occurrence.local_date);
            }
            SlotInsert::AlreadyTaken => {
                warn!(
                    "Session for tutor {} on {} already exists, skipping ({})",
                    request.tutor_id,
                    occurrence.local_date,
                    ReasonCode::CreatedConcurrently.as_str()
                );
                taken.push(*occurrence);
            }
        }
    }

    let outcome = plan.tally(settings.sample_limit, &taken);

    info!(
        "Committed sessions for tutor {} at center {}: created={}, duplicates={}, conflicts={}",
        request.tutor_id,
        request.center_id,
        outcome.create_count,
        outcome.skipped_duplicate_count,
        outcome.conflict_count
    );

    Ok(outcome)
}

async fn load_plan(
    store: &dyn SessionStore,
    settings: &GeneratorSettings,
    request: &GenerationRequest,
) -> HubResult<GenerationPlan> {
    let pattern = validate(request, settings)?;
    let (from, to) = pattern.fetch_window()?;

    let existing = store
        .fetch_existing_sessions(request.center_id, request.tutor_id, from, to)
        .await
        .map_err(HubError::PersistenceFailure)?;

    GenerationPlan::build(request, &pattern, &existing)
}
