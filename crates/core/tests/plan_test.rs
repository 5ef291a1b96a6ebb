use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tutorhub_core::{
    errors::HubError,
    models::{
        generation::{DateRange, GenerationRequest},
        session::{ExistingSession, SessionType},
    },
    scheduler::plan,
    settings::GeneratorSettings,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Every weekday of January 2025, 09:00-10:00 UTC.
fn january_request(tutor_id: Uuid) -> GenerationRequest {
    GenerationRequest {
        center_id: Uuid::new_v4(),
        tutor_id,
        session_type: SessionType::OneOnOne,
        student_id: Some(Uuid::new_v4()),
        group_id: None,
        start_date: date(2025, 1, 1),
        end_date: date(2025, 1, 31),
        weekdays: vec![1, 2, 3, 4, 5],
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        timezone: "UTC".to_string(),
        zoom_link: None,
    }
}

fn booked(tutor_id: Uuid, day: u32, start_hour: u32, start_min: u32, minutes: i64) -> ExistingSession {
    let start = Utc.with_ymd_and_hms(2025, 1, day, start_hour, start_min, 0).unwrap();
    ExistingSession {
        id: Uuid::new_v4(),
        center_id: Uuid::new_v4(),
        tutor_id,
        session_type: SessionType::OneOnOne,
        student_id: Some(Uuid::new_v4()),
        group_id: None,
        start_at_utc: start,
        end_at_utc: start + chrono::Duration::minutes(minutes),
        zoom_link: None,
    }
}

#[test]
fn test_summary_counts_and_samples() {
    let tutor = Uuid::new_v4();
    let request = january_request(tutor);
    // 23 weekdays in January 2025; 7 exact duplicates, 2 overlaps
    let mut existing: Vec<ExistingSession> = [2, 3, 6, 7, 8, 9, 10]
        .iter()
        .map(|day| booked(tutor, *day, 9, 0, 60))
        .collect();
    existing.push(booked(tutor, 13, 9, 30, 60));
    existing.push(booked(tutor, 14, 8, 30, 60));

    let settings = GeneratorSettings::default();
    let outcome = plan(&request, &existing, &settings)
        .unwrap()
        .summarize(settings.sample_limit);

    assert_eq!(outcome.create_count, 14);
    assert_eq!(outcome.skipped_duplicate_count, 7);
    assert_eq!(outcome.conflict_count, 2);

    assert_eq!(outcome.duplicates_summary.count, 7);
    assert_eq!(outcome.duplicates_summary.sample.len(), 5);
    assert_eq!(outcome.duplicates_summary.sample[0].date, date(2025, 1, 2));
    assert_eq!(
        outcome.duplicates_summary.sample[0].reason,
        "Session already scheduled for this tutor at 09:00-10:00"
    );

    assert_eq!(outcome.conflicts_summary.count, 2);
    assert_eq!(outcome.conflicts_summary.sample[0].date, date(2025, 1, 13));
    assert_eq!(
        outcome.conflicts_summary.sample[0].reason,
        "Overlaps existing session on 2025-01-13 at 09:30-10:30"
    );

    assert_eq!(
        outcome.range,
        DateRange {
            from: date(2025, 1, 1),
            to: date(2025, 1, 31),
        }
    );
    assert!(!outcome.zoom_link_applied);
}

#[test]
fn test_sample_limit_is_respected() {
    let tutor = Uuid::new_v4();
    let request = january_request(tutor);
    let existing: Vec<ExistingSession> = (6..=10).map(|day| booked(tutor, day, 9, 0, 60)).collect();

    let outcome = plan(&request, &existing, &GeneratorSettings::default())
        .unwrap()
        .summarize(2);

    assert_eq!(outcome.duplicates_summary.count, 5);
    assert_eq!(outcome.duplicates_summary.sample.len(), 2);
}

#[test]
fn test_reasons_use_request_timezone() {
    let tutor = Uuid::new_v4();
    let mut request = january_request(tutor);
    request.timezone = "America/Edmonton".to_string();
    // 09:30 MST on Monday 2025-01-06
    let existing = vec![booked(tutor, 6, 16, 30, 60)];

    let outcome = plan(&request, &existing, &GeneratorSettings::default())
        .unwrap()
        .summarize(5);

    assert_eq!(outcome.conflict_count, 1);
    assert_eq!(
        outcome.conflicts_summary.sample[0].reason,
        "Overlaps existing session on 2025-01-06 at 09:30-10:30"
    );
}

#[rstest]
#[case(Some("https://zoom.us/j/123"), true)]
#[case(Some("   "), false)]
#[case(None, false)]
fn test_zoom_link_applied(#[case] link: Option<&str>, #[case] applied: bool) {
    let mut request = january_request(Uuid::new_v4());
    request.zoom_link = link.map(str::to_string);

    let plan = plan(&request, &[], &GeneratorSettings::default()).unwrap();
    assert_eq!(plan.zoom_link_applied, applied);
}

#[test]
fn test_new_session_carries_request_metadata() {
    let mut request = january_request(Uuid::new_v4());
    request.zoom_link = Some("  https://zoom.us/j/42  ".to_string());

    let plan = plan(&request, &[], &GeneratorSettings::default()).unwrap();
    let first = plan.to_create().next().unwrap();
    let session = request.new_session(first);

    assert_eq!(session.tutor_id, request.tutor_id);
    assert_eq!(session.center_id, request.center_id);
    assert_eq!(session.student_id, request.student_id);
    assert_eq!(session.start_at_utc, first.start_at_utc);
    assert_eq!(session.zoom_link.as_deref(), Some("https://zoom.us/j/42"));
}

#[test]
fn test_one_on_one_requires_student() {
    let mut request = january_request(Uuid::new_v4());
    request.student_id = None;

    let result = plan(&request, &[], &GeneratorSettings::default());
    assert!(matches!(result, Err(HubError::InvalidRequest(msg)) if msg.contains("studentId")));
}

#[test]
fn test_group_requires_group_id() {
    let mut request = january_request(Uuid::new_v4());
    request.session_type = SessionType::Group;
    request.student_id = None;

    let result = plan(&request, &[], &GeneratorSettings::default());
    assert!(matches!(result, Err(HubError::InvalidRequest(msg)) if msg.contains("groupId")));

    request.group_id = Some(Uuid::new_v4());
    assert!(plan(&request, &[], &GeneratorSettings::default()).is_ok());
}

#[test]
fn test_plan_is_deterministic() {
    let tutor = Uuid::new_v4();
    let request = january_request(tutor);
    let existing = vec![booked(tutor, 8, 9, 0, 60), booked(tutor, 9, 9, 15, 30)];
    let settings = GeneratorSettings::default();

    let first = plan(&request, &existing, &settings).unwrap();
    let second = plan(&request, &existing, &settings).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.summarize(5), second.summarize(5));
}
