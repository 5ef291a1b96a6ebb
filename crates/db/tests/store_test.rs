use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tutorhub_core::{
    models::session::{ExistingSession, NewSession, SessionType},
    store::{SessionStore, SlotInsert},
};
use tutorhub_db::{mock::memory::InMemorySessionStore, models::DbSession};
use uuid::Uuid;

fn new_session(center_id: Uuid, tutor_id: Uuid, hour: u32) -> NewSession {
    let start = Utc.with_ymd_and_hms(2025, 1, 6, hour, 0, 0).unwrap();
    NewSession {
        center_id,
        tutor_id,
        session_type: SessionType::Group,
        student_id: None,
        group_id: Some(Uuid::new_v4()),
        start_at_utc: start,
        end_at_utc: start + chrono::Duration::hours(1),
        zoom_link: None,
    }
}

#[test]
fn test_db_session_converts_to_existing_session() {
    let row = DbSession {
        id: Uuid::new_v4(),
        center_id: Uuid::new_v4(),
        tutor_id: Uuid::new_v4(),
        session_type: "one_on_one".to_string(),
        student_id: Some(Uuid::new_v4()),
        group_id: None,
        start_at: Utc.with_ymd_and_hms(2025, 1, 6, 16, 0, 0).unwrap(),
        end_at: Utc.with_ymd_and_hms(2025, 1, 6, 17, 0, 0).unwrap(),
        zoom_link: Some("https://zoom.us/j/1".to_string()),
        created_at: Utc::now(),
    };

    let session = ExistingSession::try_from(row.clone()).unwrap();

    assert_eq!(session.id, row.id);
    assert_eq!(session.session_type, SessionType::OneOnOne);
    assert_eq!(session.start_at_utc, row.start_at);
    assert_eq!(session.end_at_utc, row.end_at);
    assert_eq!(session.zoom_link, row.zoom_link);
}

#[test]
fn test_db_session_with_unknown_type_is_rejected() {
    let row = DbSession {
        id: Uuid::new_v4(),
        center_id: Uuid::new_v4(),
        tutor_id: Uuid::new_v4(),
        session_type: "workshop".to_string(),
        student_id: None,
        group_id: None,
        start_at: Utc::now(),
        end_at: Utc::now() + chrono::Duration::hours(1),
        zoom_link: None,
        created_at: Utc::now(),
    };

    let err = ExistingSession::try_from(row).unwrap_err();
    assert!(err.to_string().contains("Unknown session type 'workshop'"));
}

#[tokio::test]
async fn test_memory_store_reports_taken_slot() {
    let store = InMemorySessionStore::new();
    let center = Uuid::new_v4();
    let tutor = Uuid::new_v4();

    store.create_sessions(&[new_session(center, tutor, 16)]).await.unwrap();
    let results = store
        .create_sessions(&[
            new_session(center, tutor, 16),
            // Same slot for another tutor is fine
            new_session(center, Uuid::new_v4(), 16),
        ])
        .await
        .unwrap();

    assert_eq!(results[0], SlotInsert::AlreadyTaken);
    assert!(matches!(results[1], SlotInsert::Created(_)));
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_memory_store_detects_repeats_within_a_batch() {
    let store = InMemorySessionStore::new();
    let center = Uuid::new_v4();
    let tutor = Uuid::new_v4();

    let results = store
        .create_sessions(&[new_session(center, tutor, 9), new_session(center, tutor, 9)])
        .await
        .unwrap();

    assert!(matches!(results[0], SlotInsert::Created(_)));
    assert_eq!(results[1], SlotInsert::AlreadyTaken);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_memory_store_failed_batch_persists_nothing() {
    let store = InMemorySessionStore::new().failing_on_insert(3);
    let center = Uuid::new_v4();
    let tutor = Uuid::new_v4();

    let result = store
        .create_sessions(&[
            new_session(center, tutor, 8),
            new_session(center, tutor, 9),
            new_session(center, tutor, 10),
        ])
        .await;

    assert!(result.is_err());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_memory_store_fetch_is_scoped_and_half_open() {
    let store = InMemorySessionStore::new();
    let center = Uuid::new_v4();
    let tutor = Uuid::new_v4();

    store
        .create_sessions(&[
            new_session(center, tutor, 8),
            new_session(center, tutor, 10),
            new_session(center, tutor, 12),
            new_session(Uuid::new_v4(), tutor, 11),
        ])
        .await
        .unwrap();

    // [09:00, 12:00) touches the 08:00 session's end and the 12:00 session's start
    let from = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap();
    let fetched = store
        .fetch_existing_sessions(center, tutor, from, to)
        .await
        .unwrap();

    let starts: Vec<u32> = fetched
        .iter()
        .map(|s| chrono::Timelike::hour(&s.start_at_utc))
        .collect();
    assert_eq!(starts, vec![10]);
}
