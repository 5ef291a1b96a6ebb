use crate::models::DbSession;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tutorhub_core::models::session::NewSession;
use uuid::Uuid;

/// Inserts a session unless the tutor already holds the exact slot, in which
/// case `None` is returned and the surrounding transaction stays usable.
pub async fn insert_session<'e, E>(executor: E, session: &NewSession) -> Result<Option<DbSession>>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating session: id={}, tutor={}, start={}, end={}",
        id, session.tutor_id, session.start_at_utc, session.end_at_utc
    );

    let db_session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (id, center_id, tutor_id, session_type, student_id, group_id,
                              start_at, end_at, zoom_link, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (tutor_id, start_at, end_at) DO NOTHING
        RETURNING id, center_id, tutor_id, session_type, student_id, group_id,
                  start_at, end_at, zoom_link, created_at
        "#,
    )
    .bind(id)
    .bind(session.center_id)
    .bind(session.tutor_id)
    .bind(session.session_type.as_str())
    .bind(session.student_id)
    .bind(session.group_id)
    .bind(session.start_at_utc)
    .bind(session.end_at_utc)
    .bind(session.zoom_link.as_deref())
    .bind(now)
    .fetch_optional(executor)
    .await?;

    Ok(db_session)
}

/// Sessions for a tutor at a center overlapping `[from, to)`.
pub async fn get_sessions_in_range(
    pool: &Pool<Postgres>,
    center_id: Uuid,
    tutor_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbSession>> {
    let sessions = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT id, center_id, tutor_id, session_type, student_id, group_id,
               start_at, end_at, zoom_link, created_at
        FROM sessions
        WHERE center_id = $1
          AND tutor_id = $2
          AND start_at < $4
          AND end_at > $3
        ORDER BY start_at ASC, id ASC
        "#,
    )
    .bind(center_id)
    .bind(tutor_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}
