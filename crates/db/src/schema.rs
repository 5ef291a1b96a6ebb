use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create sessions table; the unique slot constraint backs idempotent generation
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            center_id UUID NOT NULL,
            tutor_id UUID NOT NULL,
            session_type VARCHAR(32) NOT NULL,
            student_id UUID NULL,
            group_id UUID NULL,
            start_at TIMESTAMP WITH TIME ZONE NOT NULL,
            end_at TIMESTAMP WITH TIME ZONE NOT NULL,
            zoom_link TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_session_range CHECK (end_at > start_at),
            CONSTRAINT valid_session_type CHECK (session_type IN ('one_on_one', 'group')),
            CONSTRAINT sessions_tutor_slot_unique UNIQUE (tutor_id, start_at, end_at)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per prepared query
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_sessions_center_tutor ON sessions(center_id, tutor_id)",
        "CREATE INDEX IF NOT EXISTS idx_sessions_start_at ON sessions(start_at)",
        "CREATE INDEX IF NOT EXISTS idx_sessions_end_at ON sessions(end_at)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
