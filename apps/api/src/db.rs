use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_RESUMES: &str = r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id               UUID PRIMARY KEY,
        user_id          TEXT NOT NULL,
        file_name        TEXT NOT NULL,
        file_type        TEXT NOT NULL,
        personal_name    TEXT NOT NULL DEFAULT '',
        personal_email   TEXT NOT NULL DEFAULT '',
        personal_phone   TEXT NOT NULL DEFAULT '',
        score_total      INTEGER NOT NULL,
        score_keywords   INTEGER NOT NULL,
        score_formatting INTEGER NOT NULL,
        score_length     INTEGER NOT NULL,
        keywords         TEXT[] NOT NULL DEFAULT '{}',
        suggestions      TEXT[] NOT NULL DEFAULT '{}',
        created_at       TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_RESUMES_USER_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS resumes_user_created_idx
        ON resumes (user_id, created_at DESC)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `resumes` table and its lookup index if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in [CREATE_RESUMES, CREATE_RESUMES_USER_INDEX] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply resumes schema")?;
    }
    info!("Resumes schema ready");
    Ok(())
}
