use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::ResumeRow;
use crate::resume::ingest::IngestOutcome;

/// Fields of an upload that are not derived from the document itself.
pub struct NewResume<'a> {
    pub user_id: &'a str,
    pub file_name: &'a str,
    pub file_type: &'a str,
}

/// Persists an ingested resume. Only matched keywords are stored.
pub async fn insert_resume(
    pool: &PgPool,
    upload: NewResume<'_>,
    outcome: &IngestOutcome,
) -> Result<ResumeRow, sqlx::Error> {
    let score = &outcome.ats_score.score;
    let info = &outcome.personal_info;

    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (id, user_id, file_name, file_type,
             personal_name, personal_email, personal_phone,
             score_total, score_keywords, score_formatting, score_length,
             keywords, suggestions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(upload.user_id)
    .bind(upload.file_name)
    .bind(upload.file_type)
    .bind(&info.name)
    .bind(&info.email)
    .bind(&info.phone)
    .bind(score.total as i32)
    .bind(score.keywords as i32)
    .bind(score.formatting as i32)
    .bind(score.length as i32)
    .bind(&outcome.ats_score.matched_keywords)
    .bind(&outcome.ats_score.suggestions)
    .fetch_one(pool)
    .await
}

/// A user's resumes, newest first.
pub async fn list_resumes(pool: &PgPool, user_id: &str) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// A single resume, visible only to its owner.
pub async fn find_resume(
    pool: &PgPool,
    user_id: &str,
    resume_id: Uuid,
) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
