//! Axum route handlers for the Resume API.

use std::time::Duration;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::resume::ats::{calculate_ats_score, AtsResult};
use crate::resume::ingest::{ingest_document, IngestOutcome};
use crate::resume::personal_info::PersonalInfo;
use crate::resume::store::{find_resume, insert_resume, list_resumes, NewResume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    #[serde(default)]
    pub text: String,
    pub job_role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub resume_id: Uuid,
    pub personal_info: PersonalInfo,
    pub ats_score: AtsResult,
}

/// The multipart fields of an upload, before validation.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, String, Bytes)>,
    job_role: Option<String>,
    user_id: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/upload
///
/// Multipart fields: `resume` (the file), `userId`, optional `jobRole`.
/// Extracts text, personal info and an ATS score, then stores the record.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart).await?;

    let (file_name, mime_type, bytes) = form
        .file
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let user_id = form
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;
    let job_role = resolve_job_role(form.job_role, &state.config.default_job_role);

    info!(user_id = %user_id, file_name = %file_name, mime = %mime_type, "Resume upload received");

    let outcome: IngestOutcome = ingest_document(
        bytes,
        &mime_type,
        &job_role,
        &state.keywords,
        Duration::from_secs(state.config.extraction_timeout_secs),
    )
    .await?;

    let row = insert_resume(
        &state.db,
        NewResume {
            user_id: &user_id,
            file_name: &file_name,
            file_type: &mime_type,
        },
        &outcome,
    )
    .await?;

    info!(user_id = %user_id, resume_id = %row.id, total = outcome.ats_score.score.total, "Resume stored");

    Ok(Json(UploadResponse {
        message: "Resume uploaded and parsed successfully".to_string(),
        resume_id: row.id,
        personal_info: outcome.personal_info,
        ats_score: outcome.ats_score,
    }))
}

/// POST /api/resume/ats-score
///
/// Scores raw resume text directly; no extraction and no personal info.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<AtsScoreRequest>,
) -> Result<Json<AtsResult>, AppError> {
    if request.text.is_empty() {
        return Err(AppError::Validation("No resume text provided".to_string()));
    }
    let job_role = resolve_job_role(request.job_role, &state.config.default_job_role);

    Ok(Json(calculate_ats_score(
        &request.text,
        &job_role,
        &state.keywords,
    )))
}

/// GET /api/resume?userId=…
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let rows = list_resumes(&state.db, &params.user_id).await?;
    Ok(Json(rows.into_iter().map(ResumeRecord::from).collect()))
}

/// GET /api/resume/:id?userId=…
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserQuery>,
) -> Result<Json<ResumeRecord>, AppError> {
    let row = find_resume(&state.db, &params.user_id, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(row.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
                form.file = Some((file_name, mime_type, bytes));
            }
            "jobRole" | "userId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field {name}: {e}")))?;
                if name == "jobRole" {
                    form.job_role = Some(value);
                } else {
                    form.user_id = Some(value);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn resolve_job_role(requested: Option<String>, fallback: &str) -> String {
    requested
        .map(|role| role.trim().to_string())
        .filter(|role| !role.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
