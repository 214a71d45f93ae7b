use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::resume::ats::{calculate_ats_score, AtsResult};
use crate::resume::extract::{extract_text, DocumentType, ExtractError};
use crate::resume::keywords::KeywordSet;
use crate::resume::personal_info::{extract_personal_info, PersonalInfo};

/// Everything the upload flow derives from one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    pub personal_info: PersonalInfo,
    pub ats_score: AtsResult,
}

/// Extracts, then scores, one uploaded document.
///
/// The MIME type is checked before any parsing. Extraction runs on the
/// blocking pool under `timeout`; a timeout or a parser panic is reported as
/// `ExtractionFailed`. Scoring only runs on successfully extracted text.
pub async fn ingest_document(
    bytes: Bytes,
    mime_type: &str,
    job_role: &str,
    keyword_set: &KeywordSet,
    timeout: Duration,
) -> Result<IngestOutcome, ExtractError> {
    let doc_type = DocumentType::from_mime(mime_type)?;

    let text = extract_blocking(bytes, doc_type, timeout).await?;

    let personal_info = extract_personal_info(&text);
    let ats_score = calculate_ats_score(&text, job_role, keyword_set);

    info!(
        job_role,
        total = ats_score.score.total,
        matched = ats_score.matched_keywords.len(),
        missing = ats_score.missing_keywords.len(),
        "Scored resume"
    );

    Ok(IngestOutcome {
        personal_info,
        ats_score,
    })
}

async fn extract_blocking(
    bytes: Bytes,
    doc_type: DocumentType,
    timeout: Duration,
) -> Result<String, ExtractError> {
    let mime = doc_type.mime();
    let task = tokio::task::spawn_blocking(move || extract_text(&bytes, mime));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result.inspect_err(|e| warn!(mime = doc_type.mime(), "{e}")),
        Ok(Err(join_error)) => {
            warn!("Extraction task aborted: {join_error}");
            Err(ExtractError::ExtractionFailed(format!(
                "extraction aborted: {join_error}"
            )))
        }
        Err(_) => {
            warn!(
                mime = doc_type.mime(),
                timeout_secs = timeout.as_secs(),
                "Extraction timed out"
            );
            Err(ExtractError::ExtractionFailed(format!(
                "extraction timed out after {}s",
                timeout.as_secs()
            )))
        }
    }
}
