use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resume::ats::ScoreBreakdown;
use crate::resume::personal_info::PersonalInfo;

/// One row of the `resumes` table.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub file_type: String,
    pub personal_name: String,
    pub personal_email: String,
    pub personal_phone: String,
    pub score_total: i32,
    pub score_keywords: i32,
    pub score_formatting: i32,
    pub score_length: i32,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// API shape of a stored resume. `keywords` holds the matched keywords only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub file_type: String,
    pub personal_info: PersonalInfo,
    pub ats_score: ScoreBreakdown,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeRecord {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            file_name: row.file_name,
            file_type: row.file_type,
            personal_info: PersonalInfo {
                name: row.personal_name,
                email: row.personal_email,
                phone: row.personal_phone,
            },
            ats_score: ScoreBreakdown {
                keywords: row.score_keywords.max(0) as u32,
                formatting: row.score_formatting.max(0) as u32,
                length: row.score_length.max(0) as u32,
                total: row.score_total.max(0) as u32,
            },
            keywords: row.keywords,
            suggestions: row.suggestions,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_nested_record() {
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            file_name: "cv.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            personal_name: "Jane Doe".to_string(),
            personal_email: "jane@x.com".to_string(),
            personal_phone: String::new(),
            score_total: 72,
            score_keywords: 60,
            score_formatting: 90,
            score_length: 75,
            keywords: vec!["Rust".to_string()],
            suggestions: vec![],
            created_at: Utc::now(),
        };

        let record = ResumeRecord::from(row);
        assert_eq!(record.personal_info.name, "Jane Doe");
        assert_eq!(record.ats_score.total, 72);
        assert_eq!(record.ats_score.formatting, 90);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["atsScore"]["length"], 75);
        assert_eq!(json["personalInfo"]["email"], "jane@x.com");
        assert_eq!(json["fileType"], "application/pdf");
    }
}
