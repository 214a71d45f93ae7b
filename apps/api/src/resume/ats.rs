//! ATS scorer: runs the keyword, formatting and length analyzers over one text
//! and folds them into a weighted breakdown plus an ordered suggestion list.
//!
//! Never fails: any string (the empty one included) and any role produce a result.

use serde::{Deserialize, Serialize};

use crate::resume::formatting::score_formatting;
use crate::resume::keyword_match::score_keywords;
use crate::resume::keywords::KeywordSet;
use crate::resume::length::score_length;
use crate::resume::scoring::{compute_total, ScoringWeights};

/// Sub-scores and their weighted total, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keywords: u32,
    pub formatting: u32,
    pub length: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsResult {
    pub score: ScoreBreakdown,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Keyword suggestions, then formatting, then length.
    pub suggestions: Vec<String>,
}

/// Scores `text` for `job_role`; unknown roles use the table's `default` keywords.
pub fn calculate_ats_score(text: &str, job_role: &str, keyword_set: &KeywordSet) -> AtsResult {
    let role_keywords = keyword_set.for_role(job_role);

    let keywords = score_keywords(text, role_keywords);
    let formatting = score_formatting(text);
    let length = score_length(text);

    let total = compute_total(
        keywords.score,
        formatting.score,
        length.score,
        &ScoringWeights::default(),
    );

    let mut suggestions = keywords.suggestions;
    suggestions.extend(formatting.suggestions);
    suggestions.extend(length.suggestions);

    AtsResult {
        score: ScoreBreakdown {
            keywords: keywords.score,
            formatting: formatting.score,
            length: length.score,
            total,
        },
        matched_keywords: keywords.matched,
        missing_keywords: keywords.missing,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::keywords::DEFAULT_ROLE;

    fn table() -> KeywordSet {
        KeywordSet::from_json(
            r#"{
                "default": ["communication", "leadership", "teamwork"],
                "frontend_developer": ["React", "CSS", "TypeScript"]
            }"#,
        )
        .unwrap()
    }

    /// Sections, hyphen bullets, all default keywords, `word_count` words total.
    fn complete_resume(word_count: usize) -> String {
        let head = "Experience\n- communication leadership teamwork\nEducation\nSkills\n";
        let used = head.split_whitespace().count();
        let filler = vec!["delivered"; word_count - used].join(" ");
        format!("{head}{filler}")
    }

    #[test]
    fn test_empty_text_scores_through_normal_deductions() {
        let set = table();
        let result = calculate_ats_score("", DEFAULT_ROLE, &set);

        assert_eq!(result.score.keywords, 0);
        assert!(result.score.formatting <= 40);
        assert_eq!(result.score.length, 0);
        assert_eq!(result.matched_keywords, Vec::<String>::new());
        assert_eq!(result.missing_keywords, set.for_role(DEFAULT_ROLE));
        // 0*0.5 + 30*0.3 + 0*0.2 = 9
        assert_eq!(result.score.total, 9);
    }

    #[test]
    fn test_complete_resume_scores_full_marks() {
        let text = complete_resume(500);
        assert_eq!(text.split_whitespace().count(), 500);

        let result = calculate_ats_score(&text, DEFAULT_ROLE, &table());
        assert_eq!(
            result.score,
            ScoreBreakdown {
                keywords: 100,
                formatting: 100,
                length: 100,
                total: 100,
            }
        );
        assert!(result.suggestions.is_empty());
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_unknown_role_matches_default_role() {
        let set = table();
        let text = "Experience leading teams; strong communication.";
        assert_eq!(
            calculate_ats_score(text, "astronaut", &set),
            calculate_ats_score(text, DEFAULT_ROLE, &set)
        );
    }

    #[test]
    fn test_role_specific_keywords_are_used() {
        let result = calculate_ats_score("REACT and css", "frontend_developer", &table());
        assert_eq!(result.matched_keywords, vec!["React", "CSS"]);
        assert_eq!(result.missing_keywords, vec!["TypeScript"]);
        assert_eq!(result.score.keywords, 67);
    }

    #[test]
    fn test_suggestion_order_keywords_formatting_length() {
        let result = calculate_ats_score("communication", DEFAULT_ROLE, &table());
        let first_format = result
            .suggestions
            .iter()
            .position(|s| s.contains("section"))
            .unwrap();
        let last_keyword = result
            .suggestions
            .iter()
            .rposition(|s| s.contains("ATS matching"))
            .unwrap();
        let length = result
            .suggestions
            .iter()
            .position(|s| s.contains("too short"))
            .unwrap();
        assert!(last_keyword < first_format);
        assert!(first_format < length);
        assert_eq!(length, result.suggestions.len() - 1);
    }

    #[test]
    fn test_total_is_weighted_sum_of_subscores() {
        let set = KeywordSet::builtin();
        let samples = [
            String::new(),
            "Skills | Python\tSQL".to_string(),
            complete_resume(320),
            complete_resume(1800),
            "word ".repeat(5000),
        ];
        for text in &samples {
            for role in ["default", "software_engineer", "data_scientist", "nope"] {
                let s = calculate_ats_score(text, role, set).score;
                let weighted = 5 * s.keywords + 3 * s.formatting + 2 * s.length;
                assert_eq!(s.total, (weighted + 5) / 10);
                assert!(s.total <= 100);
                assert!(s.keywords <= 100 && s.formatting <= 100 && s.length <= 100);
            }
        }
    }

    #[test]
    fn test_matched_and_missing_reproduce_role_keywords() {
        let set = KeywordSet::builtin();
        let text = "Python, SQL, Git and agile teams; REST API design";
        let result = calculate_ats_score(text, "software_engineer", set);
        let role_keywords = set.for_role("software_engineer");

        assert_eq!(
            result.matched_keywords.len() + result.missing_keywords.len(),
            role_keywords.len()
        );
        for keyword in role_keywords {
            let in_matched = result.matched_keywords.contains(keyword);
            let in_missing = result.missing_keywords.contains(keyword);
            assert!(in_matched ^ in_missing, "{keyword} must be in exactly one list");
        }
        let missing_in_order: Vec<&String> = role_keywords
            .iter()
            .filter(|k| result.missing_keywords.contains(k))
            .collect();
        assert_eq!(missing_in_order, result.missing_keywords.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let set = KeywordSet::builtin();
        let text = complete_resume(450);
        assert_eq!(
            calculate_ats_score(&text, "product_manager", set),
            calculate_ats_score(&text, "product_manager", set)
        );
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = calculate_ats_score("", DEFAULT_ROLE, &table());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("matchedKeywords").is_some());
        assert!(json.get("missingKeywords").is_some());
        assert_eq!(json["score"]["keywords"], 0);
    }
}
