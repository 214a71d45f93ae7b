//! Keyword matcher: case-insensitive substring containment against a role's keyword list.
//!
//! Containment is deliberately naive: "Java" matches inside "JavaScript".

use serde::{Deserialize, Serialize};

use crate::resume::scoring::round_ratio;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub score: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Scores `text` against `role_keywords`.
///
/// score = round(100 × matched / total). An empty keyword list scores 100
/// with nothing missing, so there is nothing to suggest.
pub fn score_keywords(text: &str, role_keywords: &[String]) -> KeywordReport {
    let text_lower = text.to_lowercase();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut suggestions = Vec::new();

    for keyword in role_keywords {
        if text_lower.contains(&keyword.to_lowercase()) {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
            suggestions.push(format!(
                "Add \"{keyword}\" to your resume to improve ATS matching"
            ));
        }
    }

    let score = if role_keywords.is_empty() {
        100
    } else {
        round_ratio(100 * matched.len() as u64, role_keywords.len() as u64) as u32
    };

    KeywordReport {
        score,
        matched,
        missing,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let report = score_keywords("Built dashboards in REACT and Redux", &keywords(&["react"]));
        assert_eq!(report.matched, vec!["react"]);
        assert!(report.missing.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_substring_not_whole_word() {
        let report = score_keywords("Five years of JavaScript", &keywords(&["Java"]));
        assert_eq!(report.matched, vec!["Java"]);
    }

    #[test]
    fn test_partial_match_rounds() {
        let report = score_keywords("python and sql", &keywords(&["Python", "SQL", "Go"]));
        // 2/3 → 66.67 → 67
        assert_eq!(report.score, 67);
        assert_eq!(report.missing, vec!["Go"]);
    }

    #[test]
    fn test_matched_and_missing_partition_keywords_in_order() {
        let list = keywords(&["Docker", "AWS", "Linux", "Terraform", "Git"]);
        let report = score_keywords("linux admin, terraform modules", &list);
        assert_eq!(report.matched, vec!["Linux", "Terraform"]);
        assert_eq!(report.missing, vec!["Docker", "AWS", "Git"]);

        let mut union: Vec<&String> = report.matched.iter().chain(&report.missing).collect();
        union.sort_by_key(|k| list.iter().position(|l| l == *k));
        assert_eq!(union, list.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_one_suggestion_per_missing_keyword() {
        let report = score_keywords("", &keywords(&["Rust", "Kafka"]));
        assert_eq!(report.score, 0);
        assert_eq!(
            report.suggestions,
            vec![
                "Add \"Rust\" to your resume to improve ATS matching",
                "Add \"Kafka\" to your resume to improve ATS matching",
            ]
        );
    }

    #[test]
    fn test_empty_keyword_list_scores_full() {
        let report = score_keywords("anything", &[]);
        assert_eq!(report.score, 100);
        assert!(report.matched.is_empty());
        assert!(report.missing.is_empty());
        assert!(report.suggestions.is_empty());
    }
}
