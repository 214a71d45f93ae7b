//! Formatting analyzer: structural heuristics over the flattened text.
//! Starts at 100 and applies independent, cumulative deductions.

use crate::resume::scoring::{clamp_score, AnalyzerReport};

const REQUIRED_SECTIONS: &[&str] = &["experience", "education", "skills"];

const MISSING_SECTION_PENALTY: i64 = 20;
const NO_BULLETS_PENALTY: i64 = 10;
const COMPLEX_LAYOUT_PENALTY: i64 = 20;

/// More tabs than this reads as a table flattened by extraction.
const MAX_TABS: usize = 10;

const BULLET: char = '•';

pub fn score_formatting(text: &str) -> AnalyzerReport {
    let text_lower = text.to_lowercase();
    let mut score: i64 = 100;
    let mut suggestions = Vec::new();

    for section in REQUIRED_SECTIONS {
        if !text_lower.contains(section) {
            score -= MISSING_SECTION_PENALTY;
            suggestions.push(format!(
                "Add a \"{}\" section to your resume",
                capitalize(section)
            ));
        }
    }

    if !text.contains(BULLET) && !text.contains('-') {
        score -= NO_BULLETS_PENALTY;
        suggestions
            .push("Use bullet points to list your achievements and responsibilities".to_string());
    }

    let tab_count = text.matches('\t').count();
    if text.contains('|') || tab_count > MAX_TABS {
        score -= COMPLEX_LAYOUT_PENALTY;
        suggestions.push(
            "Avoid complex formatting like tables that ATS systems struggle to parse".to_string(),
        );
    }

    AnalyzerReport {
        score: clamp_score(score),
        suggestions,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
