//! Length analyzer: word-count score. Too-short and too-long checks run independently.

use crate::resume::scoring::{clamp_score, round_ratio, AnalyzerReport};

pub const MIN_WORDS: usize = 300;
pub const MAX_WORDS: usize = 1000;

pub fn score_length(text: &str) -> AnalyzerReport {
    let word_count = text.split_whitespace().count();
    let mut score: i64 = 100;
    let mut suggestions = Vec::new();

    if word_count < MIN_WORDS {
        score -= round_ratio(100 * (MIN_WORDS - word_count) as u64, MIN_WORDS as u64) as i64;
        suggestions.push(format!(
            "Your resume is too short. Aim for at least {MIN_WORDS} words for better ATS performance"
        ));
    }

    if word_count > MAX_WORDS {
        score -= round_ratio(100 * (word_count - MAX_WORDS) as u64, MAX_WORDS as u64) as i64;
        suggestions.push(format!(
            "Your resume is too long. Try to keep it under {MAX_WORDS} words for better ATS performance"
        ));
    }

    AnalyzerReport {
        score: clamp_score(score),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let report = score_length("");
        assert_eq!(report.score, 0);
        assert_eq!(report.suggestions.len(), 1);
        assert!(report.suggestions[0].contains("too short"));
    }

    #[test]
    fn test_exactly_min_words_has_no_penalty() {
        let report = score_length(&words(300));
        assert_eq!(report.score, 100);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_short_text_penalty_is_proportional() {
        // (300 - 150) / 300 = 50%
        assert_eq!(score_length(&words(150)).score, 50);
        // (300 - 299) / 300 = 0.33% → rounds to 0
        assert_eq!(score_length(&words(299)).score, 100);
    }

    #[test]
    fn test_exactly_max_words_has_no_penalty() {
        assert_eq!(score_length(&words(1000)).score, 100);
    }

    #[test]
    fn test_over_max_words_is_penalized() {
        let report = score_length(&words(1001));
        // round(0.1) = 0 points, but the suggestion still fires
        assert_eq!(report.score, 100);
        assert_eq!(report.suggestions.len(), 1);
        assert!(report.suggestions[0].contains("too long"));

        assert_eq!(score_length(&words(1500)).score, 50);
        assert_eq!(score_length(&words(2500)).score, 0);
    }

    #[test]
    fn test_mixed_whitespace_counts_tokens() {
        let text = format!("{}\n\t{}", words(200), words(100));
        assert_eq!(score_length(&text).score, 100);
    }
}
