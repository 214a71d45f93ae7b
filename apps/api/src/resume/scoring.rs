use serde::{Deserialize, Serialize};

/// Output of a single analyzer: a 0–100 score and the suggestions that explain its deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerReport {
    pub score: u32,
    pub suggestions: Vec<String>,
}

/// Weights of the three sub-scores, in percent. Must sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keywords: u32,
    pub formatting: u32,
    pub length: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keywords: 50,
            formatting: 30,
            length: 20,
        }
    }
}

/// Weighted total: round(0.5*keywords + 0.3*formatting + 0.2*length), clamped to [0, 100].
///
/// Computed in integer arithmetic so `.5` boundaries always round up.
pub fn compute_total(keywords: u32, formatting: u32, length: u32, weights: &ScoringWeights) -> u32 {
    let weighted = clamp_score(keywords as i64) as u64 * weights.keywords as u64
        + clamp_score(formatting as i64) as u64 * weights.formatting as u64
        + clamp_score(length as i64) as u64 * weights.length as u64;
    clamp_score(round_ratio(weighted, 100) as i64)
}

/// Round-half-up of `numerator / denominator` for non-negative integers.
pub fn round_ratio(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (2 * numerator + denominator) / (2 * denominator)
}

pub fn clamp_score(score: i64) -> u32 {
    score.clamp(0, 100) as u32
}
