//! Keyword-preference scoring
//!
//! With `D` description keywords, `T` title keywords and `N = D + T`:
//! - description keyword at rank `i` found in the description adds `D - i`
//! - title keyword at rank `i` found in the title adds `N - i`
//! - the sum is divided by `N (N + 1) / 2`, the score of a perfect match
//! - any exclude keyword in the title forces the rating to exactly 0
//!
//! Matching is a case-sensitive literal substring test.

use crate::domain::SearchParameters;

/// Rating and the keywords that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// Normalized rating in `[0, 1]`
    pub rating: f64,
    /// Weighted sum before normalization and exclusion
    pub raw_score: u64,
    /// Description keywords found, in preference order
    pub matched_keywords: Vec<String>,
    /// Title keywords found, in preference order
    pub matched_title_keywords: Vec<String>,
    /// An exclude keyword hit the title
    pub excluded: bool,
}

/// Score one listing against the search preferences
pub fn score(title: &str, description: &str, params: &SearchParameters) -> ScoreOutcome {
    let description_keywords = params.description_keywords();
    let title_keywords = params.title_keywords();
    let total_keywords = params.total_keywords();

    let mut raw_score = 0u64;
    let mut matched_keywords = Vec::new();
    let mut matched_title_keywords = Vec::new();

    for (rank, keyword) in description_keywords.iter().enumerate() {
        if description.contains(keyword.as_str()) {
            raw_score += description_weight(description_keywords.len(), rank);
            matched_keywords.push(keyword.clone());
        }
    }

    for (rank, keyword) in title_keywords.iter().enumerate() {
        if title.contains(keyword.as_str()) {
            raw_score += title_weight(total_keywords, rank);
            matched_title_keywords.push(keyword.clone());
        }
    }

    let max_score = triangular(total_keywords);
    let mut rating = if max_score == 0 {
        0.0
    } else {
        raw_score as f64 / max_score as f64
    };

    let excluded = params
        .exclude_keywords()
        .iter()
        .any(|keyword| title.contains(keyword.as_str()));
    if excluded {
        rating = 0.0;
    }

    ScoreOutcome {
        rating,
        raw_score,
        matched_keywords,
        matched_title_keywords,
        excluded,
    }
}

/// Weight of a description keyword at 0-based `rank`
pub fn description_weight(description_keyword_count: usize, rank: usize) -> u64 {
    description_keyword_count.saturating_sub(rank) as u64
}

/// Weight of a title keyword at 0-based `rank`
pub fn title_weight(total_keywords: usize, rank: usize) -> u64 {
    total_keywords.saturating_sub(rank) as u64
}

/// `1 + 2 + ... + n`
pub fn triangular(n: usize) -> u64 {
    let n = n as u64;
    n * (n + 1) / 2
}
