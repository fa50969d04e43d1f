//! Candidates and Scores
//!
//! A candidate is one key paired with the text it decodes to. Scores carry
//! their [`ScoreSource`]: local heuristic points and remote congruence scores
//! live on different scales and are ranked separately.

use serde::Serialize;
use std::cmp::Ordering;

/// Display limit for decoded text in local rankings.
pub const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate<K> {
    pub key: K,
    pub text: String,
}

impl<K> Candidate<K> {
    pub fn new(key: K, text: impl Into<String>) -> Self {
        Self { key, text: text.into() }
    }

    pub fn scored(self, score: f64, source: ScoreSource) -> ScoredCandidate<K> {
        ScoredCandidate { key: self.key, text: self.text, score, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    /// Common-word and space heuristic
    Local,
    /// External congruence service
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate<K> {
    pub key: K,
    pub text: String,
    pub score: f64,
    pub source: ScoreSource,
}

impl<K> ScoredCandidate<K> {
    /// Text cut to `max_chars` characters, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        preview(&self.text, max_chars)
    }
}

/// Sort descending by score. The sort is stable, so equal scores keep their
/// incoming order (ascending key order when candidates were built that way).
pub fn rank_descending<K>(candidates: &mut [ScoredCandidate<K>]) {
    debug_assert!(
        candidates.windows(2).all(|w| w[0].source == w[1].source),
        "local and remote scores must not share a ranking"
    );
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
