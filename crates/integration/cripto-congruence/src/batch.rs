//! Batch scoring
//!
//! Scores a set of candidates with bounded concurrency. Completion order is
//! irrelevant: results are ordered by key first and then stably by score.

use cripto_core::candidate::rank_descending;
use cripto_core::{Candidate, ScoreSource, ScoredCandidate};
use futures::stream::{self, StreamExt};
use std::fmt::Display;
use tracing::{debug, warn};

use crate::{CongruenceScorer, Error};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringFailure<K> {
    pub key: K,
    pub error: Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<K> {
    /// Successfully scored candidates, best first
    pub ranked: Vec<ScoredCandidate<K>>,
    /// Candidates the service could not score, in key order
    pub failures: Vec<ScoringFailure<K>>,
}

impl<K> BatchOutcome<K> {
    pub fn top(&self, n: usize) -> &[ScoredCandidate<K>] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn attempted(&self) -> usize {
        self.ranked.len() + self.failures.len()
    }
}

/// Send every candidate to `scorer`, at most `concurrency` at a time.
///
/// A failed request is logged, recorded in `failures` and left out of the
/// ranking; the rest of the batch carries on.
pub async fn score_batch<K>(
    scorer: &dyn CongruenceScorer,
    candidates: Vec<Candidate<K>>,
    concurrency: usize,
) -> BatchOutcome<K>
where
    K: Ord + Display + Send,
{
    let total = candidates.len();
    let results: Vec<_> = stream::iter(candidates)
        .map(|candidate| async move {
            let result = scorer.score(&candidate.text).await;
            (candidate, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut ranked = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (candidate, result) in results {
        match result {
            Ok(score) => ranked.push(candidate.scored(score, ScoreSource::Remote)),
            Err(error) => {
                warn!(key = %candidate.key, text = %candidate.text, error = %error, "remote scoring failed");
                failures.push(ScoringFailure { key: candidate.key, error });
            }
        }
    }

    ranked.sort_by(|a, b| a.key.cmp(&b.key));
    rank_descending(&mut ranked);
    failures.sort_by(|a, b| a.key.cmp(&b.key));

    debug!(total, scored = ranked.len(), failed = failures.len(), "remote batch finished");
    BatchOutcome { ranked, failures }
}
