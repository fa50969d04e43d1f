//! Caesar Key Recovery
//!
//! Decodes the ciphertext under all 26 shifts and ranks the results by the
//! configured [`Lexicon`]. The local ranking always runs. When remote scoring
//! is requested the same 26 candidates are also sent to the congruence
//! service and ranked separately.

use cripto_config::{AttackConfig, ScoringMode};
use cripto_congruence::{score_batch, BatchOutcome, RemoteScorer};
use cripto_core::candidate::rank_descending;
use cripto_core::{Candidate, Lexicon, ScoreSource, ScoredCandidate, ShiftCipher};
use std::ops::Range;
use tracing::{debug, info, warn};

/// Every letter shift.
pub const KEY_SPACE: Range<u8> = 0..26;

/// Number of candidates surfaced per ranking.
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteRanking {
    /// Local scoring only was configured
    NotRequested,
    /// Remote scoring was requested but no client could be built
    Unavailable { reason: String },
    Scored(BatchOutcome<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaesarReport {
    pub best_key: u8,
    /// All 26 candidates, best first
    pub local: Vec<ScoredCandidate<u8>>,
    pub remote: RemoteRanking,
}

impl CaesarReport {
    pub fn local_top(&self) -> &[ScoredCandidate<u8>] {
        &self.local[..TOP_N.min(self.local.len())]
    }

    pub fn remote_top(&self) -> Option<&[ScoredCandidate<u8>]> {
        match &self.remote {
            RemoteRanking::Scored(outcome) => Some(outcome.top(TOP_N)),
            _ => None,
        }
    }

    pub fn best_plaintext(&self) -> Option<&str> {
        self.local.first().map(|c| c.text.as_str())
    }

    /// Remote scoring was asked for and could not be provided.
    pub fn remote_request_dishonored(&self) -> bool {
        matches!(self.remote, RemoteRanking::Unavailable { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CaesarEngine {
    lexicon: Lexicon,
    mode: ScoringMode,
    remote: RemoteScorer,
    concurrency: usize,
}

impl CaesarEngine {
    /// Local-only engine.
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            mode: ScoringMode::Local,
            remote: RemoteScorer::unavailable("remote scoring not requested"),
            concurrency: 4,
        }
    }

    /// Engine for `config`. The remote client is only built when the
    /// configured scoring mode asks for it.
    pub fn from_config(config: &AttackConfig) -> Self {
        let remote = if config.scoring.wants_remote() {
            RemoteScorer::connect(&config.remote)
        } else {
            RemoteScorer::unavailable("remote scoring not requested")
        };

        Self {
            lexicon: config.lexicon,
            mode: config.scoring,
            remote,
            concurrency: config.remote.concurrency,
        }
    }

    /// Request remote scoring through `remote`.
    pub fn with_remote(mut self, remote: RemoteScorer) -> Self {
        self.mode = ScoringMode::Remote;
        self.remote = remote;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn lexicon(&self) -> Lexicon {
        self.lexicon
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// All 26 decodings, in key order.
    pub fn candidates(&self, ciphertext: &str) -> Vec<Candidate<u8>> {
        KEY_SPACE
            .map(|key| Candidate::new(key, ShiftCipher::decode(ciphertext, i32::from(key))))
            .collect()
    }

    /// Local ranking of all 26 candidates, best first. Equal scores keep key order.
    pub fn rank_local(&self, ciphertext: &str) -> Vec<ScoredCandidate<u8>> {
        let mut ranked: Vec<_> = self
            .candidates(ciphertext)
            .into_iter()
            .map(|candidate| {
                let score = f64::from(self.lexicon.score(&candidate.text));
                candidate.scored(score, ScoreSource::Local)
            })
            .collect();

        rank_descending(&mut ranked);
        ranked
    }

    pub fn best_key(&self, ciphertext: &str) -> u8 {
        self.rank_local(ciphertext).first().map_or(0, |c| c.key)
    }

    /// Local ranking, plus the remote ranking when requested.
    pub async fn evaluate(&self, ciphertext: &str) -> CaesarReport {
        let local = self.rank_local(ciphertext);
        let best_key = local.first().map_or(0, |c| c.key);
        debug!(lexicon = %self.lexicon, best_key, "local caesar ranking done");

        let remote = match (self.mode, self.remote.scorer()) {
            (ScoringMode::Local, _) => RemoteRanking::NotRequested,
            (ScoringMode::Remote, None) => {
                let reason = match &self.remote {
                    RemoteScorer::Unavailable { reason } => reason.clone(),
                    RemoteScorer::Available(_) => String::new(),
                };
                warn!(reason = %reason, "remote scoring requested but unavailable, local ranking only");
                RemoteRanking::Unavailable { reason }
            }
            (ScoringMode::Remote, Some(scorer)) => {
                let outcome = score_batch(scorer, self.candidates(ciphertext), self.concurrency).await;
                info!(
                    scored = outcome.ranked.len(),
                    failed = outcome.failures.len(),
                    "remote caesar ranking done"
                );
                RemoteRanking::Scored(outcome)
            }
        };

        CaesarReport { best_key, local, remote }
    }
}

impl Default for CaesarEngine {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}
