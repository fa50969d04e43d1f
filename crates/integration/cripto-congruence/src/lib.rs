//! Remote Congruence Scoring
//!
//! Candidate plaintexts are sent one by one to an external service that
//! answers with a real-valued congruence score (higher = more natural text).
//!
//! ```text
//! POST {base_url}{path}          content-type: application/json
//! {"texto": "<candidate>"}
//!
//! 200 {"puntuacion_congruencia": 7.4, ...}
//! ```
//!
//! Every failure is scoped to a single candidate. A scorer that cannot be
//! built at all turns into [`RemoteScorer::Unavailable`] instead of an error.

pub mod client;
pub mod remote;
pub mod batch;

pub use client::HttpCongruenceScorer;
pub use remote::RemoteScorer;
pub use batch::{score_batch, BatchOutcome, ScoringFailure};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("HTTP client construction failed: {0}")]
    Client(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response is not JSON: {0}")]
    Parse(String),

    #[error("Response has no numeric puntuacion_congruencia: {0}")]
    MissingScore(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Anything that can rate how congruent a piece of text is.
#[async_trait]
pub trait CongruenceScorer: Send + Sync {
    async fn score(&self, text: &str) -> Result<f64>;
}
