//! Criptoanalisis core
//!
//! The deterministic building blocks every attack is made of.
//!
//! # Modules
//! - `caesar` - Letter/digit shift codec
//! - `xor` - Repeating-key XOR codec
//! - `plaintext` - Plausible-plaintext predicate
//! - `hex` - Lenient hex parsing and spaced hex output
//! - `lexicon` - Reference word lists for shift scoring
//! - `candidate` - Candidates, scores and ranking

pub mod caesar;
pub mod xor;
pub mod plaintext;
pub mod hex;
pub mod lexicon;
pub mod candidate;

pub use caesar::ShiftCipher;
pub use xor::XorCipher;
pub use plaintext::is_plausible_plaintext;
pub use lexicon::Lexicon;
pub use candidate::{Candidate, ScoredCandidate, ScoreSource};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown lexicon: {0} (expected english or spanish)")]
    UnknownLexicon(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Size of the letter alphabet the shift cipher wraps around.
pub const LETTERS: i32 = 26;

/// Size of the digit range the shift cipher wraps around.
pub const DIGITS: i32 = 10;
