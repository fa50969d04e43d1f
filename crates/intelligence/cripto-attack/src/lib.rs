//! Criptoanalisis attack engines
//!
//! Key recovery without knowing the key:
//!
//! ```text
//! ciphertext ─► decode(k) for every k in the key space ─► score / filter ─► results
//! ```
//!
//! - `caesar` - 26-key search ranked by common words, optionally re-ranked by
//!   the remote congruence service
//! - `xor` - 1-byte, 2-byte and dictionary sweeps filtered by the
//!   plausible-plaintext heuristic
//! - `dictionary` - XOR key lists with a built-in fallback
//!
//! Engines return plain result structures and never print.

pub mod caesar;
pub mod xor;
pub mod dictionary;

pub use caesar::{CaesarEngine, CaesarReport, RemoteRanking};
pub use xor::{XorCandidate, XorEngine, XorFindings, XorKeySpace};
pub use dictionary::{Dictionary, DictionaryOrigin, FALLBACK_KEYS};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dictionary not readable: {path}: {source}")]
    DictionaryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
