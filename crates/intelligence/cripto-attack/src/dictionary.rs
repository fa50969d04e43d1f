//! XOR key dictionaries
//!
//! One key per line, kept as raw bytes so non-UTF-8 key files XOR with the
//! bytes actually on disk. Lines are trimmed of ASCII whitespace and blank
//! lines dropped. A source
//! that cannot be read, or that yields no keys, is replaced by
//! [`FALLBACK_KEYS`].

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Substitute key list, in this exact order.
pub const FALLBACK_KEYS: [&str; 7] = ["clave", "admin", "1234", "secret", "pass", "test", "default"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryOrigin {
    File(PathBuf),
    Inline,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    keys: Vec<Vec<u8>>,
    origin: DictionaryOrigin,
}

impl Dictionary {
    pub fn fallback() -> Self {
        Self {
            keys: FALLBACK_KEYS.iter().map(|k| k.as_bytes().to_vec()).collect(),
            origin: DictionaryOrigin::Fallback,
        }
    }

    /// Keys supplied directly, kept as given (empty keys are skipped at
    /// search time).
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            origin: DictionaryOrigin::Inline,
        }
    }

    /// Read keys from `path`. The result may be empty.
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path).map_err(|source| Error::DictionaryIo {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            keys: parse_keys(&raw),
            origin: DictionaryOrigin::File(path.to_path_buf()),
        })
    }

    /// Read keys from `path`, substituting the fallback list when the file
    /// is missing, unreadable or has no usable keys.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(dictionary) if dictionary.is_empty() => {
                warn!(path = %path.display(), "dictionary has no usable keys, using fallback keys");
                Self::fallback()
            }
            Ok(dictionary) => {
                info!(path = %path.display(), keys = dictionary.len(), "loaded dictionary");
                dictionary
            }
            Err(e) => {
                warn!(error = %e, "using fallback keys");
                Self::fallback()
            }
        }
    }

    pub fn keys(&self) -> &[Vec<u8>] {
        &self.keys
    }

    pub fn origin(&self) -> &DictionaryOrigin {
        &self.origin
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == DictionaryOrigin::Fallback
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn parse_keys(raw: &[u8]) -> Vec<Vec<u8>> {
    raw.split(|&b| b == b'\n')
        .map(trim_ascii_whitespace)
        .filter(|line| !line.is_empty())
        .map(<[u8]>::to_vec)
        .collect()
}

fn trim_ascii_whitespace(line: &[u8]) -> &[u8] {
    let start = line.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(line.len());
    let end = line.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &line[start..end]
}
