//! Repeating-Key XOR Brute Force
//!
//! Three key spaces, one filter: every key whose decoding passes
//! [`is_plausible_plaintext`] is reported, in key-space order, with no ranking
//! and no limit.
//!
//! ```text
//! SingleByte   0x00 ..= 0xff                    256 keys
//! TwoByte      0x0000 ..= 0xffff (hi, lo)    65,536 keys
//! Dictionary   file order, empty keys skipped
//! ```

use cripto_config::{Execution, XorSettings};
use cripto_core::{is_plausible_plaintext, XorCipher};
use serde::Serialize;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::Dictionary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XorKeySpace {
    SingleByte,
    TwoByte,
    Dictionary(Dictionary),
}

impl XorKeySpace {
    pub fn name(&self) -> &'static str {
        match self {
            XorKeySpace::SingleByte => "1-byte",
            XorKeySpace::TwoByte => "2-byte",
            XorKeySpace::Dictionary(_) => "dictionary",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            XorKeySpace::SingleByte => 1 << 8,
            XorKeySpace::TwoByte => 1 << 16,
            XorKeySpace::Dictionary(dictionary) => dictionary.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key at position `index` of the enumeration, `None` past the end.
    pub fn key(&self, index: usize) -> Option<Vec<u8>> {
        if index >= self.len() {
            return None;
        }
        match self {
            XorKeySpace::SingleByte => Some(vec![index as u8]),
            XorKeySpace::TwoByte => Some(vec![(index >> 8) as u8, index as u8]),
            XorKeySpace::Dictionary(dictionary) => dictionary.keys().get(index).cloned(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..self.len()).filter_map(move |index| self.key(index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XorCandidate {
    pub key: Vec<u8>,
    pub plaintext: Vec<u8>,
}

impl XorCandidate {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.plaintext)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XorFindings {
    pub strategy: &'static str,
    pub keys_tried: usize,
    pub candidates: Vec<XorCandidate>,
}

impl XorFindings {
    pub fn contains_plaintext(&self, plaintext: &[u8]) -> bool {
        self.candidates.iter().any(|c| c.plaintext == plaintext)
    }
}

pub struct XorEngine {
    execution: Execution,
    workers: usize,
}

impl XorEngine {
    pub fn new() -> Self {
        Self { execution: Execution::Sequential, workers: 1 }
    }

    pub fn from_settings(settings: &XorSettings) -> Self {
        Self {
            execution: settings.execution,
            workers: settings.worker_count(),
        }
    }

    pub fn parallel(workers: usize) -> Self {
        Self { execution: Execution::Parallel, workers: workers.max(1) }
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Run `space` with the configured execution strategy.
    pub async fn run(&self, space: XorKeySpace, ciphertext: Arc<[u8]>) -> XorFindings {
        match self.execution {
            Execution::Sequential => self.search(&space, &ciphertext),
            Execution::Parallel => self.search_parallel(Arc::new(space), ciphertext).await,
        }
    }

    /// Sweep the whole key space on the current thread.
    pub fn search(&self, space: &XorKeySpace, ciphertext: &[u8]) -> XorFindings {
        if ciphertext.is_empty() {
            debug!(strategy = space.name(), "empty ciphertext, nothing to search");
            return findings(space, 0, Vec::new());
        }

        let candidates = sweep(space, ciphertext, 0..space.len());
        findings(space, space.len(), candidates)
    }

    /// Sweep the key space split into contiguous index ranges, one blocking
    /// task per range. Results are identical to [`search`](Self::search).
    pub async fn search_parallel(&self, space: Arc<XorKeySpace>, ciphertext: Arc<[u8]>) -> XorFindings {
        if ciphertext.is_empty() {
            debug!(strategy = space.name(), "empty ciphertext, nothing to search");
            return findings(&space, 0, Vec::new());
        }

        let total = space.len();
        let chunk = total.div_ceil(self.workers.max(1)).max(1);
        let mut tasks = JoinSet::new();

        for start in (0..total).step_by(chunk) {
            let range = start..(start + chunk).min(total);
            let space = Arc::clone(&space);
            let ciphertext = Arc::clone(&ciphertext);
            tasks.spawn_blocking(move || (range.start, sweep(&space, &ciphertext, range)));
        }

        let mut parts = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(part) => parts.push(part),
                Err(e) => error!(strategy = space.name(), error = %e, "xor worker failed, its key range is missing"),
            }
        }
        parts.sort_by_key(|(start, _)| *start);

        let candidates = parts.into_iter().flat_map(|(_, found)| found).collect();
        findings(&space, total, candidates)
    }
}

impl Default for XorEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn sweep(space: &XorKeySpace, ciphertext: &[u8], range: Range<usize>) -> Vec<XorCandidate> {
    range.filter_map(|index| try_key(space, ciphertext, index)).collect()
}

fn try_key(space: &XorKeySpace, ciphertext: &[u8], index: usize) -> Option<XorCandidate> {
    let key = space.key(index)?;
    if key.is_empty() {
        return None;
    }

    let plaintext = match space {
        XorKeySpace::SingleByte => XorCipher::transform_byte(ciphertext, key[0]),
        _ => XorCipher::transform(ciphertext, &key),
    };

    is_plausible_plaintext(&plaintext).then_some(XorCandidate { key, plaintext })
}

fn findings(space: &XorKeySpace, keys_tried: usize, candidates: Vec<XorCandidate>) -> XorFindings {
    info!(strategy = space.name(), keys_tried, found = candidates.len(), "xor search finished");
    XorFindings {
        strategy: space.name(),
        keys_tried,
        candidates,
    }
}
