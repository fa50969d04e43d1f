//! Remote scorer capability
//!
//! Built once per session. If the client cannot be constructed the session
//! keeps an `Unavailable` scorer and callers fall back to local scoring.

use cripto_config::RemoteSettings;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{CongruenceScorer, HttpCongruenceScorer};

#[derive(Clone)]
pub enum RemoteScorer {
    Unavailable { reason: String },
    Available(Arc<dyn CongruenceScorer>),
}

impl RemoteScorer {
    /// Build the HTTP scorer, degrading to `Unavailable` on failure.
    pub fn connect(settings: &RemoteSettings) -> Self {
        match HttpCongruenceScorer::new(settings) {
            Ok(scorer) => {
                info!(endpoint = %scorer.endpoint(), "remote congruence scorer ready");
                RemoteScorer::Available(Arc::new(scorer))
            }
            Err(e) => {
                warn!(error = %e, "remote congruence scorer unavailable, local scoring only");
                RemoteScorer::Unavailable { reason: e.to_string() }
            }
        }
    }

    pub fn from_scorer(scorer: impl CongruenceScorer + 'static) -> Self {
        RemoteScorer::Available(Arc::new(scorer))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        RemoteScorer::Unavailable { reason: reason.into() }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RemoteScorer::Available(_))
    }

    pub fn scorer(&self) -> Option<&dyn CongruenceScorer> {
        match self {
            RemoteScorer::Available(scorer) => Some(scorer.as_ref()),
            RemoteScorer::Unavailable { .. } => None,
        }
    }
}

impl fmt::Debug for RemoteScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteScorer::Available(_) => f.write_str("RemoteScorer::Available"),
            RemoteScorer::Unavailable { reason } => {
                write!(f, "RemoteScorer::Unavailable({})", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_default_settings() {
        // Construction does not touch the network
        let remote = RemoteScorer::connect(&RemoteSettings::default());
        assert!(remote.is_available());
        assert!(remote.scorer().is_some());
    }

    #[test]
    fn test_connect_invalid_url_degrades() {
        let settings = RemoteSettings {
            base_url: "::not-a-url::".to_string(),
            ..RemoteSettings::default()
        };
        let remote = RemoteScorer::connect(&settings);
        assert!(!remote.is_available());
        assert!(remote.scorer().is_none());
        assert!(format!("{:?}", remote).starts_with("RemoteScorer::Unavailable"));
    }
}
