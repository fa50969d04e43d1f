//! Attack configuration
//!
//! One explicit value handed to the engines at construction. Loaded from
//! YAML (`~/.config/criptoanalisis/config.yaml` by default), then adjusted by
//! `CRIPTO_*` environment variables.
//!
//! ```yaml
//! scoring: remote
//! lexicon: spanish
//! remote:
//!   base_url: http://localhost:8000
//!   path: /evaluar_congruencia/
//! xor:
//!   dictionary: dictionaries/clavesXOR.txt
//!   execution: parallel
//! ```

use cripto_core::Lexicon;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config file not readable: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse failed: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Whether the Caesar engine also consults the remote congruence service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Local,
    /// Local ranking plus remote congruence ranking
    Remote,
}

impl ScoringMode {
    pub fn wants_remote(&self) -> bool {
        matches!(self, ScoringMode::Remote)
    }
}

/// How exhaustive XOR sweeps are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    #[default]
    Sequential,
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub base_url: String,
    pub path: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Requests in flight at once during a batch
    pub concurrency: usize,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            path: "/evaluar_congruencia/".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            concurrency: 4,
        }
    }
}

impl RemoteSettings {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XorSettings {
    pub dictionary: PathBuf,
    pub execution: Execution,
    /// 0 means one worker per available core
    pub workers: usize,
}

impl Default for XorSettings {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("dictionaries/clavesXOR.txt"),
            execution: Execution::Sequential,
            workers: 0,
        }
    }
}

impl XorSettings {
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    pub scoring: ScoringMode,
    pub lexicon: Lexicon,
    pub remote: RemoteSettings,
    pub xor: XorSettings,
}

impl AttackConfig {
    /// `~/.config/criptoanalisis/config.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("criptoanalisis")
            .join("config.yaml")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one the default location is
    /// tried and defaults are used when it is absent. Environment overrides
    /// are applied last, then the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    debug!(path = %default.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Apply `CRIPTO_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CRIPTO_REMOTE_URL") {
            self.remote.base_url = url;
        }
        if let Some(path) = lookup("CRIPTO_REMOTE_PATH") {
            self.remote.path = path;
        }
        if let Some(dictionary) = lookup("CRIPTO_DICTIONARY") {
            self.xor.dictionary = PathBuf::from(dictionary);
        }
        if let Some(scoring) = lookup("CRIPTO_SCORING") {
            self.scoring = match scoring.to_lowercase().as_str() {
                "local" => ScoringMode::Local,
                "remote" => ScoringMode::Remote,
                other => {
                    return Err(Error::Invalid(format!(
                        "CRIPTO_SCORING must be local or remote, got {}",
                        other
                    )))
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.connect_timeout_secs == 0 || self.remote.request_timeout_secs == 0 {
            return Err(Error::Invalid("remote timeouts must be at least 1 second".into()));
        }
        if self.remote.concurrency == 0 {
            return Err(Error::Invalid("remote.concurrency must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_match_service_contract() {
        let config = AttackConfig::default();
        assert_eq!(config.scoring, ScoringMode::Local);
        assert_eq!(config.lexicon, Lexicon::English);
        assert_eq!(config.remote.endpoint(), "http://localhost:8000/evaluar_congruencia/");
        assert_eq!(config.remote.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.remote.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.xor.dictionary, PathBuf::from("dictionaries/clavesXOR.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AttackConfig::from_yaml(
            "scoring: remote\nlexicon: spanish\nremote:\n  base_url: http://scorer:9000/\nxor:\n  execution: parallel\n  workers: 3\n",
        )
        .unwrap();

        assert!(config.scoring.wants_remote());
        assert_eq!(config.lexicon, Lexicon::Spanish);
        assert_eq!(config.remote.endpoint(), "http://scorer:9000/evaluar_congruencia/");
        assert_eq!(config.remote.concurrency, 4);
        assert_eq!(config.xor.execution, Execution::Parallel);
        assert_eq!(config.xor.worker_count(), 3);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AttackConfig::from_yaml("  \n").unwrap(), AttackConfig::default());
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let err = AttackConfig::from_yaml("scoring: sometimes").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CRIPTO_REMOTE_URL", "http://10.0.0.2:8000"),
            ("CRIPTO_DICTIONARY", "/tmp/keys.txt"),
            ("CRIPTO_SCORING", "REMOTE"),
        ]
        .into_iter()
        .collect();

        let mut config = AttackConfig::default();
        config
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.remote.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.xor.dictionary, PathBuf::from("/tmp/keys.txt"));
        assert_eq!(config.scoring, ScoringMode::Remote);
    }

    #[test]
    fn test_invalid_scoring_override() {
        let mut config = AttackConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "CRIPTO_SCORING").then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = AttackConfig::default();
        config.remote.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = AttackConfig::default();
        config.remote.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lexicon: spanish").unwrap();
        let config = AttackConfig::from_file(file.path()).unwrap();
        assert_eq!(config.lexicon, Lexicon::Spanish);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = AttackConfig::load(Some(Path::new("/nonexistent/criptoanalisis.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
