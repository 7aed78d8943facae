//! Configuration loading and validation for Hindsight.
//!
//! Loads configuration from `~/.hindsight/config.toml` with environment
//! variable overrides. The resolved [`EngineConfig`] is built once at the
//! start of an invocation and threaded through every pipeline stage as a
//! parameter — no stage reads the environment on its own.
//!
//! The hook contract means configuration can never fail an invocation:
//! a missing or malformed config file resolves to built-in defaults.

use hindsight_core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The engine configuration, resolved once per invocation.
///
/// Maps directly to `~/.hindsight/config.toml`; every field can also be
/// overridden via a `HINDSIGHT_*` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When false, the pipeline skips all processing and emits no output.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Upper bound on how many examples a selection may return.
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,

    /// Minimum `rating` an example needs to be eligible.
    #[serde(default = "default_min_rating")]
    pub min_rating: u8,

    /// When true, append one structured debug record per invocation.
    #[serde(default)]
    pub debug: bool,

    /// Composite scores below this floor are dropped during selection.
    #[serde(default = "default_relevance_floor")]
    pub relevance_floor: f32,

    /// Where the example corpus lives.
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Where debug records are appended when `debug` is on.
    #[serde(default = "default_debug_log_path")]
    pub debug_log_path: PathBuf,
}

fn default_enabled() -> bool {
    true
}
fn default_max_examples() -> usize {
    3
}
fn default_min_rating() -> u8 {
    7
}
fn default_relevance_floor() -> f32 {
    0.30
}
fn default_corpus_path() -> PathBuf {
    EngineConfig::config_dir().join("examples.jsonl")
}
fn default_debug_log_path() -> PathBuf {
    EngineConfig::config_dir().join("debug.jsonl")
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_examples: default_max_examples(),
            min_rating: default_min_rating(),
            debug: false,
            relevance_floor: default_relevance_floor(),
            corpus_path: default_corpus_path(),
            debug_log_path: default_debug_log_path(),
        }
    }
}

impl EngineConfig {
    /// Resolve the effective configuration for one invocation.
    ///
    /// Precedence, later wins: built-in defaults, then the config file,
    /// then `HINDSIGHT_*` environment variables. Never fails — a broken
    /// file or an invalid value falls back to defaults with a warning.
    pub fn resolve() -> Self {
        let path = Self::config_dir().join("config.toml");
        let mut config = match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Config file unusable, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());

        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "Invalid configuration, using defaults");
            return Self::default();
        }
        config
    }

    /// Load configuration from a specific file path.
    ///
    /// A missing file yields defaults; read/parse failures are returned so
    /// the `status` command can surface them to operators.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `HINDSIGHT_*` environment overrides via the given lookup.
    ///
    /// Values that fail to parse are ignored — a typo in an env var must
    /// not change behavior beyond losing that one override.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("HINDSIGHT_ENABLED").and_then(|v| parse_bool(&v)) {
            self.enabled = v;
        }
        if let Some(v) = lookup("HINDSIGHT_MAX_EXAMPLES").and_then(|v| v.parse().ok()) {
            self.max_examples = v;
        }
        if let Some(v) = lookup("HINDSIGHT_MIN_RATING").and_then(|v| v.parse().ok()) {
            self.min_rating = v;
        }
        if let Some(v) = lookup("HINDSIGHT_DEBUG").and_then(|v| parse_bool(&v)) {
            self.debug = v;
        }
        if let Some(v) = lookup("HINDSIGHT_CORPUS_PATH") {
            self.corpus_path = PathBuf::from(v);
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_examples == 0 {
            return Err(ConfigError::Validation("max_examples must be at least 1".into()));
        }
        if !(1..=10).contains(&self.min_rating) {
            return Err(ConfigError::Validation(
                "min_rating must be between 1 and 10".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.relevance_floor) {
            return Err(ConfigError::Validation(
                "relevance_floor must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".hindsight")
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}
