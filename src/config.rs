use crate::defaults;
use crate::error::{CueError, Result};
use crate::language::validate_language;
use crate::segmentation::{LengthBudget, SegmenterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Transcript language code (`fr`, `pt-BR`).
    pub language: String,
    pub segmenter: SegmenterConfig,
    pub correction: CorrectionConfig,
    pub batch: BatchConfig,
}

/// Boundary correction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Run grammar-aware correction when a tagger can serve the language.
    pub enabled: bool,
}

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads for `run_batch`. 0 uses one per available CPU.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            segmenter: SegmenterConfig::default(),
            correction: CorrectionConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl BatchConfig {
    /// Worker count with 0 resolved against the machine.
    pub fn resolved_workers(&self) -> usize {
        match self.workers {
            0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
            n => n,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(CueError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config: file missing, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CUESPLIT_LANGUAGE → language
    /// - CUESPLIT_MAX_CUE_CHARS → segmenter.budget (character budget)
    /// - CUESPLIT_MAX_GAP_SECONDS → segmenter.max_gap_seconds
    ///
    /// Empty values are ignored. Values that do not parse are an error.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(language) = env_var("LANGUAGE") {
            self.language = language;
        }

        if let Some(chars) = env_var("MAX_CUE_CHARS") {
            let chars = parse_env("MAX_CUE_CHARS", &chars)?;
            self.segmenter.budget = LengthBudget::Chars(chars);
        }

        if let Some(gap) = env_var("MAX_GAP_SECONDS") {
            self.segmenter.max_gap_seconds = parse_env("MAX_GAP_SECONDS", &gap)?;
        }

        Ok(self)
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        let primary = self
            .language
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        validate_language(&primary)?;

        let segmenter = &self.segmenter;
        if !segmenter.max_gap_seconds.is_finite() || segmenter.max_gap_seconds < 0.0 {
            return Err(CueError::invalid_value(
                "segmenter.max_gap_seconds",
                format!("must be a non-negative number, got {}", segmenter.max_gap_seconds),
            ));
        }
        if segmenter.budget.limit() == 0 {
            return Err(CueError::invalid_value(
                "segmenter.budget",
                "must allow at least one character or token",
            ));
        }
        if let Some(duration) = segmenter.max_cue_duration
            && !(duration.is_finite() && duration > 0.0)
        {
            return Err(CueError::invalid_value(
                "segmenter.max_cue_duration",
                format!("must be a positive number of seconds, got {duration}"),
            ));
        }
        if segmenter.min_clause_tokens == 0 {
            return Err(CueError::invalid_value(
                "segmenter.min_clause_tokens",
                "must be at least 1",
            ));
        }
        if let Some(merge) = &segmenter.merge_fragments
            && merge.max_tokens < merge.fragment_tokens
        {
            return Err(CueError::invalid_value(
                "segmenter.merge_fragments.max_tokens",
                format!(
                    "{} is smaller than fragment_tokens ({})",
                    merge.max_tokens, merge.fragment_tokens
                ),
            ));
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/cuesplit/config.toml on Linux, `None` when the
    /// platform has no configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cuesplit").join("config.toml"))
    }
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{}_{}", defaults::ENV_PREFIX, suffix))
        .ok()
        .filter(|value| !value.is_empty())
}

fn parse_env<T>(suffix: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| CueError::ConfigParse {
        message: format!("{}_{}={:?}: {}", defaults::ENV_PREFIX, suffix, value, e),
    })
}
