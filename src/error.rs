//! Error types for cuesplit.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueError {
    // Input contract errors
    #[error("Malformed token stream at token {index}: {reason}")]
    MalformedTokenStream { index: usize, reason: String },

    // Segmentation invariant errors
    #[error("Boundary correction did not converge after {passes} passes (last change at cue {cue_index})")]
    CorrectionDidNotConverge { cue_index: usize, passes: usize },

    #[error("Invalid partition at cue {cue_index}: {reason}")]
    InvalidPartition { cue_index: usize, reason: String },

    // Tagger errors (absorbed by the pipeline, never surfaced from a run)
    #[error("Language not supported by tagger {tagger}: {language}")]
    UnsupportedLanguage { tagger: String, language: String },

    #[error("Tagger {tagger} unavailable: {message}")]
    TaggerUnavailable { tagger: String, message: String },

    #[error("Tagger {tagger} returned {actual} categories for {expected} tokens")]
    TaggerOutput {
        tagger: String,
        expected: usize,
        actual: usize,
    },

    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Recognition payload errors
    #[error("Failed to decode recognition output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl CueError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTokenStream {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_partition(cue_index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPartition {
            cue_index,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_value(key: &str, message: impl Into<String>) -> Self {
        Self::ConfigInvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// True for errors a tagger raises when it cannot serve a stream.
    ///
    /// These downgrade a run to timing/punctuation-only segmentation.
    pub fn is_tagging_degradation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedLanguage { .. }
                | Self::TaggerUnavailable { .. }
                | Self::TaggerOutput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CueError>;
