//! Default configuration constants for cuesplit.
//!
//! Shared between `SegmenterConfig`, `Config` and the pipeline so every entry
//! point starts from the same thresholds.

/// Silence between two words, in seconds, that forces a cue boundary.
///
/// Half a second separates phrases in conversational speech without breaking
/// on ordinary breathing pauses.
pub const MAX_GAP_SECONDS: f64 = 0.5;

/// Maximum cue length in characters, including separating spaces.
///
/// 50 characters fits one subtitle line at common player font sizes.
pub const MAX_CUE_CHARS: usize = 50;

/// Maximum cue duration in seconds.
pub const MAX_CUE_DURATION: f64 = 8.0;

/// Minimum cue size, in tokens, before a clause mark (`, ; :`) forces a
/// boundary. 1 honors every clause mark.
pub const MIN_CLAUSE_TOKENS: usize = 1;

/// How far back from a length overflow the segmenter looks for a terminal
/// mark to break at instead of cutting mid-clause.
pub const TERMINAL_WINDOW: usize = 3;

/// Fragment merge: maximum silence between the two cues.
pub const MERGE_MAX_GAP_SECONDS: f64 = 0.15;

/// Fragment merge: a cue is a fragment when it holds fewer tokens than this.
pub const MERGE_FRAGMENT_TOKENS: usize = 3;

/// Fragment merge: maximum tokens in the merged cue.
pub const MERGE_MAX_TOKENS: usize = 10;

/// Default transcript language.
pub const DEFAULT_LANGUAGE: &str = "fr";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CUESPLIT";
