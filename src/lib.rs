//! cuesplit - Subtitle cue segmentation for word-timestamped transcripts
//!
//! Turns a recognizer's timed words into display-ready cues whose boundaries
//! respect punctuation, silence and a length budget, and never strand an
//! article, preposition or elided clitic at a cue edge.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod segmentation;
pub mod tagging;
pub mod token;

// Data model
pub use token::{GrammaticalCategory, RecognizedWord, Token, TokenStream};

// Stages
pub use segmentation::{
    BoundaryCorrector, Cue, CueBuilder, CueSpan, LengthBudget, Segmenter, SegmenterConfig,
};
pub use tagging::{GrammarTagger, NoTagger, Tagging, UposTagger};
#[cfg(feature = "lexicon")]
pub use tagging::LexiconTagger;

// Pipeline
pub use pipeline::CuePipeline;

// Error handling
pub use error::{CueError, Result};

// Config
pub use config::Config;
pub use language::LanguageRules;
