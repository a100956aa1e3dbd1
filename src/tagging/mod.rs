//! Grammatical tagging of token streams.

#[cfg(feature = "lexicon")]
pub mod lexicon;
pub mod tagger;

#[cfg(feature = "lexicon")]
pub use lexicon::LexiconTagger;
pub use tagger::{GrammarTagger, NoTagger, Tagging, UposTagger};
