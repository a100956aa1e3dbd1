//! Per-language knowledge: recognizer language codes and segmentation rule
//! tables.

pub mod codes;
pub mod rules;

pub use codes::{is_valid_language, language_name, validate_language};
pub use rules::{LanguageRules, Spacing, Terminal};
