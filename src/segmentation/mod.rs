//! Segmentation stages: provisional split, boundary correction, cue records.
//!
//! ```text
//! TokenStream ──► Segmenter ──► BoundaryCorrector ──► CueBuilder ──► Vec<Cue>
//!                 (timing,       (grammar, needs a
//!                  punctuation)   Tagging)
//! ```

pub mod builder;
pub mod corrector;
pub mod segmenter;
pub mod span;
pub mod text;

pub use builder::{Cue, CueBuilder};
pub use corrector::BoundaryCorrector;
pub use segmenter::{FragmentMerge, LengthBudget, Segmenter, SegmenterConfig};
pub use span::{CueSpan, validate_partition};
pub use text::{join_text, joined_char_count};
