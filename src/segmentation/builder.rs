//! Final cue records.

use crate::error::Result;
use crate::segmentation::span::{CueSpan, validate_partition};
use crate::segmentation::text::join_text;
use crate::token::TokenStream;
use serde::{Deserialize, Serialize};

/// One display-ready subtitle cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Position in the cue sequence, starting at 1.
    pub id: usize,
    /// Start of the first token, in seconds.
    pub start: f64,
    /// End of the last token, in seconds.
    pub end: f64,
    pub text: String,
    pub token_span: CueSpan,
}

impl Cue {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn token_count(&self) -> usize {
        self.token_span.len()
    }
}

/// Turns a corrected partition into cue records.
#[derive(Debug, Clone, Copy, Default)]
pub struct CueBuilder;

impl CueBuilder {
    /// Build one cue per span.
    ///
    /// Fails with `InvalidPartition` unless `spans` cover every token of
    /// `stream` exactly once, in order.
    pub fn build(stream: &TokenStream, spans: &[CueSpan]) -> Result<Vec<Cue>> {
        validate_partition(spans, stream.len())?;

        let tokens = stream.tokens();
        let rules = stream.rules();
        let cues: Vec<Cue> = spans
            .iter()
            .enumerate()
            .map(|(index, span)| {
                let slice = &tokens[span.range()];
                Cue {
                    id: index + 1,
                    start: slice[0].start,
                    end: slice[slice.len() - 1].end,
                    text: join_text(slice, rules),
                    token_span: *span,
                }
            })
            .collect();

        tracing::debug!(
            language = stream.language(),
            cues = cues.len(),
            "builder: cues built"
        );
        Ok(cues)
    }
}
