//! Provisional cue segmentation from timing and orthography.
//!
//! Scans tokens left to right and closes the current cue after a token when:
//! 1. the token ends in terminal punctuation,
//! 2. the silence before the next token exceeds `max_gap_seconds`,
//! 3. adding the next token would exceed the length budget or the duration
//!    cap. If the cue holds a clause mark that did not force a break within
//!    `terminal_window` tokens of the overflow, the cue closes at that mark
//!    (nearest mark wins); otherwise it closes right before the overflow.
//!
//! No grammatical knowledge is used here.

use crate::defaults;
use crate::language::{LanguageRules, Terminal};
use crate::segmentation::span::CueSpan;
use crate::segmentation::text::joined_char_count;
use crate::token::{Token, TokenStream};
use serde::{Deserialize, Serialize};

/// Maximum size of one cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBudget {
    /// Characters of the joined cue text, separating spaces included.
    Chars(usize),
    Tokens(usize),
}

impl LengthBudget {
    pub fn limit(&self) -> usize {
        match self {
            Self::Chars(n) | Self::Tokens(n) => *n,
        }
    }

    /// Size of `tokens` measured in this budget's unit.
    pub fn measure(&self, tokens: &[Token], rules: &LanguageRules) -> usize {
        match self {
            Self::Chars(_) => joined_char_count(tokens, rules),
            Self::Tokens(_) => tokens.len(),
        }
    }

    pub fn fits(&self, tokens: &[Token], rules: &LanguageRules) -> bool {
        self.measure(tokens, rules) <= self.limit()
    }
}

impl Default for LengthBudget {
    fn default() -> Self {
        Self::Chars(defaults::MAX_CUE_CHARS)
    }
}

/// Merge pass folding short fragments into the following cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentMerge {
    /// Maximum silence between the fragment and the next cue.
    pub max_gap_seconds: f64,
    /// A cue with fewer tokens than this is a fragment.
    pub fragment_tokens: usize,
    /// Upper bound on tokens in the merged cue.
    pub max_tokens: usize,
}

impl Default for FragmentMerge {
    fn default() -> Self {
        Self {
            max_gap_seconds: defaults::MERGE_MAX_GAP_SECONDS,
            fragment_tokens: defaults::MERGE_FRAGMENT_TOKENS,
            max_tokens: defaults::MERGE_MAX_TOKENS,
        }
    }
}

/// Configuration for the segmenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Silence (seconds) after which a boundary is forced.
    pub max_gap_seconds: f64,
    pub budget: LengthBudget,
    /// Longest cue, first token start to last token end, in seconds.
    /// Written as `0` in a config file when there is no cap.
    #[serde(with = "duration_cap")]
    pub max_cue_duration: Option<f64>,
    /// Tokens a cue must hold before a clause mark closes it.
    pub min_clause_tokens: usize,
    /// Tokens back from a length overflow searched for a clause mark.
    pub terminal_window: usize,
    /// Disabled unless set.
    pub merge_fragments: Option<FragmentMerge>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_gap_seconds: defaults::MAX_GAP_SECONDS,
            budget: LengthBudget::default(),
            max_cue_duration: Some(defaults::MAX_CUE_DURATION),
            min_clause_tokens: defaults::MIN_CLAUSE_TOKENS,
            terminal_window: defaults::TERMINAL_WINDOW,
            merge_fragments: None,
        }
    }
}

/// TOML has no null, so an absent cap is stored as `0`.
mod duration_cap {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cap: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(cap.unwrap_or(0.0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        Ok((seconds != 0.0).then_some(seconds))
    }
}

/// Why a provisional cue was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakReason {
    Punctuation,
    Gap,
    Length,
    ClauseInWindow,
    EndOfStream,
}

/// Splits a token stream into provisional cue spans.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::with_config(SegmenterConfig::default())
    }

    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Partition `stream` into ordered, exhaustive, non-overlapping spans.
    ///
    /// An empty stream yields an empty partition.
    pub fn segment(&self, stream: &TokenStream) -> Vec<CueSpan> {
        let tokens = stream.tokens();
        let rules = stream.rules();
        let mut spans = Vec::new();
        let Some(last_index) = tokens.len().checked_sub(1) else {
            return spans;
        };

        let mut start = 0;
        let mut i = 0;
        while i <= last_index {
            if i == last_index {
                close(&mut spans, start, i, BreakReason::EndOfStream);
                break;
            }

            if let Some(reason) = self.forced_break(tokens, start, i) {
                close(&mut spans, start, i, reason);
                start = i + 1;
                i += 1;
                continue;
            }

            if self.overflows(&tokens[start..=i + 1], rules) {
                let (end, reason) = match self.clause_in_window(tokens, start, i) {
                    Some(k) => (k, BreakReason::ClauseInWindow),
                    None => (i, BreakReason::Length),
                };
                close(&mut spans, start, end, reason);
                start = end + 1;
                // A break inside the window leaves token i in the new cue,
                // which must be re-checked against the next token.
                if end == i {
                    i += 1;
                }
                continue;
            }

            i += 1;
        }

        if let Some(merge) = &self.config.merge_fragments {
            spans = self.merge_fragments(spans, tokens, rules, merge);
        }

        tracing::debug!(
            language = stream.language(),
            tokens = tokens.len(),
            cues = spans.len(),
            "segmenter: provisional partition"
        );
        spans
    }

    fn forced_break(&self, tokens: &[Token], start: usize, i: usize) -> Option<BreakReason> {
        match tokens[i].terminal() {
            Some(Terminal::Sentence) => return Some(BreakReason::Punctuation),
            Some(Terminal::Clause) if i + 1 - start >= self.config.min_clause_tokens => {
                return Some(BreakReason::Punctuation);
            }
            _ => {}
        }
        let gap = tokens[i + 1].start - tokens[i].end;
        (gap > self.config.max_gap_seconds).then_some(BreakReason::Gap)
    }

    fn overflows(&self, cue: &[Token], rules: &LanguageRules) -> bool {
        if !self.config.budget.fits(cue, rules) {
            return true;
        }
        match (self.config.max_cue_duration, cue.first(), cue.last()) {
            (Some(max), Some(first), Some(last)) => last.end - first.start > max,
            _ => false,
        }
    }

    /// Nearest clause mark at or before `i`, no further back than the window.
    ///
    /// Only marks that did not force a break can sit inside a cue, so any
    /// terminal token found here is a clause mark held back by
    /// `min_clause_tokens`.
    fn clause_in_window(&self, tokens: &[Token], start: usize, i: usize) -> Option<usize> {
        let window = self.config.terminal_window;
        if window == 0 {
            return None;
        }
        let lowest = (i + 1).saturating_sub(window).max(start);
        (lowest..=i)
            .rev()
            .find(|&k| tokens[k].is_punctuation_terminal())
    }

    fn merge_fragments(
        &self,
        spans: Vec<CueSpan>,
        tokens: &[Token],
        rules: &LanguageRules,
        merge: &FragmentMerge,
    ) -> Vec<CueSpan> {
        let mut merged: Vec<CueSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            if let Some(prev) = merged.last_mut() {
                let gap = tokens[span.first].start - tokens[prev.last].end;
                let combined = CueSpan::new(prev.first, span.last);
                if prev.len() < merge.fragment_tokens
                    && gap < merge.max_gap_seconds
                    && combined.len() <= merge.max_tokens
                    && !self.overflows(&tokens[combined.range()], rules)
                {
                    tracing::trace!(
                        first = combined.first,
                        last = combined.last,
                        "segmenter: merged fragment"
                    );
                    *prev = combined;
                    continue;
                }
            }
            merged.push(span);
        }
        merged
    }
}

fn close(spans: &mut Vec<CueSpan>, first: usize, last: usize, reason: BreakReason) {
    tracing::trace!(first, last, ?reason, "segmenter: closed cue");
    spans.push(CueSpan::new(first, last));
}
