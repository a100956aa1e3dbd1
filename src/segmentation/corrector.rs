//! Grammar-aware boundary correction.
//!
//! Works on cut positions rather than cue vectors: cut `c` sits between
//! token `c - 1` and token `c`. Moving a token across a boundary shifts one
//! cut by one position, and a cut meeting its neighbor means a cue emptied
//! and is merged away. Dirty cuts are kept on a worklist so only boundaries
//! touched by a move are revisited.
//!
//! Rules at a cut, first match wins:
//!
//! 1. The left cue ends with a clitic (`qu'`, `l'`): the clitic moves
//!    forward to its host, even if that empties the left cue.
//! 2. The left cue ends with a danglable function word that is not
//!    punctuation-terminal and is not the cue's only token: it moves
//!    forward.
//! 3. The right cue starts with an enclitic (`-tu`, `'s`): it moves back
//!    to its host, merging the right cue away if it empties. A sentence end
//!    before the cut blocks this.
//!
//! Rules 1 and 2 only move cuts left and rule 3 only moves them right. A
//! token that moved forward is never an enclitic and an enclitic never
//! triggers rules 1 or 2, so no token crosses a boundary twice.

use crate::error::{CueError, Result};
use crate::language::{LanguageRules, Terminal};
use crate::segmentation::span::{CueSpan, cuts_from_spans, spans_from_cuts, validate_partition};
use crate::tagging::Tagging;
use crate::token::{GrammaticalCategory, TokenStream};
use std::collections::BTreeSet;

/// How a token behaves at a cue edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Elided form that must precede its host in the same cue.
    Clitic,
    /// Function word that should not close a cue.
    Dangling,
    /// Suffix form that must follow its host in the same cue.
    Enclitic,
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Forward,
    Backward,
}

/// Read-only view shared by every step of one correction run.
struct Context<'a> {
    stream: &'a TokenStream,
    tagging: &'a Tagging,
    rules: &'static LanguageRules,
}

impl Context<'_> {
    fn binding(&self, index: usize) -> Binding {
        let Some(token) = self.stream.get(index) else {
            return Binding::Free;
        };
        if self.rules.is_enclitic(&token.text) {
            return Binding::Enclitic;
        }
        let category = self.tagging.get(index);
        if category == Some(GrammaticalCategory::CliticParticle)
            || self.rules.is_clitic(&token.text)
        {
            return Binding::Clitic;
        }
        if token.is_punctuation_terminal() {
            return Binding::Free;
        }
        match category {
            Some(category) if self.rules.is_danglable(category) => Binding::Dangling,
            _ => Binding::Free,
        }
    }

    fn ends_sentence(&self, index: usize) -> bool {
        self.stream
            .get(index)
            .is_some_and(|token| token.terminal() == Some(Terminal::Sentence))
    }
}

/// Relocates tokens across adjacent cue boundaries.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryCorrector {
    rules: Option<&'static LanguageRules>,
}

impl BoundaryCorrector {
    /// Corrector for a language code. Unregistered languages pass through.
    pub fn for_language(code: &str) -> Self {
        Self::with_rules(LanguageRules::lookup(code))
    }

    pub fn with_rules(rules: Option<&'static LanguageRules>) -> Self {
        Self { rules }
    }

    /// Whether this corrector can move anything at all.
    pub fn is_active(&self) -> bool {
        self.rules.is_some()
    }

    /// Correct a provisional partition of `stream`.
    ///
    /// Without rules or without a tagging the spans are returned unchanged.
    /// The result is a fixed point: correcting it again changes nothing.
    pub fn correct(
        &self,
        stream: &TokenStream,
        spans: Vec<CueSpan>,
        tagging: Option<&Tagging>,
    ) -> Result<Vec<CueSpan>> {
        validate_partition(&spans, stream.len())?;

        let (Some(rules), Some(tagging)) = (self.rules, tagging) else {
            tracing::debug!(
                language = stream.language(),
                cues = spans.len(),
                "corrector: pass-through"
            );
            return Ok(spans);
        };
        if tagging.len() != stream.len() {
            return Err(CueError::TaggerOutput {
                tagger: "tagging".to_string(),
                expected: stream.len(),
                actual: tagging.len(),
            });
        }
        if spans.len() < 2 {
            return Ok(spans);
        }

        let context = Context {
            stream,
            tagging,
            rules,
        };
        let len = stream.len();
        let provisional = spans.len();
        let max_passes = provisional.max(2);

        let outcome = converge(&context, cuts_from_spans(&spans), len, max_passes)?;
        let corrected = spans_from_cuts(&outcome.cuts, len);
        tracing::debug!(
            language = stream.language(),
            provisional,
            corrected = corrected.len(),
            moves = outcome.moves,
            passes = outcome.passes,
            "corrector: done"
        );
        Ok(corrected)
    }
}

#[derive(Debug)]
struct Outcome {
    cuts: BTreeSet<usize>,
    passes: usize,
    moves: usize,
}

/// Settle dirty cuts until none is left, failing after `max_passes` passes.
fn converge(
    context: &Context<'_>,
    mut cuts: BTreeSet<usize>,
    len: usize,
    max_passes: usize,
) -> Result<Outcome> {
    let mut dirty = cuts.clone();
    let mut passes = 0;
    let mut moves = 0;

    while let Some(&first_dirty) = dirty.first() {
        if passes == max_passes {
            return Err(CueError::CorrectionDidNotConverge {
                cue_index: cuts.range(..first_dirty).count(),
                passes,
            });
        }
        passes += 1;

        for cut in std::mem::take(&mut dirty) {
            if !cuts.contains(&cut) {
                continue;
            }
            let touched = settle(context, &mut cuts, cut, len, &mut moves);
            dirty.extend(touched);
        }
    }

    Ok(Outcome {
        cuts,
        passes,
        moves,
    })
}

/// Apply rules at one cut until none fires. Returns the cuts to revisit.
fn settle(
    context: &Context<'_>,
    cuts: &mut BTreeSet<usize>,
    mut cut: usize,
    len: usize,
    moves: &mut usize,
) -> Vec<usize> {
    let mut touched = Vec::new();

    loop {
        let prev = cuts.range(..cut).next_back().copied().unwrap_or(0);
        let next = cuts.range(cut + 1..).next().copied().unwrap_or(len);
        let last = cut - 1;

        let shift = match context.binding(last) {
            Binding::Clitic => Some(Shift::Forward),
            Binding::Dangling if last > prev => Some(Shift::Forward),
            _ if context.binding(cut) == Binding::Enclitic && !context.ends_sentence(last) => {
                Some(Shift::Backward)
            }
            _ => None,
        };
        let Some(shift) = shift else {
            break;
        };

        let moved = match shift {
            Shift::Forward => last,
            Shift::Backward => cut,
        };
        let target = match shift {
            Shift::Forward => cut - 1,
            Shift::Backward => cut + 1,
        };
        *moves += 1;
        cuts.remove(&cut);
        touched.extend([prev, next].into_iter().filter(|&c| c > 0 && c < len));

        let merged = target == prev || target == next;
        tracing::debug!(
            token = moved,
            text = context.stream.get(moved).map_or("", |t| t.text.as_str()),
            ?shift,
            merged,
            "corrector: moved token across boundary"
        );
        if merged {
            break;
        }
        cuts.insert(target);
        cut = target;
        touched.push(cut);
    }

    touched
}
