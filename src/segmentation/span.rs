//! Cue spans: index views over one shared token sequence.

use crate::error::{CueError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Inclusive token index range `[first, last]` owned by one cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CueSpan {
    pub first: usize,
    pub last: usize,
}

impl CueSpan {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Span holding a single token.
    pub fn single(index: usize) -> Self {
        Self::new(index, index)
    }

    /// Number of tokens, 0 for an inverted span.
    pub fn len(&self) -> usize {
        (self.last + 1).saturating_sub(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Check that `spans` cover `0..len` exactly once, in order.
///
/// An empty token sequence requires an empty partition.
pub fn validate_partition(spans: &[CueSpan], len: usize) -> Result<()> {
    if len == 0 {
        return match spans.is_empty() {
            true => Ok(()),
            false => Err(CueError::invalid_partition(0, "spans over an empty stream")),
        };
    }

    let mut expected_first = 0;
    for (cue_index, span) in spans.iter().enumerate() {
        if span.is_empty() {
            return Err(CueError::invalid_partition(
                cue_index,
                format!("empty span {}..={}", span.first, span.last),
            ));
        }
        if span.first != expected_first {
            let reason = if span.first > expected_first {
                format!("gap before token {}", span.first)
            } else {
                format!("overlap at token {}", span.first)
            };
            return Err(CueError::invalid_partition(cue_index, reason));
        }
        if span.last >= len {
            return Err(CueError::invalid_partition(
                cue_index,
                format!("token {} out of range ({} tokens)", span.last, len),
            ));
        }
        expected_first = span.last + 1;
    }

    if expected_first != len {
        return Err(CueError::invalid_partition(
            spans.len().saturating_sub(1),
            format!("tokens {}..{} not covered", expected_first, len),
        ));
    }
    Ok(())
}

/// Boundary positions of a partition: cut `c` separates token `c - 1` from
/// token `c`.
///
/// Relocating a token across a boundary shifts one cut by one position. Two
/// cuts meeting means the cue between them emptied, and one is dropped.
pub(crate) fn cuts_from_spans(spans: &[CueSpan]) -> BTreeSet<usize> {
    spans.iter().skip(1).map(|span| span.first).collect()
}

/// Rebuild spans over `len` tokens from boundary positions.
pub(crate) fn spans_from_cuts(cuts: &BTreeSet<usize>, len: usize) -> Vec<CueSpan> {
    if len == 0 {
        return Vec::new();
    }
    let mut spans = Vec::with_capacity(cuts.len() + 1);
    let mut first = 0;
    for &cut in cuts.iter().filter(|&&c| c > 0 && c < len) {
        spans.push(CueSpan::new(first, cut - 1));
        first = cut;
    }
    spans.push(CueSpan::new(first, len - 1));
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len_and_contains() {
        let span = CueSpan::new(2, 4);
        assert_eq!(span.len(), 3);
        assert!(span.contains(3));
        assert!(!span.contains(5));
        assert_eq!(CueSpan::single(7).len(), 1);
        assert!(CueSpan::new(5, 4).is_empty());
    }

    #[test]
    fn cuts_round_trip_through_spans() {
        let spans = vec![CueSpan::new(0, 2), CueSpan::new(3, 3), CueSpan::new(4, 8)];
        let cuts = cuts_from_spans(&spans);
        assert_eq!(cuts.iter().copied().collect::<Vec<_>>(), [3, 4]);
        assert_eq!(spans_from_cuts(&cuts, 9), spans);
    }

    #[test]
    fn valid_partition_passes() {
        let spans = [CueSpan::new(0, 1), CueSpan::new(2, 2), CueSpan::new(3, 5)];
        assert!(validate_partition(&spans, 6).is_ok());
        assert!(validate_partition(&[], 0).is_ok());
    }

    #[test]
    fn partition_errors_name_the_cue() {
        let gap = [CueSpan::new(0, 1), CueSpan::new(3, 5)];
        let err = validate_partition(&gap, 6).unwrap_err();
        assert!(matches!(err, CueError::InvalidPartition { cue_index: 1, .. }));
        assert!(err.to_string().contains("gap before token 3"));

        let overlap = [CueSpan::new(0, 2), CueSpan::new(2, 5)];
        let err = validate_partition(&overlap, 6).unwrap_err();
        assert!(err.to_string().contains("overlap at token 2"));

        let short = [CueSpan::new(0, 2)];
        let err = validate_partition(&short, 6).unwrap_err();
        assert!(err.to_string().contains("tokens 3..6 not covered"));

        let past_end = [CueSpan::new(0, 6)];
        assert!(validate_partition(&past_end, 6).is_err());

        let inverted = [CueSpan::new(0, 2), CueSpan::new(3, 2)];
        assert!(validate_partition(&inverted, 6).is_err());
    }

    #[test]
    fn empty_stream_rejects_spans() {
        assert!(validate_partition(&[CueSpan::single(0)], 0).is_err());
        assert!(validate_partition(&[], 3).is_err());
    }

    #[test]
    fn no_cuts_is_one_span() {
        assert_eq!(
            spans_from_cuts(&BTreeSet::new(), 4),
            vec![CueSpan::new(0, 3)]
        );
        assert!(spans_from_cuts(&BTreeSet::new(), 0).is_empty());
    }
}
