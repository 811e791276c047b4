//! Alignment operation types.
//!
//! An alignment is an ordered sequence of [`AlignmentOp`]s whose spans,
//! concatenated, exactly tile the reference and hypothesis sequences with
//! no gaps or overlaps.

use serde::{Deserialize, Serialize};

/// A half-open range of token positions within one side of an alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First token position covered by the span.
    pub start: usize,
    /// One past the last token position covered by the span.
    pub end: usize,
}

impl Span {
    /// Create a span covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Create an empty span anchored at `at`.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Number of tokens covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no tokens.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The kind of an alignment operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    /// Tokens identical on both sides.
    Equal,
    /// Tokens present in the reference, absent from the hypothesis.
    Delete,
    /// Tokens present in the hypothesis, absent from the reference.
    Insert,
    /// Unequal tokens on both sides.
    Substitute,
}

/// One aligned region between a reference and a hypothesis sequence.
///
/// Both spans are always present; the missing side of a Delete or Insert is
/// an empty span anchored at the current position in that sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentOp {
    /// What this region represents.
    pub kind: OpKind,
    /// The covered range of the reference sequence.
    pub reference: Span,
    /// The covered range of the hypothesis sequence.
    pub hypothesis: Span,
}

impl AlignmentOp {
    /// Returns `true` for any operation other than `Equal`.
    pub fn is_error(&self) -> bool {
        self.kind != OpKind::Equal
    }

    /// Number of errors this operation contributes: the longer of the two
    /// span lengths for non-equal operations, zero for equal ones.
    pub fn error_len(&self) -> usize {
        if self.is_error() {
            self.reference.len().max(self.hypothesis.len())
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len() {
        assert_eq!(Span::new(2, 5).len(), 3);
        assert!(Span::empty(4).is_empty());
        assert_eq!(Span::empty(4).len(), 0);
    }

    #[test]
    fn equal_op_contributes_no_errors() {
        let op = AlignmentOp {
            kind: OpKind::Equal,
            reference: Span::new(0, 3),
            hypothesis: Span::new(0, 3),
        };
        assert!(!op.is_error());
        assert_eq!(op.error_len(), 0);
    }

    #[test]
    fn error_len_is_longer_side() {
        let op = AlignmentOp {
            kind: OpKind::Substitute,
            reference: Span::new(0, 3),
            hypothesis: Span::new(0, 1),
        };
        assert!(op.is_error());
        assert_eq!(op.error_len(), 3);

        let op = AlignmentOp {
            kind: OpKind::Insert,
            reference: Span::empty(2),
            hypothesis: Span::new(2, 4),
        };
        assert_eq!(op.error_len(), 2);
    }
}
