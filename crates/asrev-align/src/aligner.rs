//! Minimum-edit-distance alignment of two token sequences.
//!
//! Classic Wagner-Fischer dynamic programming over the two sequences, with
//! a backtrace that prefers the diagonal so an equal-cost insert+delete
//! pair surfaces as a substitution, matching conventional ASR scoring
//! tools. The unit-step trace is collapsed into maximal contiguous runs of
//! the same kind before being returned.

use crate::ops::{AlignmentOp, OpKind, Span};

/// Compute a minimum-edit-distance alignment between `reference` and
/// `hypothesis`.
///
/// The returned operations are ordered, and their spans tile both input
/// sequences exactly. Output is deterministic for identical input. An empty
/// reference against a non-empty hypothesis yields a single `Insert` (and
/// symmetrically a single `Delete`); two empty sequences yield no
/// operations.
pub fn align<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> Vec<AlignmentOp> {
    let n = reference.len();
    let m = hypothesis.len();

    // dist[i][j]: minimum edits mapping the first i reference tokens onto
    // the first j hypothesis tokens.
    let mut dist = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dist.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dist[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let substitute =
                dist[i - 1][j - 1] + usize::from(reference[i - 1] != hypothesis[j - 1]);
            let delete = dist[i - 1][j] + 1;
            let insert = dist[i][j - 1] + 1;
            dist[i][j] = substitute.min(delete).min(insert);
        }
    }

    // Backtrace, diagonal first. Visited in reverse order.
    let mut steps = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let cost = usize::from(reference[i - 1] != hypothesis[j - 1]);
            if dist[i][j] == dist[i - 1][j - 1] + cost {
                steps.push(if cost == 0 {
                    OpKind::Equal
                } else {
                    OpKind::Substitute
                });
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && dist[i][j] == dist[i - 1][j] + 1 {
            steps.push(OpKind::Delete);
            i -= 1;
        } else {
            steps.push(OpKind::Insert);
            j -= 1;
        }
    }
    steps.reverse();

    // Collapse maximal runs of the same kind into ranged operations.
    let mut ops: Vec<AlignmentOp> = Vec::new();
    let (mut ref_pos, mut hyp_pos) = (0, 0);
    for kind in steps {
        let (ref_step, hyp_step) = match kind {
            OpKind::Equal | OpKind::Substitute => (1, 1),
            OpKind::Delete => (1, 0),
            OpKind::Insert => (0, 1),
        };
        match ops.last_mut() {
            Some(op) if op.kind == kind => {
                op.reference.end += ref_step;
                op.hypothesis.end += hyp_step;
            }
            _ => ops.push(AlignmentOp {
                kind,
                reference: Span::new(ref_pos, ref_pos + ref_step),
                hypothesis: Span::new(hyp_pos, hyp_pos + hyp_step),
            }),
        }
        ref_pos += ref_step;
        hyp_pos += hyp_step;
    }

    debug_assert!(
        tiles_both_sequences(&ops, n, m),
        "alignment spans must tile both sequences"
    );
    ops
}

/// Check that the spans are contiguous, non-overlapping, and cover both
/// sequences completely.
fn tiles_both_sequences(ops: &[AlignmentOp], ref_len: usize, hyp_len: usize) -> bool {
    let (mut ref_pos, mut hyp_pos) = (0, 0);
    for op in ops {
        if op.reference.start != ref_pos || op.hypothesis.start != hyp_pos {
            return false;
        }
        ref_pos = op.reference.end;
        hyp_pos = op.hypothesis.end;
    }
    ref_pos == ref_len && hyp_pos == hyp_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn toks(s: &str) -> Vec<String> {
        crate::tokenize(s, false)
    }

    fn total_errors(ops: &[AlignmentOp]) -> usize {
        ops.iter().map(AlignmentOp::error_len).sum()
    }

    /// Plain Levenshtein distance, no backtrace. Used as an independent
    /// check of the aligner's cost.
    fn levenshtein(a: &[String], b: &[String]) -> usize {
        let mut prev: Vec<usize> = (0..=b.len()).collect();
        for (i, x) in a.iter().enumerate() {
            let mut row = vec![i + 1; b.len() + 1];
            for (j, y) in b.iter().enumerate() {
                row[j + 1] = (prev[j] + usize::from(x != y))
                    .min(prev[j + 1] + 1)
                    .min(row[j] + 1);
            }
            prev = row;
        }
        prev[b.len()]
    }

    #[test]
    fn identical_sequences_single_equal_op() {
        let seq = toks("the cat sat");
        let ops = align(&seq, &seq);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OpKind::Equal);
        assert_eq!(ops[0].reference, Span::new(0, 3));
        assert_eq!(ops[0].hypothesis, Span::new(0, 3));
        assert_eq!(total_errors(&ops), 0);
    }

    #[test]
    fn both_empty_no_ops() {
        let ops = align::<String>(&[], &[]);
        assert!(ops.is_empty());
    }

    #[test]
    fn empty_reference_single_insert() {
        let hyp = toks("a b");
        let ops = align(&[], &hyp);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OpKind::Insert);
        assert!(ops[0].reference.is_empty());
        assert_eq!(ops[0].hypothesis, Span::new(0, 2));
        assert_eq!(total_errors(&ops), 2);
    }

    #[test]
    fn empty_hypothesis_single_delete() {
        let reference = toks("a b c");
        let ops = align(&reference, &[]);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OpKind::Delete);
        assert_eq!(ops[0].reference, Span::new(0, 3));
        assert!(ops[0].hypothesis.is_empty());
        assert_eq!(total_errors(&ops), 3);
    }

    #[test]
    fn substitution_preferred_over_insert_plus_delete() {
        let ops = align(&toks("a x b"), &toks("a y b"));
        assert_eq!(
            ops.iter().map(|op| op.kind).collect::<Vec<_>>(),
            vec![OpKind::Equal, OpKind::Substitute, OpKind::Equal]
        );
        assert_eq!(total_errors(&ops), 1);
    }

    #[test]
    fn consecutive_substitutions_collapse_into_one_run() {
        let ops = align(&toks("the cat sat down"), &toks("the rat hat down"));
        assert_eq!(
            ops.iter().map(|op| op.kind).collect::<Vec<_>>(),
            vec![OpKind::Equal, OpKind::Substitute, OpKind::Equal]
        );
        assert_eq!(ops[1].reference, Span::new(1, 3));
        assert_eq!(ops[1].hypothesis, Span::new(1, 3));
        assert_eq!(total_errors(&ops), 2);
    }

    #[test]
    fn mid_sequence_deletion() {
        let ops = align(&toks("a dog ran"), &toks("a dog"));
        assert_eq!(
            ops.iter().map(|op| op.kind).collect::<Vec<_>>(),
            vec![OpKind::Equal, OpKind::Delete]
        );
        assert_eq!(total_errors(&ops), 1);
    }

    #[test]
    fn deterministic_for_identical_input() {
        let reference = toks("a b c d");
        let hyp = toks("b c e");
        assert_eq!(align(&reference, &hyp), align(&reference, &hyp));
    }

    fn token_seq() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0..12)
            .prop_map(|v| v.into_iter().map(String::from).collect())
    }

    proptest! {
        #[test]
        fn spans_tile_both_sequences(reference in token_seq(), hyp in token_seq()) {
            let ops = align(&reference, &hyp);
            prop_assert!(tiles_both_sequences(&ops, reference.len(), hyp.len()));
        }

        #[test]
        fn error_count_is_levenshtein_distance(reference in token_seq(), hyp in token_seq()) {
            let ops = align(&reference, &hyp);
            prop_assert_eq!(total_errors(&ops), levenshtein(&reference, &hyp));
        }

        #[test]
        fn equal_spans_have_identical_tokens(reference in token_seq(), hyp in token_seq()) {
            for op in align(&reference, &hyp) {
                if op.kind == OpKind::Equal {
                    prop_assert_eq!(op.reference.len(), op.hypothesis.len());
                    prop_assert_eq!(
                        &reference[op.reference.start..op.reference.end],
                        &hyp[op.hypothesis.start..op.hypothesis.end]
                    );
                }
            }
        }

        #[test]
        fn every_token_consumed_exactly_once(reference in token_seq(), hyp in token_seq()) {
            let ops = align(&reference, &hyp);
            let ref_consumed: usize = ops.iter().map(|op| op.reference.len()).sum();
            let hyp_consumed: usize = ops.iter().map(|op| op.hypothesis.len()).sum();
            prop_assert_eq!(ref_consumed, reference.len());
            prop_assert_eq!(hyp_consumed, hyp.len());
        }
    }
}
