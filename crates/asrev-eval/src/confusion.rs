//! Word confusion tracking.
//!
//! Tallies which specific words were inserted, deleted, or substituted for
//! which, across all utterance pairs of a run.

use std::collections::BTreeMap;

use asrev_align::{AlignmentOp, OpKind};

/// Insertion, deletion, and substitution tallies for one run.
#[derive(Clone, Debug, Default)]
pub struct ConfusionTables {
    insertions: BTreeMap<String, u64>,
    deletions: BTreeMap<String, u64>,
    substitutions: BTreeMap<(String, String), u64>,
}

impl ConfusionTables {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one utterance pair's alignment into the tables.
    ///
    /// A substitution run is attributed as every reference word in the run
    /// crossed with every hypothesis word in the run, not a positional
    /// pairing. This mirrors the reference scoring tool.
    pub fn record<T: AsRef<str>>(
        &mut self,
        ops: &[AlignmentOp],
        reference: &[T],
        hypothesis: &[T],
    ) {
        for op in ops {
            match op.kind {
                OpKind::Equal => {}
                OpKind::Insert => {
                    for word in &hypothesis[op.hypothesis.start..op.hypothesis.end] {
                        *self.insertions.entry(word.as_ref().to_string()).or_default() += 1;
                    }
                }
                OpKind::Delete => {
                    for word in &reference[op.reference.start..op.reference.end] {
                        *self.deletions.entry(word.as_ref().to_string()).or_default() += 1;
                    }
                }
                OpKind::Substitute => {
                    for ref_word in &reference[op.reference.start..op.reference.end] {
                        for hyp_word in &hypothesis[op.hypothesis.start..op.hypothesis.end] {
                            let key =
                                (ref_word.as_ref().to_string(), hyp_word.as_ref().to_string());
                            *self.substitutions.entry(key).or_default() += 1;
                        }
                    }
                }
            }
        }
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.deletions.is_empty() && self.substitutions.is_empty()
    }

    /// Inserted words with count >= `min_count`, most frequent first,
    /// ties ordered by word.
    pub fn insertions(&self, min_count: u64) -> Vec<(&str, u64)> {
        sorted_words(&self.insertions, min_count)
    }

    /// Deleted words with count >= `min_count`, most frequent first,
    /// ties ordered by word.
    pub fn deletions(&self, min_count: u64) -> Vec<(&str, u64)> {
        sorted_words(&self.deletions, min_count)
    }

    /// Substituted (reference, hypothesis) pairs with count >= `min_count`,
    /// most frequent first, ties ordered by pair.
    pub fn substitutions(&self, min_count: u64) -> Vec<(&str, &str, u64)> {
        let mut rows: Vec<(&str, &str, u64)> = self
            .substitutions
            .iter()
            .filter(|(_, &count)| count >= min_count)
            .map(|((ref_word, hyp_word), &count)| {
                (ref_word.as_str(), hyp_word.as_str(), count)
            })
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2).then((a.0, a.1).cmp(&(b.0, b.1))));
        rows
    }
}

fn sorted_words(table: &BTreeMap<String, u64>, min_count: u64) -> Vec<(&str, u64)> {
    let mut rows: Vec<(&str, u64)> = table
        .iter()
        .filter(|(_, &count)| count >= min_count)
        .map(|(word, &count)| (word.as_str(), count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    rows
}
