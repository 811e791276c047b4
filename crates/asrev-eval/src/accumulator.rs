//! Corpus-level metric accumulation.
//!
//! All counters are zero-initialized at run start, accumulated
//! monotonically as utterance pairs are scored, and read once at run end.

use std::collections::BTreeMap;

use asrev_align::AlignmentOp;
use serde::Serialize;

/// Scores for a single reference/hypothesis utterance pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct UtteranceStats {
    /// Error count: sum over non-equal operations of the longer span length.
    pub errors: usize,
    /// Matched token count: sum over equal operations of the span length.
    pub matches: usize,
    /// Reference length in tokens.
    pub ref_len: usize,
    /// Hypothesis length in tokens.
    pub hyp_len: usize,
}

impl UtteranceStats {
    /// Derive the scores from one utterance pair's alignment operations.
    ///
    /// Panics if the two independently computed match counts (reference
    /// side vs hypothesis side of the equal spans) disagree; that would
    /// mean the alignment itself is defective.
    pub fn from_ops(ops: &[AlignmentOp]) -> Self {
        let errors = ops.iter().map(AlignmentOp::error_len).sum();
        let matches: usize = ops
            .iter()
            .filter(|op| !op.is_error())
            .map(|op| op.reference.len())
            .sum();
        let hyp_matches: usize = ops
            .iter()
            .filter(|op| !op.is_error())
            .map(|op| op.hypothesis.len())
            .sum();
        assert_eq!(
            matches, hyp_matches,
            "match counts diverged between reference and hypothesis spans"
        );

        let ref_len = ops.iter().map(|op| op.reference.len()).sum();
        let hyp_len = ops.iter().map(|op| op.hypothesis.len()).sum();
        Self {
            errors,
            matches,
            ref_len,
            hyp_len,
        }
    }

    /// Errors per reference token, `None` when the reference is empty.
    pub fn error_rate(&self) -> Option<f64> {
        (self.ref_len > 0).then(|| self.errors as f64 / self.ref_len as f64)
    }

    /// Matches per reference token, `None` when the reference is empty.
    pub fn match_rate(&self) -> Option<f64> {
        (self.ref_len > 0).then(|| self.matches as f64 / self.ref_len as f64)
    }

    /// A sentence is in error iff it has at least one error.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Running corpus-level counters for one evaluation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CorpusTally {
    /// Total reference tokens seen.
    pub ref_tokens: usize,
    /// Total errors seen.
    pub errors: usize,
    /// Total matched tokens seen.
    pub matches: usize,
    /// Total utterance pairs scored.
    pub sentences: usize,
    /// Utterance pairs with at least one error.
    pub sentences_with_errors: usize,
}

impl CorpusTally {
    /// Create a zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one utterance's scores into the tally.
    pub fn record(&mut self, stats: &UtteranceStats) {
        self.ref_tokens += stats.ref_len;
        self.errors += stats.errors;
        self.matches += stats.matches;
        self.sentences += 1;
        if stats.has_errors() {
            self.sentences_with_errors += 1;
        }
    }

    /// Word error rate: errors over reference tokens.
    pub fn wer(&self) -> f64 {
        ratio(self.errors, self.ref_tokens)
    }

    /// Word recognition rate: matches over reference tokens.
    pub fn wrr(&self) -> f64 {
        ratio(self.matches, self.ref_tokens)
    }

    /// Sentence error rate: sentences with errors over total sentences.
    pub fn ser(&self) -> f64 {
        ratio(self.sentences_with_errors, self.sentences)
    }

    /// Freeze the tally into a reportable summary.
    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary {
            sentences: self.sentences,
            sentences_with_errors: self.sentences_with_errors,
            ref_tokens: self.ref_tokens,
            errors: self.errors,
            matches: self.matches,
            wer: self.wer(),
            wrr: self.wrr(),
            ser: self.ser(),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// End-of-run corpus statistics, with the raw numerators and denominators
/// alongside each derived rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CorpusSummary {
    pub sentences: usize,
    pub sentences_with_errors: usize,
    pub ref_tokens: usize,
    pub errors: usize,
    pub matches: usize,
    pub wer: f64,
    pub wrr: f64,
    pub ser: f64,
}

/// Per-utterance error rates grouped by reference sentence length.
#[derive(Clone, Debug, Default)]
pub struct LengthBins {
    bins: BTreeMap<usize, Vec<f64>>,
}

/// Average error rate for one reference length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LengthAverage {
    /// Reference sentence length in tokens.
    pub length: usize,
    /// Mean per-utterance error rate at this length.
    pub avg_error_rate: f64,
    /// Number of utterances at this length.
    pub count: usize,
}

impl LengthBins {
    /// Create an empty set of bins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one utterance's error rate under its reference length.
    pub fn record(&mut self, ref_len: usize, error_rate: f64) {
        self.bins.entry(ref_len).or_default().push(error_rate);
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Average error rate per distinct reference length, sorted ascending
    /// by (average rate, length).
    pub fn averages(&self) -> Vec<LengthAverage> {
        let mut rows: Vec<LengthAverage> = self
            .bins
            .iter()
            .map(|(&length, rates)| LengthAverage {
                length,
                avg_error_rate: rates.iter().sum::<f64>() / rates.len() as f64,
                count: rates.len(),
            })
            .collect();
        rows.sort_by(|a, b| {
            a.avg_error_rate
                .total_cmp(&b.avg_error_rate)
                .then(a.length.cmp(&b.length))
        });
        rows
    }
}
