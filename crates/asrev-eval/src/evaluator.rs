//! One-pass evaluation driver.
//!
//! Owns a single run's accumulators and scores one reference/hypothesis
//! line pair at a time. Construct a fresh [`Evaluator`] per run; nothing is
//! shared across runs.

use asrev_align::{align, tokenize, AlignmentOp};
use tracing::debug;

use crate::accumulator::{CorpusSummary, CorpusTally, LengthBins, UtteranceStats};
use crate::confusion::ConfusionTables;
use crate::error::{EvalError, EvalResult};

/// Where the utterance id sits on each transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdPosition {
    /// Leading token (Kaldi format).
    Head,
    /// Trailing token (Sphinx format).
    Tail,
}

/// Options controlling one evaluation run.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvalOptions {
    /// Down-case all tokens before comparison.
    pub case_insensitive: bool,
    /// Strip an utterance id off each line and require it to match.
    pub id_position: Option<IdPosition>,
    /// Skip pairs whose reference is empty instead of scoring them.
    pub skip_empty_refs: bool,
    /// Maintain the word confusion tables.
    pub track_confusions: bool,
    /// Maintain the WER-by-sentence-length bins.
    pub track_length_bins: bool,
}

/// The outcome of scoring one utterance pair.
#[derive(Clone, Debug)]
pub struct ScoredPair {
    /// 1-based sentence number within the run (skipped pairs not counted).
    pub index: usize,
    /// The utterance id, when id stripping is enabled.
    pub id: Option<String>,
    /// Reference tokens after folding and id stripping.
    pub reference: Vec<String>,
    /// Hypothesis tokens after folding and id stripping.
    pub hypothesis: Vec<String>,
    /// The alignment between the two token sequences.
    pub ops: Vec<AlignmentOp>,
    /// This pair's scores.
    pub stats: UtteranceStats,
    /// Snapshot of the corpus tally after folding this pair in.
    pub running: CorpusTally,
}

/// Scores utterance pairs and accumulates corpus statistics for one run.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    options: EvalOptions,
    tally: CorpusTally,
    bins: LengthBins,
    confusions: ConfusionTables,
    line: usize,
}

impl Evaluator {
    /// Create a fresh evaluator with zeroed accumulators.
    pub fn new(options: EvalOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Score one reference/hypothesis line pair and fold it into the run's
    /// accumulators.
    ///
    /// Returns `Ok(None)` when the pair is skipped (empty reference with
    /// `skip_empty_refs` set). Returns an error when id stripping is
    /// enabled and the pair's ids are missing or differ; the run must then
    /// be aborted without reporting results.
    pub fn score_pair(&mut self, ref_line: &str, hyp_line: &str) -> EvalResult<Option<ScoredPair>> {
        self.line += 1;

        let mut reference = tokenize(ref_line, self.options.case_insensitive);
        let mut hypothesis = tokenize(hyp_line, self.options.case_insensitive);

        let id = match self.options.id_position {
            Some(position) => Some(self.strip_ids(position, &mut reference, &mut hypothesis)?),
            None => None,
        };

        if self.options.skip_empty_refs && reference.is_empty() {
            return Ok(None);
        }

        let ops = align(&reference, &hypothesis);
        let stats = UtteranceStats::from_ops(&ops);
        self.tally.record(&stats);
        if self.options.track_length_bins {
            self.bins
                .record(stats.ref_len, stats.error_rate().unwrap_or(f64::INFINITY));
        }
        if self.options.track_confusions {
            self.confusions.record(&ops, &reference, &hypothesis);
        }

        debug!(
            line = self.line,
            errors = stats.errors,
            matches = stats.matches,
            ref_len = stats.ref_len,
            "scored utterance pair"
        );

        Ok(Some(ScoredPair {
            index: self.tally.sentences,
            id,
            reference,
            hypothesis,
            ops,
            stats,
            running: self.tally,
        }))
    }

    /// Pop the id token off both sequences and require it to match.
    fn strip_ids(
        &self,
        position: IdPosition,
        reference: &mut Vec<String>,
        hypothesis: &mut Vec<String>,
    ) -> EvalResult<String> {
        let take = |tokens: &mut Vec<String>| match position {
            IdPosition::Head => {
                if tokens.is_empty() {
                    None
                } else {
                    Some(tokens.remove(0))
                }
            }
            IdPosition::Tail => tokens.pop(),
        };
        let ref_id = take(reference).ok_or(EvalError::MissingId { line: self.line })?;
        let hyp_id = take(hypothesis).ok_or(EvalError::MissingId { line: self.line })?;
        if ref_id != hyp_id {
            return Err(EvalError::IdMismatch {
                line: self.line,
                ref_id,
                hyp_id,
            });
        }
        Ok(ref_id)
    }

    /// The running corpus tally.
    pub fn tally(&self) -> &CorpusTally {
        &self.tally
    }

    /// The confusion tables accumulated so far.
    pub fn confusions(&self) -> &ConfusionTables {
        &self.confusions
    }

    /// The WER-by-length bins accumulated so far.
    pub fn length_bins(&self) -> &LengthBins {
        &self.bins
    }

    /// Freeze the run's tally into a reportable summary.
    pub fn summary(&self) -> CorpusSummary {
        self.tally.summary()
    }
}
