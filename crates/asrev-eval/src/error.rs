//! Error types for the evaluation crate.

use thiserror::Error;

/// Errors produced while scoring a corpus.
///
/// Both variants indicate misaligned input files and abort the run; no
/// partial results should be reported after either.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The reference and hypothesis utterance ids for a pair differ.
    #[error("utterance id mismatch at line {line}: reference '{ref_id}' vs hypothesis '{hyp_id}'")]
    IdMismatch {
        line: usize,
        ref_id: String,
        hyp_id: String,
    },

    /// Id stripping is enabled but a line carries no tokens at all.
    #[error("missing utterance id at line {line}")]
    MissingId { line: usize },
}

/// Convenience alias for evaluation results.
pub type EvalResult<T> = Result<T, EvalError>;
