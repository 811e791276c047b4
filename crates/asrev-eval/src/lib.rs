//! Evaluation engine for ASR scoring.
//!
//! Consumes alignment operations pair by pair and accumulates corpus-level
//! statistics for one evaluation run: token/error/match tallies, sentence
//! error counts, per-length error-rate bins, and word confusion tables.
//!
//! # Key Types
//!
//! - [`Evaluator`] / [`EvalOptions`] -- One-pass evaluation driver
//! - [`UtteranceStats`] / [`CorpusTally`] / [`CorpusSummary`] -- Metrics
//! - [`ConfusionTables`] -- Insertion/deletion/substitution word tallies
//! - [`LengthBins`] -- Average WER grouped by reference sentence length

pub mod accumulator;
pub mod confusion;
pub mod error;
pub mod evaluator;

pub use accumulator::{CorpusSummary, CorpusTally, LengthAverage, LengthBins, UtteranceStats};
pub use confusion::ConfusionTables;
pub use error::{EvalError, EvalResult};
pub use evaluator::{EvalOptions, Evaluator, IdPosition, ScoredPair};
