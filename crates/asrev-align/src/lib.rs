//! Alignment engine for ASR evaluation.
//!
//! Computes a minimum-edit-distance alignment between a reference token
//! sequence and a hypothesis token sequence, producing an ordered list of
//! ranged operations (equal / delete / insert / substitute).
//!
//! # Key Types
//!
//! - [`AlignmentOp`] / [`OpKind`] / [`Span`] -- Ranged alignment operations
//! - [`align`] -- The aligner itself
//! - [`tokenize`] -- Whitespace tokenization with optional case folding

pub mod aligner;
pub mod ops;
pub mod token;

pub use aligner::align;
pub use ops::{AlignmentOp, OpKind, Span};
pub use token::tokenize;
