//! Aligned diff renderer for ASR evaluation.
//!
//! Turns one utterance pair's alignment into a two-line textual
//! representation in the Sphinx style: equal runs lowercased, error runs
//! uppercased, `*` fillers standing in for absent tokens, and widths padded
//! inside substitution runs so the two lines stay in step.
//!
//! Output here is plain text. Terminal color is a presentation concern the
//! CLI layers on top, keyed off [`RenderedToken::highlight`].

use asrev_align::{AlignmentOp, OpKind};

/// Marker prefixed to the rendered reference line.
pub const REF_PREFIX: &str = "REF:";
/// Marker prefixed to the rendered hypothesis line.
pub const HYP_PREFIX: &str = "HYP:";

/// One printed token of a rendered diff line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedToken {
    /// The text to print, already cased, padded, or filled.
    pub text: String,
    /// Whether the token is part of an error region.
    pub highlight: bool,
}

impl RenderedToken {
    fn plain(text: String) -> Self {
        Self {
            text,
            highlight: false,
        }
    }

    fn error(text: String) -> Self {
        Self {
            text,
            highlight: true,
        }
    }
}

/// A fully rendered utterance pair: one token list per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedPair {
    /// Tokens of the reference line.
    pub reference: Vec<RenderedToken>,
    /// Tokens of the hypothesis line.
    pub hypothesis: Vec<RenderedToken>,
}

impl RenderedPair {
    /// The reference line: prefix and space-joined tokens.
    pub fn reference_line(&self) -> String {
        join_line(REF_PREFIX, &self.reference)
    }

    /// The hypothesis line: prefix and space-joined tokens.
    pub fn hypothesis_line(&self) -> String {
        join_line(HYP_PREFIX, &self.hypothesis)
    }
}

fn join_line(prefix: &str, tokens: &[RenderedToken]) -> String {
    let mut line = String::from(prefix);
    for token in tokens {
        line.push(' ');
        line.push_str(&token.text);
    }
    line
}

/// Width of a token in characters (not bytes).
fn width(token: &str) -> usize {
    token.chars().count()
}

/// Filler standing in for an absent token of the given width.
fn filler(width: usize) -> String {
    "*".repeat(width)
}

/// Render one utterance pair's alignment as a two-line diff.
pub fn render<T: AsRef<str>>(
    ops: &[AlignmentOp],
    reference: &[T],
    hypothesis: &[T],
) -> RenderedPair {
    let mut out = RenderedPair::default();
    for op in ops {
        let ref_run = &reference[op.reference.start..op.reference.end];
        let hyp_run = &hypothesis[op.hypothesis.start..op.hypothesis.end];
        match op.kind {
            OpKind::Equal => {
                for token in ref_run {
                    out.reference
                        .push(RenderedToken::plain(token.as_ref().to_lowercase()));
                }
                for token in hyp_run {
                    out.hypothesis
                        .push(RenderedToken::plain(token.as_ref().to_lowercase()));
                }
            }
            OpKind::Delete => {
                for token in ref_run {
                    out.reference
                        .push(RenderedToken::error(token.as_ref().to_uppercase()));
                    out.hypothesis
                        .push(RenderedToken::error(filler(width(token.as_ref()))));
                }
            }
            OpKind::Insert => {
                for token in hyp_run {
                    out.reference
                        .push(RenderedToken::error(filler(width(token.as_ref()))));
                    out.hypothesis
                        .push(RenderedToken::error(token.as_ref().to_uppercase()));
                }
            }
            OpKind::Substitute => render_substitution(&mut out, ref_run, hyp_run),
        }
    }
    out
}

/// Render a substitution run, padding the two sides to the same token count
/// and each paired word to the same printed width.
fn render_substitution<T: AsRef<str>>(out: &mut RenderedPair, ref_run: &[T], hyp_run: &[T]) {
    let count = ref_run.len().max(hyp_run.len());
    for k in 0..count {
        let (ref_text, hyp_text) = match (ref_run.get(k), hyp_run.get(k)) {
            (Some(ref_word), Some(hyp_word)) => {
                let ref_word = ref_word.as_ref().to_uppercase();
                let hyp_word = hyp_word.as_ref().to_uppercase();
                let target = width(&ref_word).max(width(&hyp_word));
                (pad(&ref_word, target), pad(&hyp_word, target))
            }
            (Some(ref_word), None) => {
                let ref_word = ref_word.as_ref().to_uppercase();
                let fill = filler(width(&ref_word));
                (ref_word, fill)
            }
            (None, Some(hyp_word)) => {
                let hyp_word = hyp_word.as_ref().to_uppercase();
                let fill = filler(width(&hyp_word));
                (fill, hyp_word)
            }
            (None, None) => unreachable!("substitution run has at least one side"),
        };
        out.reference.push(RenderedToken::error(ref_text));
        out.hypothesis.push(RenderedToken::error(hyp_text));
    }
}

/// Pad a word with trailing spaces to the target character width.
fn pad(word: &str, target: usize) -> String {
    let mut padded = String::from(word);
    for _ in width(word)..target {
        padded.push(' ');
    }
    padded
}
