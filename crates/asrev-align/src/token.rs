//! Transcript tokenization.

/// Split a transcript line into whitespace-delimited tokens, optionally
/// folding each token to lowercase so comparison is case-insensitive.
pub fn tokenize(line: &str, fold_case: bool) -> Vec<String> {
    line.split_whitespace()
        .map(|token| {
            if fold_case {
                token.to_lowercase()
            } else {
                token.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(
            tokenize("the  cat\tsat\n", false),
            vec!["the", "cat", "sat"]
        );
    }

    #[test]
    fn empty_line_yields_no_tokens() {
        assert!(tokenize("", false).is_empty());
        assert!(tokenize("   \t ", false).is_empty());
    }

    #[test]
    fn case_folding() {
        assert_eq!(tokenize("The CAT Sat", true), vec!["the", "cat", "sat"]);
        assert_eq!(tokenize("The CAT", false), vec!["The", "CAT"]);
    }
}
