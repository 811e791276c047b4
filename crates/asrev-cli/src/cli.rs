use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "asrev",
    about = "Evaluate an ASR transcript against a reference transcript",
    version,
)]
pub struct Cli {
    /// Reference transcript file
    pub ref_file: PathBuf,

    /// ASR hypothesis transcript file
    pub hyp_file: PathBuf,

    /// Print every sentence with its aligned diff and error counts
    #[arg(short = 'i', long, conflicts_with = "print_errors")]
    pub print_instances: bool,

    /// Print only the sentences that contain errors
    #[arg(short = 'r', long)]
    pub print_errors: bool,

    /// Lines start with an utterance id (Kaldi format)
    #[arg(long, conflicts_with = "tail_ids")]
    pub head_ids: bool,

    /// Lines end with an utterance id (Sphinx format)
    #[arg(long, visible_alias = "has-ids")]
    pub tail_ids: bool,

    /// Print tables of which words were confused
    #[arg(short = 'c', long)]
    pub confusions: bool,

    /// Minimum count for a word to appear in the confusion tables
    #[arg(short = 'm', long, default_value_t = 1, value_name = "COUNT")]
    pub min_word_count: u64,

    /// Print a table of average WER grouped by reference sentence length
    #[arg(short = 'p', long)]
    pub print_wer_vs_length: bool,

    /// Down-case the text before running the evaluation
    #[arg(short = 'a', long)]
    pub case_insensitive: bool,

    /// Skip over any examples where the reference is empty
    #[arg(short = 'e', long)]
    pub remove_empty_refs: bool,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let cli = Cli::try_parse_from(["asrev", "ref.txt", "hyp.txt"]).unwrap();
        assert_eq!(cli.ref_file, PathBuf::from("ref.txt"));
        assert_eq!(cli.hyp_file, PathBuf::from("hyp.txt"));
        assert!(!cli.print_instances);
        assert_eq!(cli.min_word_count, 1);
    }

    #[test]
    fn parse_print_instances() {
        let cli = Cli::try_parse_from(["asrev", "r", "h", "-i"]).unwrap();
        assert!(cli.print_instances);
    }

    #[test]
    fn print_modes_mutually_exclusive() {
        assert!(Cli::try_parse_from(["asrev", "r", "h", "-i", "-r"]).is_err());
    }

    #[test]
    fn id_positions_mutually_exclusive() {
        assert!(Cli::try_parse_from(["asrev", "r", "h", "--head-ids", "--tail-ids"]).is_err());
    }

    #[test]
    fn parse_tail_ids_alias() {
        let cli = Cli::try_parse_from(["asrev", "r", "h", "--has-ids"]).unwrap();
        assert!(cli.tail_ids);
    }

    #[test]
    fn parse_confusions_with_min_count() {
        let cli = Cli::try_parse_from(["asrev", "r", "h", "-c", "-m", "5"]).unwrap();
        assert!(cli.confusions);
        assert_eq!(cli.min_word_count, 5);
    }

    #[test]
    fn parse_case_insensitive_and_empty_refs() {
        let cli = Cli::try_parse_from(["asrev", "r", "h", "-a", "-e"]).unwrap();
        assert!(cli.case_insensitive);
        assert!(cli.remove_empty_refs);
    }

    #[test]
    fn parse_wer_vs_length() {
        let cli = Cli::try_parse_from(["asrev", "r", "h", "-p"]).unwrap();
        assert!(cli.print_wer_vs_length);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["asrev", "r", "h", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["asrev", "-v", "r", "h"]).unwrap();
        assert!(cli.verbose);
    }
}
