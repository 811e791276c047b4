use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use asrev_eval::{
    ConfusionTables, CorpusSummary, EvalOptions, Evaluator, IdPosition, LengthBins, ScoredPair,
};
use asrev_render::{render, RenderedToken};

use crate::cli::{Cli, OutputFormat};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let options = EvalOptions {
        case_insensitive: cli.case_insensitive,
        id_position: if cli.head_ids {
            Some(IdPosition::Head)
        } else if cli.tail_ids {
            Some(IdPosition::Tail)
        } else {
            None
        },
        skip_empty_refs: cli.remove_empty_refs,
        track_confusions: cli.confusions,
        track_length_bins: cli.print_wer_vs_length,
    };
    let mut evaluator = Evaluator::new(options);

    let ref_lines = open_lines(&cli.ref_file)?;
    let hyp_lines = open_lines(&cli.hyp_file)?;

    // Pairing stops at the shorter of the two files.
    for (ref_line, hyp_line) in ref_lines.zip(hyp_lines) {
        let ref_line = ref_line.with_context(|| format!("reading {}", cli.ref_file.display()))?;
        let hyp_line = hyp_line.with_context(|| format!("reading {}", cli.hyp_file.display()))?;
        let Some(pair) = evaluator.score_pair(&ref_line, &hyp_line)? else {
            continue;
        };
        if cli.print_instances || (cli.print_errors && pair.stats.has_errors()) {
            print_instance(&pair);
        }
    }

    if cli.confusions {
        print_confusions(evaluator.confusions(), cli.min_word_count);
    }
    if cli.print_wer_vs_length {
        print_wer_vs_length(evaluator.length_bins());
    }
    match cli.format {
        OutputFormat::Text => print_summary(&evaluator.summary()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&evaluator.summary())?),
    }
    Ok(())
}

fn open_lines(path: &Path) -> anyhow::Result<Lines<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file).lines())
}

fn print_instance(pair: &ScoredPair) {
    let rendered = render(&pair.ops, &pair.reference, &pair.hypothesis);
    println!("{}", paint_line(asrev_render::REF_PREFIX, &rendered.reference));
    println!("{}", paint_line(asrev_render::HYP_PREFIX, &rendered.hypothesis));
    match &pair.id {
        Some(id) => println!("SENTENCE {}  {}", pair.index, id),
        None => println!("SENTENCE {}", pair.index),
    }
    println!(
        "Correct          = {}  {:3}   ({:6})",
        fmt_pct(pair.stats.match_rate()),
        pair.stats.matches,
        pair.running.matches,
    );
    println!(
        "Errors           = {}  {:3}   ({:6})",
        fmt_pct(pair.stats.error_rate()),
        pair.stats.errors,
        pair.running.errors,
    );
    println!();
}

/// Join a rendered line, painting error tokens red.
fn paint_line(prefix: &str, tokens: &[RenderedToken]) -> String {
    let mut parts = Vec::with_capacity(tokens.len() + 1);
    parts.push(prefix.to_string());
    parts.extend(tokens.iter().map(|token| {
        if token.highlight {
            token.text.red().to_string()
        } else {
            token.text.clone()
        }
    }));
    parts.join(" ")
}

fn fmt_pct(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:5.1}%", 100.0 * rate),
        None => "  inf%".to_string(),
    }
}

fn print_confusions(tables: &ConfusionTables, min_count: u64) {
    let insertions = tables.insertions(min_count);
    if !insertions.is_empty() {
        println!("INSERTIONS:");
        for (word, count) in insertions {
            println!("{word:>20} {count:>10}");
        }
    }
    let deletions = tables.deletions(min_count);
    if !deletions.is_empty() {
        println!("DELETIONS:");
        for (word, count) in deletions {
            println!("{word:>20} {count:>10}");
        }
    }
    let substitutions = tables.substitutions(min_count);
    if !substitutions.is_empty() {
        println!("SUBSTITUTIONS:");
        for (ref_word, hyp_word, count) in substitutions {
            println!("{ref_word:>20} -> {hyp_word:>20}   {count:>10}");
        }
    }
}

fn print_wer_vs_length(bins: &LengthBins) {
    println!("WER vs. sentence length:");
    for row in bins.averages() {
        println!("{:5} {:.6}", row.length, row.avg_error_rate);
    }
    println!();
}

fn print_summary(summary: &CorpusSummary) {
    println!("Sentence count: {}", summary.sentences);
    println!(
        "WER: {:10.3}% ({:10} / {:10})",
        100.0 * summary.wer,
        summary.errors,
        summary.ref_tokens,
    );
    println!(
        "WRR: {:10.3}% ({:10} / {:10})",
        100.0 * summary.wrr,
        summary.matches,
        summary.ref_tokens,
    );
    println!(
        "SER: {:10.3}% ({:10} / {:10})",
        100.0 * summary.ser,
        summary.sentences_with_errors,
        summary.sentences,
    );
}
