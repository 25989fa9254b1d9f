//! Analyze command: the full keyword and readability checklist.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use seo_lint_core::checks::readability;
use seo_lint_core::config::{DensityProfile, Thresholds};
use seo_lint_core::{AnalysisReport, CheckResult, CheckStatus, ScoreBand, analyze_document};

use super::suggest::{SuggestReport, print_suggestions};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// HTML file to analyze (`-` for stdin; `.txt` files are read as plain text).
    pub file: Utf8PathBuf,

    /// Main keyword. Without it, keyword suggestions are printed instead.
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Secondary keywords (comma-separated).
    #[arg(short, long, value_delimiter = ',')]
    pub secondary: Vec<String>,

    /// Density profile (overrides config).
    #[arg(long, value_enum)]
    pub profile: Option<DensityProfile>,

    /// List the sentences and paragraphs that are over the length limits.
    #[arg(long)]
    pub highlight: bool,

    /// Fail when the score is below this value (0–100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,
}

/// Fragments over the readability limits.
#[derive(Debug, Serialize)]
struct Highlights {
    long_sentences: Vec<String>,
    long_paragraphs: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    file: &'a str,
    #[serde(flatten)]
    report: &'a AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlights: Option<Highlights>,
}

/// Run the full analysis on a file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config_thresholds: &Thresholds,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        keyword = ?args.keyword,
        secondary = ?args.secondary,
        "executing analyze command"
    );

    let content = super::read_input_file(&args.file, max_input)?;
    let document = super::parse_document(&args.file, &content);
    let thresholds = super::effective_thresholds(config_thresholds, args.profile);

    let keyword = args.keyword.as_deref().unwrap_or_default().trim();
    if keyword.is_empty() {
        if args.min_score.is_some() {
            bail!("--min-score needs a main keyword (--keyword)");
        }
        let report = SuggestReport::for_cold_start(&document, &thresholds);
        if global_json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", args.file.bold());
            println!(
                "\n  {} No main keyword given.",
                "Keyword:".yellow().bold()
            );
            print_suggestions(&report, &thresholds);
        }
        return Ok(());
    }

    let report = analyze_document(&document, keyword, &args.secondary, &thresholds);
    let highlights = args.highlight.then(|| Highlights {
        long_sentences: readability::long_sentences(&document.plain_text, &thresholds),
        long_paragraphs: readability::long_paragraphs(&document, &thresholds),
    });

    if global_json {
        let output = AnalyzeOutput {
            file: args.file.as_str(),
            report: &report,
            highlights,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("failed to serialize report")?
        );
    } else {
        print_report(&args.file, &report, highlights.as_ref());
    }

    if let Some(min) = args.min_score
        && report.score < min
    {
        bail!(
            "{} score {} is below minimum {}",
            args.file,
            report.score,
            min
        );
    }

    Ok(())
}

fn print_report(file: &Utf8PathBuf, report: &AnalysisReport, highlights: Option<&Highlights>) {
    let score = format!("{}/100", report.score);
    let score = match report.band {
        ScoreBand::Excellent => score.green().bold().to_string(),
        ScoreBand::Good => score.yellow().bold().to_string(),
        ScoreBand::Poor => score.red().bold().to_string(),
    };
    println!("{}", file.bold());
    println!(
        "\n  {} {} ({})",
        "Score:".cyan(),
        score,
        report.band
    );
    println!(
        "  {} {} words, \"{}\" x{} ({:.2}%)",
        "Keyword:".cyan(),
        report.total_words,
        report.main_keyword,
        report.keyword_count,
        report.keyword_density
    );

    println!("\n  {}", "SEO checks".bold().underline());
    for check in &report.checks {
        print_check(check);
    }
    println!("\n  {}", "Readability".bold().underline());
    for check in &report.readability_checks {
        print_check(check);
    }

    if let Some(highlights) = highlights {
        print_fragments("Long sentences", &highlights.long_sentences);
        print_fragments("Long paragraphs", &highlights.long_paragraphs);
    }
}

fn print_check(check: &CheckResult) {
    let marker = match check.status {
        CheckStatus::Success => "✓".green().to_string(),
        CheckStatus::Warning => "!".yellow().to_string(),
        CheckStatus::Error => "✗".red().to_string(),
    };
    let advisory = if check.kind.is_scorable() {
        String::new()
    } else {
        format!(" {}", "(advisory)".dimmed())
    };
    println!(
        "    {marker} {}{advisory}: {}",
        check.title.bold(),
        check.description
    );
    if let Some(ref detail) = check.detail {
        for line in detail.lines() {
            println!("        {}", line.dimmed());
        }
    }
}

fn print_fragments(label: &str, fragments: &[String]) {
    if fragments.is_empty() {
        return;
    }
    println!("\n  {}", label.bold().underline());
    for fragment in fragments {
        let words: Vec<&str> = fragment.split_whitespace().collect();
        let preview = if words.len() > 12 {
            format!("{} ...", words[..12].join(" "))
        } else {
            words.join(" ")
        };
        println!("    - {preview}");
    }
}
