//! Suggest command: keyword candidates mined from the content.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use seo_lint_core::config::Thresholds;
use seo_lint_core::text::count_words;
use seo_lint_core::{Document, KeywordCandidate, suggest_keywords};

/// Suggestions shown by `suggest` when `--max` is not given.
const DEFAULT_SUGGESTIONS: usize = 5;

/// Arguments for the `suggest` subcommand.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// HTML file to mine (`-` for stdin; `.txt` files are read as plain text).
    pub file: Utf8PathBuf,

    /// Maximum number of suggestions.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SUGGESTIONS)]
    pub max: usize,
}

/// Keyword suggestions for one document.
#[derive(Debug, Serialize)]
pub struct SuggestReport {
    /// Words in the document.
    pub total_words: usize,
    /// Ranked suggestions.
    pub suggestions: Vec<KeywordCandidate>,
}

impl SuggestReport {
    /// Mine up to `max` suggestions.
    pub fn new(document: &Document, max: usize) -> Self {
        Self {
            total_words: count_words(&document.plain_text),
            suggestions: suggest_keywords(document, max),
        }
    }

    /// Suggestions for content with no main keyword yet.
    ///
    /// Short content gets none; there is too little text to rank phrases.
    pub fn for_cold_start(document: &Document, thresholds: &Thresholds) -> Self {
        let total_words = count_words(&document.plain_text);
        if total_words <= thresholds.min_words_for_suggestions {
            debug!(total_words, "too little text for suggestions");
            return Self {
                total_words,
                suggestions: Vec::new(),
            };
        }
        Self::new(document, DEFAULT_SUGGESTIONS)
    }
}

/// Print keyword suggestions for a file.
#[instrument(name = "cmd_suggest", skip_all, fields(file = %args.file, max = args.max))]
pub fn cmd_suggest(
    args: SuggestArgs,
    global_json: bool,
    thresholds: &Thresholds,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, max = args.max, "executing suggest command");

    let content = super::read_input_file(&args.file, max_input)?;
    let document = super::parse_document(&args.file, &content);
    let report = SuggestReport::new(&document, args.max);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", args.file.bold());
        print_suggestions(&report, thresholds);
    }
    Ok(())
}

/// Print a suggestion list, or the reason there is none.
pub fn print_suggestions(report: &SuggestReport, thresholds: &Thresholds) {
    if report.suggestions.is_empty() {
        if report.total_words <= thresholds.min_words_for_suggestions {
            println!(
                "\n  {} Write more than {} words to get keyword suggestions ({} so far).",
                "Suggestions:".cyan(),
                thresholds.min_words_for_suggestions,
                report.total_words
            );
        } else {
            println!(
                "\n  {} No repeated, meaningful phrases found.",
                "Suggestions:".cyan()
            );
        }
        return;
    }

    println!("\n  {}", "Suggested keywords".bold().underline());
    for (rank, candidate) in report.suggestions.iter().enumerate() {
        println!(
            "    {}. {} {}",
            rank + 1,
            candidate.keyword.green().bold(),
            format!(
                "({}x, {}, quality {}, relevance {})",
                candidate.frequency,
                candidate.kind.as_str(),
                candidate.quality,
                candidate.relevance
            )
            .dimmed()
        );
    }
}
