//! Full analysis pass.
//!
//! [`analyze`] parses the HTML once, runs every check against the parsed
//! [`Document`], and folds the scorable ones into a 0–100 score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::checks::{
    self, CheckResult, ScoreBand, coverage, density, detection, readability, structure,
};
use crate::config::Thresholds;
use crate::html::Document;
use crate::keywords::rank_candidates;
use crate::matcher::KeywordMatcher;
use crate::text::count_words;

/// Everything one analysis pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Score over the scorable checks, 0–100.
    pub score: u8,
    /// Qualitative band for the score.
    pub band: ScoreBand,
    /// The normalized main keyword, empty when none was given.
    pub main_keyword: String,
    /// Words in the visible text.
    pub total_words: usize,
    /// Whole-word occurrences of the main keyword.
    pub keyword_count: usize,
    /// `keyword_count / total_words * 100`, or 0 with no words.
    pub keyword_density: f64,
    /// Keyword placement, density, and structure checks, in display order.
    pub checks: Vec<CheckResult>,
    /// Sentence and paragraph length checks.
    pub readability_checks: Vec<CheckResult>,
}

impl AnalysisReport {
    /// Checks of both groups, scored and advisory, in display order.
    pub fn all_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().chain(&self.readability_checks)
    }
}

/// Analyze HTML content against a main keyword and secondary keywords.
///
/// Never fails: empty HTML or an empty keyword produce zero counts and
/// "no keyword" warnings.
#[tracing::instrument(
    skip_all,
    fields(html_len = html.len(), secondary = secondary_keywords.len())
)]
pub fn analyze(
    html: &str,
    main_keyword: &str,
    secondary_keywords: &[String],
    thresholds: &Thresholds,
) -> AnalysisReport {
    let document = Document::parse(html);
    analyze_document(&document, main_keyword, secondary_keywords, thresholds)
}

/// Analyze an already parsed document.
pub fn analyze_document(
    document: &Document,
    main_keyword: &str,
    secondary_keywords: &[String],
    thresholds: &Thresholds,
) -> AnalysisReport {
    let main = KeywordMatcher::new(main_keyword);
    let secondary: Vec<KeywordMatcher> = secondary_keywords
        .iter()
        .map(|k| KeywordMatcher::new(k))
        .collect();

    let text = &document.plain_text;
    let total_words = count_words(text);
    let keyword_count = main.count_in(text);
    let keyword_density = density::density(keyword_count, total_words);
    let ranked = rank_candidates(document);

    let checks = vec![
        structure::h1_keyword(document, &main),
        structure::image_alt(document, &main),
        structure::first_paragraph(document, &main),
        density::keyword_density(&main, keyword_count, total_words, thresholds),
        coverage::secondary_keywords(text, &secondary, thresholds),
        structure::visual_emphasis(document, &main, thresholds),
        structure::image_ratio(document, total_words, thresholds),
        coverage::keyword_links(document, &main, &secondary),
        detection::main_keyword_detection(&ranked, thresholds),
        detection::secondary_keyword_detection(&ranked, thresholds),
    ];
    let readability_checks = vec![
        readability::sentence_length(text, thresholds),
        readability::paragraph_length(document, thresholds),
    ];

    let score = checks::score(&checks);
    let band = ScoreBand::from_score(score, thresholds);
    tracing::info!(
        score,
        band = %band,
        total_words,
        keyword_count,
        keyword_density,
        "analysis complete"
    );

    AnalysisReport {
        score,
        band,
        main_keyword: main.keyword().to_string(),
        total_words,
        keyword_count,
        keyword_density,
        checks,
        readability_checks,
    }
}
