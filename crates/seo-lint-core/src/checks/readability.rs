//! Sentence and paragraph length checks.
//!
//! The tiering is the same for both: nothing over the limit is a success, a
//! few offenders are a warning, more than that is an error. The `is_long_*`
//! and `long_*` queries answer "which fragments are over the limit?" for hosts
//! that highlight them.

use crate::config::Thresholds;
use crate::html::Document;
use crate::text::{count_words, split_sentences};

use super::{CheckKind, CheckResult, CheckStatus};

/// Long sentences tolerated before the check becomes an error.
const SENTENCE_WARNING_LIMIT: usize = 3;
/// Long paragraphs tolerated before the check becomes an error.
const PARAGRAPH_WARNING_LIMIT: usize = 2;

const HIGHLIGHT_HINT: &str = "Turn on highlighting to see them in the text.";

/// Whether a single sentence exceeds `max_sentence_words`.
pub fn is_long_sentence(sentence: &str, thresholds: &Thresholds) -> bool {
    count_words(sentence) > thresholds.max_sentence_words
}

/// Whether a single paragraph exceeds `max_paragraph_words`.
pub fn is_long_paragraph(paragraph: &str, thresholds: &Thresholds) -> bool {
    count_words(paragraph) > thresholds.max_paragraph_words
}

/// Sentences of `text` that exceed `max_sentence_words`.
pub fn long_sentences(text: &str, thresholds: &Thresholds) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .filter(|s| is_long_sentence(s, thresholds))
        .collect()
}

/// Paragraphs of `document` that exceed `max_paragraph_words`.
pub fn long_paragraphs(document: &Document, thresholds: &Thresholds) -> Vec<String> {
    document
        .paragraphs
        .iter()
        .filter(|p| is_long_paragraph(p, thresholds))
        .cloned()
        .collect()
}

/// Count of sentences longer than `max_sentence_words`.
pub fn sentence_length(text: &str, thresholds: &Thresholds) -> CheckResult {
    let long = long_sentences(text, thresholds).len();
    let limit = thresholds.max_sentence_words;
    tiered(
        CheckKind::SentenceLength,
        long,
        SENTENCE_WARNING_LIMIT,
        &format!("sentence(s) longer than {limit} words"),
    )
}

/// Count of paragraphs longer than `max_paragraph_words`.
pub fn paragraph_length(document: &Document, thresholds: &Thresholds) -> CheckResult {
    let long = long_paragraphs(document, thresholds).len();
    let limit = thresholds.max_paragraph_words;
    tiered(
        CheckKind::ParagraphLength,
        long,
        PARAGRAPH_WARNING_LIMIT,
        &format!("paragraph(s) longer than {limit} words"),
    )
}

fn tiered(kind: CheckKind, long: usize, warning_limit: usize, what: &str) -> CheckResult {
    let status = match long {
        0 => return CheckResult::new(kind, CheckStatus::Success, format!("No {what}.")),
        n if n <= warning_limit => CheckStatus::Warning,
        _ => CheckStatus::Error,
    };
    CheckResult::new(kind, status, format!("{long} {what}.")).with_detail(HIGHLIGHT_HINT)
}
