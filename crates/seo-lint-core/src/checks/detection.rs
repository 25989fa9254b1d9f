//! Keyword detection advisories.
//!
//! These never affect the score. They surface phrases the miner considers
//! strong enough to be the main or a secondary keyword. Both take the same
//! ranked list from [`rank_candidates`](crate::keywords::rank_candidates),
//! so a document is mined once per analysis.

use crate::config::Thresholds;
use crate::keywords::{KeywordCandidate, pick_main_keywords, pick_secondary_keywords};

use super::{CheckKind, CheckResult, CheckStatus};

/// Main keyword suggestions mined from the document.
#[tracing::instrument(skip_all)]
pub fn main_keyword_detection(ranked: &[KeywordCandidate], thresholds: &Thresholds) -> CheckResult {
    let suggestions = pick_main_keywords(ranked, thresholds.main_keyword_suggestions);
    advisory(
        CheckKind::MainKeywordDetection,
        suggestions,
        "No strong main keyword candidate found.",
        "Longer content with repeated, meaningful phrases gives better suggestions.",
    )
}

/// Secondary keyword suggestions mined from the document.
#[tracing::instrument(skip_all)]
pub fn secondary_keyword_detection(
    ranked: &[KeywordCandidate],
    thresholds: &Thresholds,
) -> CheckResult {
    let suggestions = pick_secondary_keywords(ranked, thresholds.secondary_keyword_suggestions);
    advisory(
        CheckKind::SecondaryKeywordDetection,
        suggestions,
        "No secondary keyword candidate found.",
        "Cover related topics with varied phrasing to surface secondary keywords.",
    )
}

fn advisory(
    kind: CheckKind,
    suggestions: Vec<KeywordCandidate>,
    empty_description: &str,
    empty_detail: &str,
) -> CheckResult {
    if suggestions.is_empty() {
        return CheckResult::new(kind, CheckStatus::Warning, empty_description)
            .with_detail(empty_detail)
            .with_suggestions(Vec::new());
    }

    let names: Vec<&str> = suggestions.iter().map(|s| s.keyword.as_str()).collect();
    let detail = suggestions
        .iter()
        .map(|s| {
            format!(
                "{}: {} time(s) (quality {}, relevance {})",
                s.keyword, s.frequency, s.quality, s.relevance
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    CheckResult::new(
        kind,
        CheckStatus::Success,
        format!("Suggested: {}", names.join(", ")),
    )
    .with_detail(detail)
    .with_suggestions(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::Document;
    use crate::keywords::rank_candidates;

    const ARTICLE: &str = "<h1>Container gardening guide</h1>\
        <h2>Why container gardening works</h2>\
        <p>Container gardening lets you grow food on a balcony. \
        Container gardening needs good soil and steady water.</p>\
        <p>Container gardening rewards patience. Raised beds are an option \
        but container gardening is cheaper. Raised beds need more space.</p>";

    #[test]
    fn main_detection_finds_the_repeated_heading_phrase() {
        let ranked = rank_candidates(&Document::parse(ARTICLE));
        let result = main_keyword_detection(&ranked, &Thresholds::default());
        assert_eq!(result.status, CheckStatus::Success);
        let suggestions = result.suggestions.as_ref().unwrap();
        assert!(!suggestions.is_empty());
        assert!(suggestions.len() <= 3);
        assert_eq!(suggestions[0].keyword, "container gardening");
        assert!(result.description.contains("container gardening"));
    }

    #[test]
    fn secondary_detection_respects_limit() {
        let ranked = rank_candidates(&Document::parse(ARTICLE));
        let mut thresholds = Thresholds::default();
        thresholds.secondary_keyword_suggestions = 1;
        let result = secondary_keyword_detection(&ranked, &thresholds);
        assert_eq!(result.suggestions.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn empty_document_yields_warnings() {
        let ranked = rank_candidates(&Document::parse(""));
        for result in [
            main_keyword_detection(&ranked, &Thresholds::default()),
            secondary_keyword_detection(&ranked, &Thresholds::default()),
        ] {
            assert_eq!(result.status, CheckStatus::Warning);
            assert_eq!(result.suggestions.as_deref(), Some(&[][..]));
            assert!(!result.kind.is_scorable());
        }
    }
}
