//! Keyword density checks.
//!
//! Density is `occurrences / words * 100` with words counted by
//! [`extract_words`](crate::text::extract_words) rules and occurrences by the
//! whole-word matcher. Zero words always gives zero density.

use crate::config::Thresholds;
use crate::html;
use crate::matcher::KeywordMatcher;
use crate::text::{count_words, percentage};

use super::{
    CheckKind, CheckResult, CheckStatus, DensityMeasurement, DensityScope, HeadingCoverage,
    HeadingDensity, missing_keyword,
};

/// Characters of measured text kept in a detailed measurement.
const SAMPLE_CHARS: usize = 1000;

/// Keyword density as a percentage of `total_words`.
pub fn density(occurrences: usize, total_words: usize) -> f64 {
    percentage(occurrences as f64, total_words as f64)
}

/// Main keyword density against the configured bounds.
///
/// Below the minimum is a warning; above the maximum is an error, since
/// search engines treat it as stuffing.
pub fn keyword_density(
    keyword: &KeywordMatcher,
    occurrences: usize,
    total_words: usize,
    thresholds: &Thresholds,
) -> CheckResult {
    let kind = CheckKind::KeywordDensity;
    if keyword.is_empty() {
        return missing_keyword(kind);
    }

    let value = density(occurrences, total_words);
    let min = thresholds.min_keyword_density;
    let max = thresholds.max_keyword_density();
    let counts = format!("{occurrences} occurrence(s) in {total_words} words");

    if value < min {
        CheckResult::new(
            kind,
            CheckStatus::Warning,
            format!("Keyword density is {value:.2}%, below {min}%."),
        )
        .with_detail(format!("{counts}. Use the main keyword more often."))
    } else if value > max {
        CheckResult::new(
            kind,
            CheckStatus::Error,
            format!("Keyword density is {value:.2}%, above {max}%: stuffing risk."),
        )
        .with_detail(format!("{counts}. Use the main keyword less often."))
    } else {
        CheckResult::new(
            kind,
            CheckStatus::Success,
            format!("Keyword density is {value:.2}%."),
        )
        .with_detail(counts)
    }
}

/// Keyword density over the body with every heading removed.
#[tracing::instrument(skip_all, fields(html_len = html.len(), details))]
pub fn density_excluding_headings(
    html: &str,
    keyword: &str,
    thresholds: &Thresholds,
    details: bool,
) -> DensityMeasurement {
    let body = html::plain_text(&html::strip_headings(html));
    let words = count_words(&body);
    let occurrences = KeywordMatcher::new(keyword).count_in(&body);
    let value = density(occurrences, words);
    let min = thresholds.min_keyword_density;
    let max = thresholds.max_keyword_density();

    let message = if value < min {
        format!("Density under recommended ({min}%).")
    } else if value > max {
        format!("Density above recommended ({max}%), possible overuse.")
    } else {
        "OK".to_string()
    };

    tracing::debug!(words, occurrences, density = value, "body density measured");
    DensityMeasurement {
        scope: DensityScope::BodyExcludingHeadings,
        words,
        occurrences,
        density: value,
        stuffing: value > max,
        message,
        headings: None,
        sample: details.then(|| body.chars().take(SAMPLE_CHARS).collect()),
    }
}

/// Keyword density inside headings, with stuffing detection.
///
/// Stuffing is flagged when any single heading's density exceeds
/// `max_heading_density_percent`, or when the share of headings carrying the
/// keyword exceeds `max_headings_with_keyword_percent`.
#[tracing::instrument(skip_all, fields(html_len = html.len(), details))]
pub fn heading_density(
    html: &str,
    keyword: &str,
    thresholds: &Thresholds,
    details: bool,
) -> DensityMeasurement {
    let matcher = KeywordMatcher::new(keyword);
    let breakdown: Vec<HeadingDensity> = html::headings(html)
        .into_iter()
        .map(|heading| {
            let words = count_words(&heading);
            let occurrences = matcher.count_in(&heading);
            HeadingDensity {
                density: density(occurrences, words),
                heading,
                words,
                occurrences,
            }
        })
        .collect();

    let heading_count = breakdown.len();
    let words: usize = breakdown.iter().map(|h| h.words).sum();
    let occurrences: usize = breakdown.iter().map(|h| h.occurrences).sum();
    let headings_with_keyword = breakdown.iter().filter(|h| h.occurrences > 0).count();
    let headings_with_keyword_percent =
        percentage(headings_with_keyword as f64, heading_count as f64);

    let too_dense = breakdown
        .iter()
        .any(|h| h.density > thresholds.max_heading_density_percent);
    let stuffing =
        too_dense || headings_with_keyword_percent > thresholds.max_headings_with_keyword_percent;

    tracing::debug!(
        heading_count,
        headings_with_keyword,
        stuffing,
        "heading density measured"
    );
    DensityMeasurement {
        scope: DensityScope::Headings,
        words,
        occurrences,
        density: density(occurrences, words),
        stuffing,
        message: if stuffing {
            "Keyword stuffing detected in headings".to_string()
        } else {
            "OK".to_string()
        },
        headings: Some(HeadingCoverage {
            heading_count,
            headings_with_keyword,
            headings_with_keyword_percent,
            details: details.then_some(breakdown),
        }),
        sample: None,
    }
}
