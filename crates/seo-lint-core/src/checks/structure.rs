//! Keyword placement and page structure checks.

use crate::config::Thresholds;
use crate::html::Document;
use crate::matcher::KeywordMatcher;
use crate::normalize::display_text;

use super::{CheckKind, CheckResult, CheckStatus, excerpt, missing_keyword};

/// Main keyword in the first `<h1>`.
pub fn h1_keyword(document: &Document, keyword: &KeywordMatcher) -> CheckResult {
    let kind = CheckKind::H1Keyword;
    if keyword.is_empty() {
        return missing_keyword(kind);
    }
    let Some(h1) = document.h1s.first() else {
        return CheckResult::new(kind, CheckStatus::Error, "No H1 heading found.");
    };

    let result = if keyword.is_found_in(h1) {
        CheckResult::new(kind, CheckStatus::Success, "The H1 contains the main keyword.")
    } else {
        CheckResult::new(
            kind,
            CheckStatus::Error,
            "The H1 does not contain the main keyword.",
        )
    };
    result.with_detail(display_text(h1))
}

/// Main keyword in at least one image's alt text.
pub fn image_alt(document: &Document, keyword: &KeywordMatcher) -> CheckResult {
    let kind = CheckKind::ImageAlt;
    if keyword.is_empty() {
        return missing_keyword(kind);
    }
    if document.images.is_empty() {
        return CheckResult::new(kind, CheckStatus::Warning, "No images found.");
    }

    match document
        .images
        .iter()
        .filter_map(|img| img.alt.as_deref())
        .find(|alt| keyword.is_found_in(alt))
    {
        Some(alt) => CheckResult::new(
            kind,
            CheckStatus::Success,
            "An image alt text contains the main keyword.",
        )
        .with_detail(display_text(alt)),
        None => CheckResult::new(
            kind,
            CheckStatus::Warning,
            "No image alt text contains the main keyword.",
        ),
    }
}

/// Main keyword in the first paragraph.
pub fn first_paragraph(document: &Document, keyword: &KeywordMatcher) -> CheckResult {
    let kind = CheckKind::FirstParagraph;
    if keyword.is_empty() {
        return missing_keyword(kind);
    }
    let paragraph = &document.first_paragraph;
    if paragraph.is_empty() {
        return CheckResult::new(kind, CheckStatus::Error, "No paragraph found.");
    }

    let result = if keyword.is_found_in(paragraph) {
        CheckResult::new(
            kind,
            CheckStatus::Success,
            "The first paragraph contains the main keyword.",
        )
    } else {
        CheckResult::new(
            kind,
            CheckStatus::Error,
            "The first paragraph does not contain the main keyword.",
        )
    };
    result.with_detail(excerpt(paragraph))
}

/// Main keyword inside an element colored with one of the emphasis colors.
pub fn visual_emphasis(
    document: &Document,
    keyword: &KeywordMatcher,
    thresholds: &Thresholds,
) -> CheckResult {
    let kind = CheckKind::VisualEmphasis;
    if keyword.is_empty() {
        return missing_keyword(kind);
    }

    match document
        .emphasized_texts(&thresholds.emphasis_colors)
        .into_iter()
        .find(|text| keyword.is_found_in(text))
    {
        Some(text) => CheckResult::new(
            kind,
            CheckStatus::Success,
            "The main keyword is highlighted with color.",
        )
        .with_detail(excerpt(&text)),
        None => CheckResult::new(
            kind,
            CheckStatus::Warning,
            "Highlight the main keyword with color at least once.",
        ),
    }
}

/// Words per image against the configured ceiling.
pub fn image_ratio(document: &Document, total_words: usize, thresholds: &Thresholds) -> CheckResult {
    let kind = CheckKind::ImageRatio;
    let recommended = total_words.div_ceil(thresholds.words_per_image.max(1)).max(1);
    let images = document.images.len();

    if images == 0 {
        return CheckResult::new(kind, CheckStatus::Error, "No images found.").with_detail(
            format!("Add about {recommended} image(s) for {total_words} words."),
        );
    }

    let words_per_image = total_words as f64 / images as f64;
    if total_words <= thresholds.max_acceptable_words_per_image.saturating_mul(images) {
        CheckResult::new(
            kind,
            CheckStatus::Success,
            format!("{images} image(s) for {total_words} words ({words_per_image:.0} words per image)."),
        )
    } else {
        CheckResult::new(
            kind,
            CheckStatus::Warning,
            format!(
                "{words_per_image:.1} words per image, above {}.",
                thresholds.max_acceptable_words_per_image
            ),
        )
        .with_detail(format!(
            "Add images: about {recommended} are recommended for {total_words} words."
        ))
    }
}
