//! Result types shared by every check.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in both CLI JSON output and MCP tool responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::keywords::KeywordCandidate;

/// Outcome tier of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The content meets the rule.
    Success,
    /// The content could be improved.
    Warning,
    /// The content breaks the rule.
    Error,
}

impl CheckStatus {
    /// Returns the status as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Which rule produced a [`CheckResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Main keyword in the first H1.
    H1Keyword,
    /// Main keyword in an image's alt text.
    ImageAlt,
    /// Main keyword in the first paragraph.
    FirstParagraph,
    /// Main keyword density within bounds.
    KeywordDensity,
    /// Coverage of the secondary keywords.
    SecondaryKeywords,
    /// Main keyword inside a colored element.
    VisualEmphasis,
    /// Words per image.
    ImageRatio,
    /// Keywords in link anchor text.
    KeywordLinks,
    /// Main keyword suggestions mined from the text.
    MainKeywordDetection,
    /// Secondary keyword suggestions mined from the text.
    SecondaryKeywordDetection,
    /// Long sentences.
    SentenceLength,
    /// Long paragraphs.
    ParagraphLength,
}

impl CheckKind {
    /// Whether the check counts toward the overall score.
    ///
    /// Link usage and the keyword detection advisories are reported but
    /// never scored.
    pub const fn is_scorable(&self) -> bool {
        !matches!(
            self,
            Self::KeywordLinks | Self::MainKeywordDetection | Self::SecondaryKeywordDetection
        )
    }

    /// Short heading shown for the check.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::H1Keyword => "Main keyword in H1",
            Self::ImageAlt => "Main keyword in image alt text",
            Self::FirstParagraph => "Main keyword in first paragraph",
            Self::KeywordDensity => "Keyword density",
            Self::SecondaryKeywords => "Secondary keywords",
            Self::VisualEmphasis => "Visual emphasis",
            Self::ImageRatio => "Image-to-text ratio",
            Self::KeywordLinks => "Keyword links",
            Self::MainKeywordDetection => "Main keyword detection",
            Self::SecondaryKeywordDetection => "Secondary keyword detection",
            Self::SentenceLength => "Sentence length",
            Self::ParagraphLength => "Paragraph length",
        }
    }

    /// One-sentence explanation of what the check looks for.
    pub const fn tooltip(&self) -> &'static str {
        match self {
            Self::H1Keyword => "The first H1 heading should contain the main keyword.",
            Self::ImageAlt => "At least one image should describe the main keyword in its alt text.",
            Self::FirstParagraph => "Readers and crawlers expect the topic in the opening paragraph.",
            Self::KeywordDensity => {
                "The main keyword should appear often enough to be clear but not so often it reads as stuffing."
            }
            Self::SecondaryKeywords => "Most secondary keywords should appear somewhere in the body.",
            Self::VisualEmphasis => "Highlighting the main keyword with color draws the eye to it.",
            Self::ImageRatio => "Long stretches of text should be broken up with images.",
            Self::KeywordLinks => "Link anchor text that carries your keywords strengthens internal linking.",
            Self::MainKeywordDetection => "Phrases in the text that would make a strong main keyword.",
            Self::SecondaryKeywordDetection => "Phrases in the text that would work as secondary keywords.",
            Self::SentenceLength => "Short sentences are easier to read.",
            Self::ParagraphLength => "Short paragraphs are easier to scan.",
        }
    }
}

/// One entry in the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckResult {
    /// Which rule produced this result.
    pub kind: CheckKind,
    /// Outcome tier.
    pub status: CheckStatus,
    /// Short heading.
    pub title: String,
    /// What the check looks for.
    pub tooltip: String,
    /// What was found.
    pub description: String,
    /// Supporting text, such as the paragraph that was inspected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Keyword suggestions attached by the detection advisories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<KeywordCandidate>>,
}

impl CheckResult {
    /// Build a result with the kind's title and tooltip.
    pub fn new(kind: CheckKind, status: CheckStatus, description: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            title: kind.title().to_string(),
            tooltip: kind.tooltip().to_string(),
            description: description.into(),
            detail: None,
            suggestions: None,
        }
    }

    /// Attach a detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach keyword suggestions.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<KeywordCandidate>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Whether the check passed.
    pub fn is_success(&self) -> bool {
        self.status == CheckStatus::Success
    }
}

/// What a [`DensityMeasurement`] was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DensityScope {
    /// All body text with heading elements removed.
    BodyExcludingHeadings,
    /// Heading texts only.
    Headings,
}

/// Keyword density over one scope of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DensityMeasurement {
    /// What was measured.
    pub scope: DensityScope,
    /// Words in scope.
    pub words: usize,
    /// Whole-word keyword occurrences in scope.
    pub occurrences: usize,
    /// `occurrences / words * 100`, or 0 with no words.
    pub density: f64,
    /// Whether the keyword is overused in this scope.
    pub stuffing: bool,
    /// Human-readable verdict.
    pub message: String,
    /// Heading coverage, for the heading scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<HeadingCoverage>,
    /// The first 1000 characters of the measured text, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

/// How the keyword is spread across headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeadingCoverage {
    /// Number of non-empty headings.
    pub heading_count: usize,
    /// Headings containing the keyword at least once.
    pub headings_with_keyword: usize,
    /// `headings_with_keyword / heading_count * 100`, or 0 with no headings.
    pub headings_with_keyword_percent: f64,
    /// Per-heading breakdown, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<HeadingDensity>>,
}

/// Keyword density inside a single heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeadingDensity {
    /// Heading text.
    pub heading: String,
    /// Words in the heading.
    pub words: usize,
    /// Keyword occurrences in the heading.
    pub occurrences: usize,
    /// `occurrences / words * 100`.
    pub density: f64,
}
