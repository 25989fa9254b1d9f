//! Rule-based content checks.
//!
//! Each check is a pure function of the parsed [`Document`](crate::html::Document),
//! the keyword(s), and [`Thresholds`](crate::config::Thresholds), producing a
//! [`CheckResult`]. The [`analyzer`](crate::analyzer) runs them all and folds
//! the scorable ones through [`score::score`].
//!
//! Callers can also invoke checks individually.

pub mod coverage;
pub mod density;
pub mod detection;
pub mod readability;
pub mod reports;
pub mod score;
pub mod structure;

pub use reports::{
    CheckKind, CheckResult, CheckStatus, DensityMeasurement, DensityScope, HeadingCoverage,
    HeadingDensity,
};
pub use score::{ScoreBand, score};

/// Longest detail excerpt, in characters.
const DETAIL_CHARS: usize = 80;

/// Result for a keyword-dependent check when no main keyword is set.
fn missing_keyword(kind: CheckKind) -> CheckResult {
    CheckResult::new(kind, CheckStatus::Warning, "No main keyword set.")
}

/// Display form of `text`, cut to [`DETAIL_CHARS`] with an ellipsis when cut.
fn excerpt(text: &str) -> String {
    let display = crate::normalize::display_text(text);
    if display.chars().count() <= DETAIL_CHARS {
        return display;
    }
    let mut cut: String = display.chars().take(DETAIL_CHARS).collect();
    cut.push_str("...");
    cut
}
