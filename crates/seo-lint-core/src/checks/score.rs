//! Overall score from the scorable checks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;

use super::CheckResult;

/// Percentage of scorable checks that succeeded, rounded.
///
/// Advisory checks are ignored. With no scorable checks the score is 0.
pub fn score(checks: &[CheckResult]) -> u8 {
    let (total, passed) = checks
        .iter()
        .filter(|c| c.kind.is_scorable())
        .fold((0usize, 0usize), |(total, passed), c| {
            (total + 1, passed + usize::from(c.is_success()))
        });
    if total == 0 {
        return 0;
    }
    // passed <= total, so the result is within 0..=100
    ((passed * 100 + total / 2) / total) as u8
}

/// Qualitative band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// At or above `excellent_score_threshold`.
    Excellent,
    /// At or above `good_score_threshold`.
    Good,
    /// Below `good_score_threshold`.
    Poor,
}

impl ScoreBand {
    /// Band for `score` under the configured thresholds.
    pub const fn from_score(score: u8, thresholds: &Thresholds) -> Self {
        if score >= thresholds.excellent_score_threshold {
            Self::Excellent
        } else if score >= thresholds.good_score_threshold {
            Self::Good
        } else {
            Self::Poor
        }
    }

    /// Returns the band as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckKind, CheckStatus};

    fn check(kind: CheckKind, status: CheckStatus) -> CheckResult {
        CheckResult::new(kind, status, "")
    }

    #[test]
    fn counts_only_scorable_checks() {
        let checks = vec![
            check(CheckKind::H1Keyword, CheckStatus::Success),
            check(CheckKind::ImageAlt, CheckStatus::Warning),
            check(CheckKind::KeywordLinks, CheckStatus::Success),
            check(CheckKind::MainKeywordDetection, CheckStatus::Success),
            check(CheckKind::SecondaryKeywordDetection, CheckStatus::Warning),
        ];
        assert_eq!(score(&checks), 50);
    }

    #[test]
    fn rounds_to_nearest() {
        let checks = vec![
            check(CheckKind::H1Keyword, CheckStatus::Success),
            check(CheckKind::ImageAlt, CheckStatus::Success),
            check(CheckKind::FirstParagraph, CheckStatus::Error),
        ];
        assert_eq!(score(&checks), 67);

        let checks = vec![
            check(CheckKind::H1Keyword, CheckStatus::Success),
            check(CheckKind::ImageAlt, CheckStatus::Error),
            check(CheckKind::FirstParagraph, CheckStatus::Error),
        ];
        assert_eq!(score(&checks), 33);
    }

    #[test]
    fn no_scorable_checks_scores_zero() {
        assert_eq!(score(&[]), 0);
        assert_eq!(
            score(&[check(CheckKind::KeywordLinks, CheckStatus::Success)]),
            0
        );
    }

    #[test]
    fn adding_a_success_never_lowers_the_score() {
        let statuses = [CheckStatus::Success, CheckStatus::Warning, CheckStatus::Error];
        let mut checks = Vec::new();
        for i in 0..12 {
            checks.push(check(CheckKind::ImageRatio, statuses[i % 3]));
            let before = score(&checks);
            let mut with_success = checks.clone();
            with_success.push(check(CheckKind::ImageRatio, CheckStatus::Success));
            assert!(score(&with_success) >= before, "after {} checks", checks.len());
        }
    }

    #[test]
    fn bands() {
        let t = Thresholds::default();
        assert_eq!(ScoreBand::from_score(100, &t), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80, &t), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79, &t), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60, &t), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(59, &t), ScoreBand::Poor);
        assert_eq!(ScoreBand::Good.to_string(), "good");
    }
}
