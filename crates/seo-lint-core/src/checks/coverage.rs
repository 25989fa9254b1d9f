//! Secondary keyword coverage and keyword-bearing links.

use crate::config::Thresholds;
use crate::html::Document;
use crate::matcher::KeywordMatcher;
use crate::text::percentage;

use super::{CheckKind, CheckResult, CheckStatus};

/// Share of secondary keywords that appear at least once in `text`.
///
/// Blank entries are ignored.
pub fn secondary_keywords(
    text: &str,
    secondary: &[KeywordMatcher],
    thresholds: &Thresholds,
) -> CheckResult {
    let kind = CheckKind::SecondaryKeywords;
    let wanted: Vec<&KeywordMatcher> = secondary.iter().filter(|m| !m.is_empty()).collect();
    if wanted.is_empty() {
        return CheckResult::new(kind, CheckStatus::Warning, "No secondary keywords set.");
    }

    let total = wanted.len();
    let (found, missing): (Vec<&KeywordMatcher>, Vec<&KeywordMatcher>) =
        wanted.into_iter().partition(|m| m.is_found_in(text));
    let percent = percentage(found.len() as f64, total as f64);
    let description = format!(
        "{} of {total} secondary keywords found ({percent:.0}%).",
        found.len()
    );

    if percent >= thresholds.min_secondary_keyword_percent {
        CheckResult::new(kind, CheckStatus::Success, description)
    } else {
        let names: Vec<&str> = missing.iter().map(|m| m.keyword()).collect();
        CheckResult::new(kind, CheckStatus::Warning, description)
            .with_detail(format!("Missing: {}", names.join(", ")))
    }
}

/// Share of links whose anchor text carries the main or a secondary keyword.
pub fn keyword_links(
    document: &Document,
    main: &KeywordMatcher,
    secondary: &[KeywordMatcher],
) -> CheckResult {
    let kind = CheckKind::KeywordLinks;
    let links = &document.links;
    if links.is_empty() {
        return CheckResult::new(kind, CheckStatus::Warning, "No links found.")
            .with_detail("Link to related pages using your keywords as anchor text.");
    }

    let keywords: Vec<&KeywordMatcher> = std::iter::once(main)
        .chain(secondary)
        .filter(|m| !m.is_empty())
        .collect();
    let with_keyword = links
        .iter()
        .filter(|link| keywords.iter().any(|k| k.is_found_in(&link.text)))
        .count();
    let percent = percentage(with_keyword as f64, links.len() as f64);
    let description = format!(
        "{with_keyword} of {} links use a keyword in their anchor text ({percent:.0}%).",
        links.len()
    );

    if percent >= 50.0 {
        CheckResult::new(kind, CheckStatus::Success, description)
    } else if percent >= 25.0 {
        CheckResult::new(kind, CheckStatus::Warning, description)
            .with_detail("Use keywords in a few more anchor texts.")
    } else {
        CheckResult::new(kind, CheckStatus::Warning, description)
            .with_detail("Most anchor texts are generic. Rewrite them around your keywords.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers(keywords: &[&str]) -> Vec<KeywordMatcher> {
        keywords.iter().map(|k| KeywordMatcher::new(k)).collect()
    }

    #[test]
    fn coverage_scenario_two_of_three() {
        let text = "Plants need sun and water to grow well.";
        let result = secondary_keywords(
            text,
            &matchers(&["sun", "water", "soil"]),
            &Thresholds::default(),
        );
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.description.contains("2 of 3"));
        assert!(result.description.contains("67%"));
        assert_eq!(result.detail.as_deref(), Some("Missing: soil"));
    }

    #[test]
    fn full_coverage_succeeds() {
        let text = "Sun, water, and good soil.";
        let result = secondary_keywords(
            text,
            &matchers(&["sun", "water", "soil"]),
            &Thresholds::default(),
        );
        assert_eq!(result.status, CheckStatus::Success);
        assert!(result.detail.is_none());
    }

    #[test]
    fn blank_secondary_keywords_are_ignored() {
        let result = secondary_keywords("anything", &matchers(&["", "  "]), &Thresholds::default());
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.description, "No secondary keywords set.");

        let result = secondary_keywords("sun", &matchers(&["sun", ""]), &Thresholds::default());
        assert!(result.description.starts_with("1 of 1"));
    }

    #[test]
    fn link_tiers() {
        let main = KeywordMatcher::new("garden");
        let secondary = matchers(&["soil"]);

        let doc = Document::parse(r#"<a href="/a">garden tools</a><a href="/b">soil guide</a>"#);
        assert_eq!(keyword_links(&doc, &main, &secondary).status, CheckStatus::Success);

        let doc = Document::parse(
            r#"<a href="/a">garden</a><a href="/b">here</a><a href="/c">more</a><a href="/d">this</a>"#,
        );
        let result = keyword_links(&doc, &main, &secondary);
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.detail.as_deref().is_some_and(|d| d.contains("a few more")));

        let doc = Document::parse(r#"<a href="/a">click here</a>"#);
        let result = keyword_links(&doc, &main, &secondary);
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(result.detail.as_deref().is_some_and(|d| d.contains("generic")));
    }

    #[test]
    fn no_links_is_a_warning() {
        let doc = Document::parse("<p>No links here.</p>");
        let result = keyword_links(&doc, &KeywordMatcher::new("garden"), &[]);
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.description, "No links found.");
    }
}
