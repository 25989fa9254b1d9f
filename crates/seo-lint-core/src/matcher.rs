//! Whole-word keyword matching over normalized text.
//!
//! Both the haystack and the keyword go through [`normalize`] first, so a
//! match ignores letter case, Arabic/Persian letter variants, diacritics and
//! half-spaces. A match only counts when the characters on either side are
//! not letters or digits (or are the string edges).

use regex::{Regex, RegexBuilder};

use crate::normalize::normalize;

/// Compiled-size ceiling for keyword patterns.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A normalized keyword ready to be matched against many texts.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Option<Regex>,
}

impl KeywordMatcher {
    /// Prepare a matcher for `keyword`.
    pub fn new(keyword: &str) -> Self {
        Self::with_size_limit(keyword, PATTERN_SIZE_LIMIT)
    }

    fn with_size_limit(keyword: &str, size_limit: usize) -> Self {
        let keyword = normalize(keyword);
        if keyword.is_empty() {
            return Self {
                keyword,
                pattern: None,
            };
        }

        let pattern = match RegexBuilder::new(&regex::escape(&keyword))
            .size_limit(size_limit)
            .build()
        {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::warn!(
                    keyword = %keyword,
                    error = %err,
                    "keyword pattern rejected, using substring search"
                );
                None
            }
        };

        Self { keyword, pattern }
    }

    /// The normalized keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Whether the keyword normalized to nothing.
    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty()
    }

    /// Byte offsets of every whole-word occurrence in `normalize(text)`.
    pub fn find_in(&self, text: &str) -> Vec<usize> {
        if self.is_empty() {
            return Vec::new();
        }
        let haystack = normalize(text);
        let mut positions = Vec::new();
        let mut start = 0;

        while start < haystack.len() {
            let Some((begin, end)) = self.next_candidate(&haystack, start) else {
                break;
            };
            if is_bounded(&haystack, begin, end) {
                positions.push(begin);
                start = end.max(begin + 1);
            } else {
                // Step over one character so the scan always makes progress.
                start = begin + haystack[begin..].chars().next().map_or(1, char::len_utf8);
            }
        }

        positions
    }

    /// Number of whole-word occurrences in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        self.find_in(text).len()
    }

    /// Whether `text` holds at least one whole-word occurrence.
    pub fn is_found_in(&self, text: &str) -> bool {
        self.count_in(text) > 0
    }

    fn next_candidate(&self, haystack: &str, start: usize) -> Option<(usize, usize)> {
        match &self.pattern {
            Some(pattern) => pattern
                .find_at(haystack, start)
                .map(|m| (m.start(), m.end())),
            None => haystack[start..]
                .find(self.keyword.as_str())
                .map(|offset| (start + offset, start + offset + self.keyword.len())),
        }
    }
}

/// Whether the span `begin..end` sits between non-alphanumeric neighbours.
pub(crate) fn is_bounded(haystack: &str, begin: usize, end: usize) -> bool {
    let before = haystack[..begin].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Byte offsets of whole-word occurrences of `keyword` in normalized `text`.
pub fn find_occurrences(text: &str, keyword: &str) -> Vec<usize> {
    KeywordMatcher::new(keyword).find_in(text)
}

/// Number of whole-word occurrences of `keyword` in `text`.
pub fn count(text: &str, keyword: &str) -> usize {
    KeywordMatcher::new(keyword).count_in(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_only() {
        assert_eq!(count("category theory", "cat"), 0);
        assert_eq!(count("the cat sat", "cat"), 1);
        assert_eq!(count("cat, cat. CAT!", "cat"), 3);
        assert_eq!(count("bobcat concat", "cat"), 0);
    }

    #[test]
    fn skips_embedded_then_finds_later_match() {
        assert_eq!(find_occurrences("cats cat", "cat"), vec![5]);
    }

    #[test]
    fn phrase_matching() {
        let text = "Gardening tips: the best gardening   tips for spring.";
        assert_eq!(count(text, "gardening tips"), 2);
        assert_eq!(count(text, "tips for spring"), 1);
    }

    #[test]
    fn persian_script_variants_match() {
        assert_eq!(count("كتاب خوب", "کتاب"), 1);
        assert_eq!(count("مُحَمَّد آمد", "محمد"), 1);
        assert_eq!(count("آموزش سئو سایت", "سئو"), 1);
        assert_eq!(count("سئوکار حرفه ای", "سئو"), 0);
    }

    #[test]
    fn half_space_is_a_word_gap() {
        assert_eq!(count("طراحی وب‌سایت حرفه‌ای", "وب سایت"), 1);
        assert_eq!(count("طراحی وب‌سایت حرفه‌ای", "وب‌سایت"), 1);
    }

    #[test]
    fn empty_keyword_matches_nothing() {
        assert_eq!(count("anything at all", ""), 0);
        assert_eq!(count("anything at all", "  \u{200C} "), 0);
        assert!(KeywordMatcher::new("").is_empty());
    }

    #[test]
    fn special_characters_are_literal() {
        assert_eq!(count("learn c++ today", "c++"), 1);
        assert_eq!(count("price (usd) list", "(usd)"), 1);
        assert_eq!(count("axb a.b", "a.b"), 1);
    }

    #[test]
    fn overlapping_occurrences_are_not_double_counted() {
        assert_eq!(count("aa aa aa", "aa aa"), 1);
    }

    #[test]
    fn substring_fallback_agrees_with_pattern_search() {
        let text = "the cat sat on the category of cats near a cat";
        let fallback = KeywordMatcher::with_size_limit("cat", 1);
        let regular = KeywordMatcher::new("cat");
        assert_eq!(fallback.find_in(text), regular.find_in(text));
        assert_eq!(fallback.count_in(text), 2);
    }

    #[test]
    fn offsets_point_into_normalized_text() {
        let positions = find_occurrences("  The  CAT", "cat");
        assert_eq!(positions, vec![4]);
    }

    #[test]
    fn matcher_is_reusable() {
        let matcher = KeywordMatcher::new("Garden");
        assert_eq!(matcher.keyword(), "garden");
        assert!(matcher.is_found_in("my garden"));
        assert!(!matcher.is_found_in("gardens only"));
    }
}
