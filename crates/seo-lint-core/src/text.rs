//! Text processing utilities.
//!
//! Provides word extraction, sentence splitting, and n-gram generation for
//! use by the checks and the keyword miner. Every function here works on
//! normalized text so counts agree with the keyword matcher.

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::{is_arabic_script, normalize};

/// Sentence terminators (Latin, Arabic question mark, Urdu full stop)
/// followed by whitespace.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?\u{061F}\u{06D4}]\s+").expect("valid regex"));

/// Whether `c` can be part of a counted word.
///
/// Latin (ASCII, Latin-1, Latin Extended-A/B) and Arabic-script letters and
/// digits count; everything else separates words.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
        && (c.is_ascii() || is_arabic_script(c) || ('\u{00C0}'..='\u{024F}').contains(&c))
}

/// Extract normalized words from text.
///
/// Punctuation and unsupported scripts split words. Single-character tokens
/// and pure numbers (including Persian/Arabic-Indic digits) are dropped.
pub fn extract_words(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !is_word_char(c))
        .filter(|w| w.chars().count() > 1)
        .filter(|w| !w.chars().all(char::is_numeric))
        .map(str::to_string)
        .collect()
}

/// Count words using the same rules as [`extract_words`].
pub fn count_words(text: &str) -> usize {
    extract_words(text).len()
}

/// Split text into sentences on terminal punctuation followed by whitespace.
///
/// Empty fragments are discarded. The terminator of each sentence except the
/// last is consumed by the split.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join every window of `n` consecutive words into a phrase.
pub fn ngrams(words: &[String], n: usize) -> Vec<String> {
    if n == 0 || words.len() < n {
        return Vec::new();
    }
    words.windows(n).map(|window| window.join(" ")).collect()
}

/// The first `n` normalized words of `text`, space-joined.
pub fn leading_words(text: &str, n: usize) -> String {
    extract_words(text)
        .into_iter()
        .take(n)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Percentage helper: `part / whole * 100`, or 0 when `whole` is 0.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("This is a sentence. This is another sentence.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "This is a sentence");
        assert_eq!(sentences[1], "This is another sentence.");
    }

    #[test]
    fn persian_question_mark_splits() {
        let sentences = split_sentences("سئو چیست؟ سئو بهینه سازی است. پایان");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = split_sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn decimal_without_space_not_split() {
        let sentences = split_sentences("The price is 3.14 dollars. That's cheap.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
        assert!(extract_words("").is_empty());
        assert_eq!(count_words("  "), 0);
    }

    #[test]
    fn extract_words_basic() {
        let words = extract_words("Hello, world! This is a test.");
        assert_eq!(words, vec!["hello", "world", "this", "is", "test"]);
    }

    #[test]
    fn extract_words_drops_numbers_and_single_chars() {
        let words = extract_words("In 2024 we planted 12 x trees ۱۴۰۳");
        assert_eq!(words, vec!["in", "we", "planted", "trees"]);
    }

    #[test]
    fn extract_words_persian() {
        let words = extract_words("آموزش سئو، برای وب‌سایت‌ها!");
        assert_eq!(words, vec!["آموزش", "سئو", "برای", "وب", "سایت", "ها"]);
    }

    #[test]
    fn ngrams_windows() {
        let words: Vec<String> = ["a1", "b2", "c3"].iter().map(|w| (*w).to_string()).collect();
        assert_eq!(ngrams(&words, 2), vec!["a1 b2", "b2 c3"]);
        assert_eq!(ngrams(&words, 3), vec!["a1 b2 c3"]);
        assert!(ngrams(&words, 4).is_empty());
        assert!(ngrams(&words, 0).is_empty());
    }

    #[test]
    fn leading_words_takes_prefix() {
        assert_eq!(
            leading_words("Garden tips for every season and more", 5),
            "garden tips for every season"
        );
    }

    #[test]
    fn percentage_zero_denominator() {
        assert_eq!(percentage(3.0, 0.0), 0.0);
        assert!((percentage(1.0, 4.0) - 25.0).abs() < f64::EPSILON);
    }
}
