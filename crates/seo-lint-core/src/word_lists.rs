//! Curated word lists for keyword mining.
//!
//! Persian and English stop words, connectors, filler words, and the topical
//! SEO vocabulary used to score keyword candidates. Lookups go through the
//! normalized forms, so callers pass normalized words.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::normalize::normalize;

/// Persian function words, pronouns, and small numerals.
const PERSIAN_STOP_WORDS: &[&str] = &[
    "از", "در", "به", "با", "برای", "که", "این", "آن", "را", "است", "بود", "خواهد", "بوده",
    "شده", "می", "نمی", "باید", "نباید", "هم", "همه", "هر", "هیچ", "چند", "چقدر", "چگونه",
    "کجا", "کی", "من", "تو", "او", "ما", "شما", "آنها", "خود", "خودش", "خودت", "یک", "دو",
    "سه", "چهار", "پنج", "شش", "هفت", "هشت", "نه", "ده", "همچنین", "لذا", "بنابراین", "رو",
    "کلمات", "کلمه",
];

/// English function words and pronouns.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "this", "that", "these", "those", "i", "you", "he", "she", "it",
    "we", "they", "can", "cannot", "may", "might", "must", "here", "there", "where", "when",
    "why", "how", "what", "who", "which",
];

/// Prepositions that leave a phrase dangling when they sit at either end.
const CONNECTORS: &[&str] = &[
    "برای", "در", "به", "از", "با", "for", "in", "with", "to", "of", "on", "at", "by", "from",
];

/// Words that lower a candidate's quality when present.
const FILLER_WORDS: &[&str] = &["است", "بود", "خواهد", "می", "نمی", "که", "این", "آن"];

/// Auxiliaries that never start a meaningful pair.
const AUXILIARIES: &[&str] = &["است", "بود", "خواهد", "می", "نمی"];

/// Determiners that never precede "که" in a meaningful pair.
const DETERMINERS: &[&str] = &["این", "آن", "همه", "هر", "چند"];

/// Persian prepositions used in the connector-pair patterns.
const PERSIAN_PREPOSITIONS: &[&str] = &["برای", "در", "به", "از", "با"];

/// Topical SEO vocabulary; a candidate containing one scores higher.
pub const TOPICAL_TERMS: &[&str] = &[
    "سئو",
    "seo",
    "بهینه",
    "بهینه‌سازی",
    "optimization",
    "گوگل",
    "google",
    "محتوا",
    "content",
    "بازاریابی",
    "marketing",
    "دیجیتال",
    "digital",
    "وب",
    "web",
    "سایت",
    "website",
    "طراحی",
    "design",
    "توسعه",
    "development",
];

/// Extra terms that, together with [`TOPICAL_TERMS`], mark a document as
/// being about keywords and SEO.
pub const COOCCURRENCE_TERMS: &[&str] = &[
    "کلمات", "keywords", "کلیدی", "key", "مهم", "important", "اصلی", "main",
];

fn normalized_set(lists: &[&[&str]]) -> HashSet<String> {
    lists
        .iter()
        .flat_map(|list| list.iter())
        .map(|word| normalize(word))
        .collect()
}

static STOP_WORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| normalized_set(&[PERSIAN_STOP_WORDS, ENGLISH_STOP_WORDS]));

static CONNECTOR_SET: LazyLock<HashSet<String>> = LazyLock::new(|| normalized_set(&[CONNECTORS]));

static FILLER_SET: LazyLock<HashSet<String>> = LazyLock::new(|| normalized_set(&[FILLER_WORDS]));

/// Whether `word` is a Persian or English stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Whether `word` is a pure connector (preposition).
pub fn is_connector(word: &str) -> bool {
    CONNECTOR_SET.contains(word)
}

/// Whether `word` is a filler word.
pub fn is_filler(word: &str) -> bool {
    FILLER_SET.contains(word)
}

/// Whether two adjacent words form a connector pair that carries no meaning
/// on its own ("است که", "در این", "می باشد", ...).
pub fn is_connector_pair(first: &str, second: &str) -> bool {
    let aux = AUXILIARIES.contains(&first);
    let det = DETERMINERS.contains(&first);
    let prep = PERSIAN_PREPOSITIONS.contains(&first);

    (aux && (second == "که" || PERSIAN_PREPOSITIONS.contains(&second)))
        || (matches!(first, "می" | "نمی") && second == "باشد")
        || (det && second == "که")
        || (prep && matches!(second, "که" | "این" | "آن" | "همه" | "هر"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_cover_both_languages() {
        assert!(is_stop_word("برای"));
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("سئو"));
        assert!(!is_stop_word("garden"));
    }

    #[test]
    fn connectors() {
        assert!(is_connector("در"));
        assert!(is_connector("for"));
        assert!(!is_connector("که"));
    }

    #[test]
    fn fillers() {
        assert!(is_filler("است"));
        assert!(!is_filler("سئو"));
    }

    #[test]
    fn connector_pairs() {
        assert!(is_connector_pair("است", "که"));
        assert!(is_connector_pair("می", "باشد"));
        assert!(is_connector_pair("در", "این"));
        assert!(is_connector_pair("هر", "که"));
        assert!(!is_connector_pair("سئو", "سایت"));
        assert!(!is_connector_pair("در", "سئو"));
    }

    #[test]
    fn vocabularies_are_normalized_at_lookup() {
        let terms: Vec<String> = TOPICAL_TERMS.iter().map(|t| normalize(t)).collect();
        assert!(terms.contains(&"بهینه سازی".to_string()));
        assert_eq!(COOCCURRENCE_TERMS.len(), 8);
    }
}
