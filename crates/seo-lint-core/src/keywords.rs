//! Keyword candidate mining.
//!
//! Counts every bigram and trigram of the document's words, drops phrases
//! that cannot stand alone as keywords, repairs phrases that dangle on a
//! preposition, then scores and ranks the survivors:
//!
//! - **quality** rates the phrase itself (length, frequency, topical
//!   vocabulary, absence of filler words)
//! - **relevance** rates its role in this document (headings, paragraph
//!   openings, density, topical context)
//!
//! The same ranking feeds the cold-start suggestions and the two detection
//! advisories.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::html::Document;
use crate::matcher::is_bounded;
use crate::normalize::{is_arabic_script, normalize};
use crate::text::{extract_words, leading_words, percentage, split_sentences};
use crate::word_lists::{
    COOCCURRENCE_TERMS, TOPICAL_TERMS, is_connector, is_connector_pair, is_filler, is_stop_word,
};

/// Minimum quality for a main keyword suggestion.
const MAIN_MIN_QUALITY: u32 = 6;
/// Minimum relevance for a main keyword suggestion.
const MAIN_MIN_RELEVANCE: u32 = 4;
/// Minimum quality for a secondary keyword suggestion.
const SECONDARY_MIN_QUALITY: u32 = 4;
/// Minimum relevance for a secondary keyword suggestion.
const SECONDARY_MIN_RELEVANCE: u32 = 2;

/// How many leading words of a paragraph count as its opening.
const PARAGRAPH_LEAD_WORDS: usize = 5;

/// Topical vocabulary scanner, for the quality bonus.
static TOPICAL: LazyLock<AhoCorasick> = LazyLock::new(|| vocabulary(&[TOPICAL_TERMS]));

/// Topical plus co-occurrence vocabulary, for the relevance bonus.
static CONTEXT: LazyLock<AhoCorasick> =
    LazyLock::new(|| vocabulary(&[TOPICAL_TERMS, COOCCURRENCE_TERMS]));

fn vocabulary(lists: &[&[&str]]) -> AhoCorasick {
    let terms: Vec<String> = lists
        .iter()
        .flat_map(|list| list.iter())
        .map(|term| normalize(term))
        .collect();
    AhoCorasick::new(terms).expect("valid vocabulary")
}

/// Whether normalized `text` contains any vocabulary term as a whole word.
fn mentions_any(vocabulary: &AhoCorasick, text: &str) -> bool {
    vocabulary
        .find_overlapping_iter(text)
        .any(|m| is_bounded(text, m.start(), m.end()))
}

/// Number of words in a candidate phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PhraseKind {
    /// A bigram.
    TwoWord,
    /// A trigram.
    ThreeWord,
}

impl PhraseKind {
    const fn from_len(words: usize) -> Option<Self> {
        match words {
            2 => Some(Self::TwoWord),
            3 => Some(Self::ThreeWord),
            _ => None,
        }
    }

    /// Returns the kind as a string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TwoWord => "two-word",
            Self::ThreeWord => "three-word",
        }
    }
}

/// A ranked keyword suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordCandidate {
    /// The normalized phrase.
    pub keyword: String,
    /// How often the phrase occurs in the body text.
    pub frequency: usize,
    /// Intrinsic desirability of the phrase.
    pub quality: u32,
    /// Importance of the phrase within this document.
    pub relevance: u32,
    /// Bigram or trigram.
    #[serde(rename = "type")]
    pub kind: PhraseKind,
}

/// Suggest up to `max` keyword phrases for a document.
#[tracing::instrument(skip_all, fields(max = max))]
pub fn suggest_keywords(document: &Document, max: usize) -> Vec<KeywordCandidate> {
    let mut candidates = rank_candidates(document);
    candidates.truncate(max);
    candidates
}

/// Every candidate phrase in the document, ranked best first.
///
/// Mine once and hand the result to [`pick_main_keywords`] and
/// [`pick_secondary_keywords`] when both advisories are needed.
pub fn rank_candidates(document: &Document) -> Vec<KeywordCandidate> {
    let words = extract_words(&document.plain_text);
    let phrases: Vec<(String, usize)> = count_phrases(&words)
        .into_iter()
        .filter(|(phrase, frequency)| {
            *frequency > 1 && phrase.chars().count() >= 3 && is_standalone_phrase(phrase)
        })
        .collect();
    let phrases = repair_dangling(phrases, &document.plain_text);

    let scorer = RelevanceScorer::new(document, words.len(), &phrases);
    let mut candidates: Vec<KeywordCandidate> = phrases
        .into_iter()
        .enumerate()
        .filter_map(|(slot, (phrase, frequency))| {
            let kind = PhraseKind::from_len(phrase.split(' ').count())?;
            Some(KeywordCandidate {
                quality: quality(&phrase, kind, frequency),
                relevance: scorer.relevance(slot, kind),
                keyword: phrase,
                frequency,
                kind,
            })
        })
        .collect();

    rank(&mut candidates);
    tracing::debug!(
        total_words = words.len(),
        candidates = candidates.len(),
        "keyword candidates mined"
    );
    candidates
}

/// Strong candidates for the main keyword.
pub fn detect_main_keywords(document: &Document, max: usize) -> Vec<KeywordCandidate> {
    pick_main_keywords(&rank_candidates(document), max)
}

/// Looser candidates for secondary keywords.
pub fn detect_secondary_keywords(document: &Document, max: usize) -> Vec<KeywordCandidate> {
    pick_secondary_keywords(&rank_candidates(document), max)
}

/// Main keyword picks from already ranked candidates.
pub fn pick_main_keywords(ranked: &[KeywordCandidate], max: usize) -> Vec<KeywordCandidate> {
    pick(ranked, max, MAIN_MIN_QUALITY, MAIN_MIN_RELEVANCE)
}

/// Secondary keyword picks from already ranked candidates.
pub fn pick_secondary_keywords(ranked: &[KeywordCandidate], max: usize) -> Vec<KeywordCandidate> {
    pick(ranked, max, SECONDARY_MIN_QUALITY, SECONDARY_MIN_RELEVANCE)
}

/// Filter the top `2 * max` candidates, keeping at most `max`.
fn pick(
    ranked: &[KeywordCandidate],
    max: usize,
    min_quality: u32,
    min_relevance: u32,
) -> Vec<KeywordCandidate> {
    ranked
        .iter()
        .take(max.saturating_mul(2))
        .filter(|c| c.quality >= min_quality && c.relevance >= min_relevance)
        .take(max)
        .cloned()
        .collect()
}

/// Sort by quality, then frequency, both descending. Ties keep discovery order.
fn rank(candidates: &mut [KeywordCandidate]) {
    candidates.sort_by(|a, b| {
        b.quality
            .cmp(&a.quality)
            .then_with(|| b.frequency.cmp(&a.frequency))
    });
}

/// Frequencies of all bigrams, then all trigrams, in discovery order.
fn count_phrases(words: &[String]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for n in [2, 3] {
        for window in words.windows(n) {
            let phrase = window.join(" ");
            if let Some(&slot) = index.get(&phrase) {
                counts[slot].1 += 1;
            } else {
                index.insert(phrase.clone(), counts.len());
                counts.push((phrase, 1));
            }
        }
    }

    counts
}

/// Whether a word is noise: stretched letters, vowel-only strings, short
/// digit runs, or short words mixing Persian and Latin letters.
fn is_noise_word(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();

    if chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2]) {
        return true;
    }
    if len > 2 && chars.iter().all(|c| matches!(*c, 'a' | 'e' | 'i' | 'o' | 'u')) {
        return true;
    }
    if len < 4 && chars.windows(2).any(|w| w[0].is_ascii_digit() && w[1].is_ascii_digit()) {
        return true;
    }
    if len > 3 && len < 6 {
        let persian = chars.iter().any(|&c| is_arabic_script(c));
        let latin = chars.iter().any(char::is_ascii_alphabetic);
        if persian && latin {
            return true;
        }
    }
    false
}

/// Whether a phrase can stand alone, ignoring whether it dangles.
fn is_standalone_phrase(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split(' ').collect();

    if words.iter().any(|w| is_noise_word(w)) {
        return false;
    }
    if words
        .iter()
        .enumerate()
        .any(|(i, w)| words[i + 1..].contains(w))
    {
        return false;
    }
    if words.windows(2).any(|pair| is_connector_pair(pair[0], pair[1])) {
        return false;
    }
    words
        .iter()
        .any(|w| w.chars().count() > 2 && !is_stop_word(w))
}

/// Whether a phrase starts or ends with a bare connector.
fn is_dangling(phrase: &str) -> bool {
    let mut words = phrase.split(' ');
    let first = words.next().unwrap_or_default();
    let last = words.next_back().unwrap_or(first);
    is_connector(first) || is_connector(last)
}

fn is_keyword_phrase(phrase: &str) -> bool {
    is_standalone_phrase(phrase) && !is_dangling(phrase)
}

/// Replace dangling phrases with a one-word-longer phrase from the text that
/// completes them, keeping the dangling phrase's frequency.
///
/// Phrases that cannot be completed within three words are dropped, as are
/// completions that duplicate an earlier candidate.
fn repair_dangling(phrases: Vec<(String, usize)>, text: &str) -> Vec<(String, usize)> {
    if !phrases.iter().any(|(phrase, _)| is_dangling(phrase)) {
        return phrases;
    }

    let completions = completions(&phrases, text);
    let mut seen: HashSet<String> = HashSet::new();
    let mut repaired = Vec::with_capacity(phrases.len());

    for (phrase, frequency) in phrases {
        let phrase = if is_dangling(&phrase) {
            match completions.get(phrase.as_str()) {
                Some(completed) => {
                    tracing::trace!(from = %phrase, to = %completed, "completed dangling phrase");
                    completed.clone()
                }
                None => continue,
            }
        } else {
            phrase
        };
        if seen.insert(phrase.clone()) {
            repaired.push((phrase, frequency));
        }
    }

    repaired
}

/// First keyword-worthy trigram in the text that extends each dangling bigram.
///
/// A trigram `a b c` completes both `a b` and `b c`; windows never cross
/// sentence boundaries.
fn completions(phrases: &[(String, usize)], text: &str) -> HashMap<String, String> {
    let mut open: HashSet<&str> = phrases
        .iter()
        .map(|(phrase, _)| phrase.as_str())
        .filter(|phrase| is_dangling(phrase) && phrase.split(' ').count() == 2)
        .collect();
    let mut found = HashMap::new();

    for sentence in split_sentences(text) {
        if open.is_empty() {
            break;
        }
        let words = extract_words(&sentence);
        for window in words.windows(3) {
            let heads = [
                format!("{} {}", window[0], window[1]),
                format!("{} {}", window[1], window[2]),
            ];
            if !heads.iter().any(|head| open.contains(head.as_str())) {
                continue;
            }
            let trigram = window.join(" ");
            if !is_keyword_phrase(&trigram) {
                continue;
            }
            for head in heads {
                if open.remove(head.as_str()) {
                    found.insert(head, trigram.clone());
                }
            }
        }
    }

    found
}

fn quality(phrase: &str, kind: PhraseKind, frequency: usize) -> u32 {
    let mut score = match kind {
        PhraseKind::TwoWord => 3,
        PhraseKind::ThreeWord => 2,
    };
    score += match frequency {
        f if f >= 3 => 2,
        2 => 1,
        _ => 0,
    };
    if mentions_any(&TOPICAL, phrase) {
        score += 2;
    }
    if !phrase.split(' ').any(is_filler) {
        score += 1;
    }
    score
}

/// Relevance inputs for every candidate, gathered in one pass over the
/// document.
///
/// All candidate phrases go into a single automaton, so the body text,
/// headings and paragraph openings are each normalized and scanned once no
/// matter how many candidates there are.
struct RelevanceScorer {
    total_words: usize,
    occurrences: Vec<usize>,
    in_heading: Vec<bool>,
    in_lead: Vec<bool>,
    topical_context: bool,
}

impl RelevanceScorer {
    fn new(document: &Document, total_words: usize, phrases: &[(String, usize)]) -> Self {
        let body = normalize(&document.plain_text);
        let mut scorer = Self {
            total_words,
            occurrences: vec![0; phrases.len()],
            in_heading: vec![false; phrases.len()],
            in_lead: vec![false; phrases.len()],
            topical_context: mentions_any(&CONTEXT, &body),
        };
        if phrases.is_empty() {
            return scorer;
        }

        let patterns: Vec<String> = phrases.iter().map(|(phrase, _)| normalize(phrase)).collect();
        let automaton = match AhoCorasick::new(&patterns) {
            Ok(automaton) => automaton,
            Err(err) => {
                tracing::warn!(error = %err, "candidate automaton rejected, relevance limited to context");
                return scorer;
            }
        };

        for slot in whole_word_hits(&automaton, &body) {
            scorer.occurrences[slot] += 1;
        }
        for heading in &document.headings {
            for slot in whole_word_hits(&automaton, &normalize(heading)) {
                scorer.in_heading[slot] = true;
            }
        }
        for paragraph in &document.paragraphs {
            let lead = normalize(&leading_words(paragraph, PARAGRAPH_LEAD_WORDS));
            for slot in whole_word_hits(&automaton, &lead) {
                scorer.in_lead[slot] = true;
            }
        }
        scorer
    }

    fn relevance(&self, slot: usize, kind: PhraseKind) -> u32 {
        let mut score = 0;

        if self.in_heading[slot] {
            score += 3;
        }
        if self.in_lead[slot] {
            score += 2;
        }

        let phrase_words = match kind {
            PhraseKind::TwoWord => 2,
            PhraseKind::ThreeWord => 3,
        };
        let density = percentage(
            (self.occurrences[slot] * phrase_words) as f64,
            self.total_words as f64,
        );
        if density > 0.5 {
            score += 2;
        } else if density > 0.3 {
            score += 1;
        }

        if self.topical_context {
            score += 1;
        }
        score
    }
}

/// Pattern indexes of every whole-word match in normalized `text`.
fn whole_word_hits<'a>(
    automaton: &'a AhoCorasick,
    text: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    automaton
        .find_overlapping_iter(text)
        .filter(|m| is_bounded(text, m.start(), m.end()))
        .map(|m| m.pattern().as_usize())
}
