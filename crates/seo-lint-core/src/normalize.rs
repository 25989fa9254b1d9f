//! Persian/Arabic-aware text normalization.
//!
//! Every matcher in the crate compares normalized text against normalized
//! keywords, so two spellings that differ only in script variant, vowel
//! marks, joiners, spacing, or letter case compare equal.

/// Zero-width non-joiner (Persian half-space).
const ZWNJ: char = '\u{200C}';

/// Zero-width joiner.
const ZWJ: char = '\u{200D}';

/// Map Arabic-style letter variants onto their Persian equivalents.
const fn canonical_letter(c: char) -> char {
    match c {
        // ARABIC LETTER YEH, ALEF MAKSURA -> FARSI YEH
        '\u{064A}' | '\u{0649}' => '\u{06CC}',
        // ARABIC LETTER KAF -> KEHEH
        '\u{0643}' => '\u{06A9}',
        // ARABIC LETTER AE -> ALEF
        '\u{06D5}' => '\u{0627}',
        other => other,
    }
}

/// Whether `c` is a vowel sign, Quranic annotation, or other combining mark
/// that carries no lexical weight for matching.
pub const fn is_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}'
    )
}

/// Whether `c` belongs to one of the Arabic-script Unicode blocks.
pub const fn is_arabic_script(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}

/// Normalize text for matching.
///
/// - Arabic YEH/ALEF MAKSURA become Persian YEH, Arabic KAF becomes KEHEH
/// - diacritics are removed
/// - ZWNJ, ZWJ and whitespace runs collapse to one ASCII space; ends are trimmed
/// - the result is lower-cased
///
/// `normalize(&normalize(s)) == normalize(s)` for every input.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() || c == ZWNJ || c == ZWJ {
            pending_space = !out.is_empty();
            continue;
        }
        if is_diacritic(c) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        for lower in canonical_letter(c).to_lowercase() {
            out.push(lower);
        }
    }

    out
}

/// Render source text for display in check details.
///
/// Unlike [`normalize`], the Persian half-space (ZWNJ) is preserved so
/// detail strings read naturally in RTL hosts; ZWJ is dropped and inner
/// whitespace runs collapse.
pub fn display_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(ZWJ, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_variants_become_persian() {
        assert_eq!(normalize("علي"), "علی");
        assert_eq!(normalize("كتاب"), "کتاب");
        assert_eq!(normalize("مستشفى"), "مستشفی");
    }

    #[test]
    fn diacritics_are_removed() {
        assert_eq!(normalize("كَتَبَ"), "کتب");
        assert_eq!(normalize("مُحَمَّد"), "محمد");
    }

    #[test]
    fn joiners_and_whitespace_collapse() {
        assert_eq!(normalize("  می\u{200C}خواهم   بروم \n"), "می خواهم بروم");
        assert_eq!(normalize("a\u{200D}b"), "a b");
        assert_eq!(normalize("\u{200C}x"), "x");
    }

    #[test]
    fn lower_cases_latin() {
        assert_eq!(normalize("Gardening TIPS"), "gardening tips");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \u{200C} \t"), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for sample in [
            "  Hello,   World!  ",
            "سئو\u{200C}سازی محتوای  وب‌سایت",
            "كَيفَ حالُكَ يا علي",
            "İstanbul ΣΟΦΙΑ",
            "\u{0670}\u{064B}",
            "mixed ‌ zwnj ‍ zwj",
        ] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn script_detection() {
        assert!(is_arabic_script('س'));
        assert!(is_arabic_script('ی'));
        assert!(!is_arabic_script('a'));
    }

    #[test]
    fn display_keeps_half_space() {
        assert_eq!(display_text("  می\u{200C}خواهم "), "می\u{200C}خواهم");
    }
}
