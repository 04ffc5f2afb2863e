//! Value normalizer: maps a raw model answer onto a controlled vocabulary.

use std::sync::LazyLock;

use regex::Regex;

use crate::filters::vocabulary::FieldVocabulary;

/// Answers that mean "no value". Compared against lowercased text.
pub const SENTINEL_VALUES: &[&str] = &["none", "n/a", "not specified", "unknown"];

static PARENTHETICAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

pub fn is_sentinel(value: &str) -> bool {
    let lowered = value.to_lowercase();
    SENTINEL_VALUES.contains(&lowered.as_str())
}

/// Strips quotes, brackets and parenthetical qualifiers, then trims and lowercases.
/// Returns `None` when nothing meaningful is left.
fn clean(raw: &str) -> Option<String> {
    let unquoted: String = raw
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '[' | ']'))
        .collect();
    let cleaned = PARENTHETICAL_RE
        .replace_all(&unquoted, "")
        .trim()
        .to_lowercase();

    if cleaned.is_empty() || is_sentinel(&cleaned) {
        None
    } else {
        Some(cleaned)
    }
}

/// Lenient normalization: canonical value when the vocabulary knows the answer,
/// a title-cased copy of the cleaned answer when it doesn't, empty for non-values.
pub fn normalize(raw: &str, vocabulary: &FieldVocabulary) -> String {
    let Some(cleaned) = clean(raw) else {
        return String::new();
    };

    match vocabulary.lookup(&cleaned) {
        Some(canonical) => canonical.to_string(),
        None => title_case(&cleaned),
    }
}

/// Strict normalization: only vocabulary members come back.
pub fn normalize_strict(raw: &str, vocabulary: &FieldVocabulary) -> Option<String> {
    let cleaned = clean(raw)?;
    vocabulary.lookup(&cleaned).map(str::to_string)
}

/// How answers outside the vocabulary are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Unknown answers survive, title-cased.
    #[default]
    Lenient,
    /// Unknown answers are dropped.
    Strict,
}

impl NormalizationMode {
    /// Normalized value, or `None` when nothing should be stored.
    pub fn apply(self, raw: &str, vocabulary: &FieldVocabulary) -> Option<String> {
        match self {
            NormalizationMode::Lenient => Some(normalize(raw, vocabulary)).filter(|v| !v.is_empty()),
            NormalizationMode::Strict => normalize_strict(raw, vocabulary),
        }
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Any non-letter starts a new word, so "entry-level" becomes "Entry-Level".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
