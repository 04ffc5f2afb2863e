//! Response parser: turns a model's free-text "Label: value" answer into a `FilterRecord`.
//!
//! Total over arbitrary input: lines it cannot interpret are skipped, and text
//! with no recognisable labels produces an empty record.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::filters::normalizer::{is_sentinel, NormalizationMode};
use crate::filters::record::{FilterField, FilterRecord};
use crate::filters::vocabulary::CatalogVocabulary;

static BULLET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\-\*•–—\u{2022}\s]+").unwrap());
static NUMBERED_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());
static NUMBERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s*(.*)").unwrap());
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\s*-\s*\d+)?\s*min").unwrap());

const KEYWORDS_LABEL: &str = "keywords";
const DURATION_LABEL: &str = "duration";

fn strip_quotes(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '"' | '\''))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Removes list bullets and stray backslashes from a raw line.
fn clean_line(line: &str) -> String {
    let unbulleted = BULLET_PREFIX_RE.replace(line, "");
    unbulleted.trim().replace('\\', "")
}

/// "30-45 min" → "30 minutes"; anything without a minute count is kept as-is.
fn parse_duration(value: &str) -> String {
    match DURATION_RE.captures(&value.to_lowercase()) {
        Some(caps) => format!("{} minutes", &caps[1]),
        None => strip_quotes(value),
    }
}

/// Parses raw completion text into a filter record. `mode` decides whether
/// enumerated answers outside the vocabulary are kept.
pub fn parse_filters(
    raw: &str,
    vocabulary: &CatalogVocabulary,
    mode: NormalizationMode,
) -> FilterRecord {
    let mut record = FilterRecord::default();
    let mut current_section: Option<String> = None;
    let mut keywords: Vec<String> = Vec::new();

    for line in raw.trim().lines() {
        let line = clean_line(line);

        if let Some((label, value)) = line.split_once(':') {
            let label = label.trim().to_lowercase();
            let value = value.trim();
            current_section = Some(label.clone());

            if value.is_empty() || is_sentinel(value) {
                continue;
            }

            if label == KEYWORDS_LABEL {
                if !NUMBERED_PREFIX_RE.is_match(value) {
                    keywords = vec![value.to_string()];
                }
            } else if let Some(field) = FilterField::from_label(&label) {
                if let Some(normalized) = mode.apply(value, vocabulary.field(field)) {
                    record.set(field, normalized);
                }
            } else if label == DURATION_LABEL {
                record.duration = Some(parse_duration(value));
            } else if label.contains("notes") || label.contains("relevant details") {
                record.notes = Some(strip_quotes(value));
            }
        } else if current_section.as_deref() == Some(KEYWORDS_LABEL) {
            if let Some(caps) = NUMBERED_ITEM_RE.captures(&line) {
                let keyword = caps[1].trim();
                if !keyword.is_empty() && !is_sentinel(keyword) {
                    keywords.push(keyword.to_string());
                }
            }
        }
    }

    if !keywords.is_empty() {
        record.keywords = Some(keywords.join(", "));
    }

    debug!(filters = ?record, "Parsed filter record from completion text");
    record
}
