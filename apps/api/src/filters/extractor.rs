//! Filter extraction: asks the completion model for labelled criteria and parses
//! its answer into a `FilterRecord`.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::filters::normalizer::NormalizationMode;
use crate::filters::parser::parse_filters;
use crate::filters::prompts::{FILTER_EXTRACTION_PROMPT_TEMPLATE, FILTER_EXTRACTION_SYSTEM};
use crate::filters::record::FilterRecord;
use crate::filters::vocabulary::{CatalogVocabulary, FieldVocabulary};
use crate::llm_client::prompts::PLAIN_TEXT_FIELDS_INSTRUCTION;
use crate::llm_client::TextCompletion;

fn option_list(field: &FieldVocabulary) -> String {
    field.canonical_names().collect::<Vec<_>>().join(", ")
}

/// Renders the extraction prompt with option lists taken from the vocabulary asset.
pub fn build_extraction_prompt(query: &str, vocabulary: &CatalogVocabulary) -> String {
    FILTER_EXTRACTION_PROMPT_TEMPLATE
        .replace("{plain_text_instruction}", PLAIN_TEXT_FIELDS_INSTRUCTION)
        .replace("{job_families}", &option_list(&vocabulary.job_family))
        .replace("{job_levels}", &option_list(&vocabulary.job_level))
        .replace("{industries}", &option_list(&vocabulary.industry))
        .replace("{languages}", &option_list(&vocabulary.language))
        // Last, so braces inside the query are never treated as placeholders.
        .replace("{query}", query)
}

/// Extracts search criteria for a job description.
///
/// An empty answer yields an empty record; a failed completion call is an error.
pub async fn extract_filters(
    query: &str,
    completion: &dyn TextCompletion,
    vocabulary: &CatalogVocabulary,
    mode: NormalizationMode,
) -> Result<FilterRecord, AppError> {
    let preview: String = query.chars().take(50).collect();
    info!(query = %preview, "Extracting filters from job description");

    let prompt = build_extraction_prompt(query, vocabulary);
    let answer = completion
        .complete(&prompt, FILTER_EXTRACTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Filter extraction failed: {e}")))?;

    if answer.trim().is_empty() {
        warn!("Completion returned an empty answer; no filters extracted");
        return Ok(FilterRecord::default());
    }

    let filters = parse_filters(&answer, vocabulary, mode);
    info!(filters = ?filters, "Extracted filters");
    Ok(filters)
}
