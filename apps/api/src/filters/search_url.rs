//! Catalog search URL construction. One URL per keyword; every URL carries the
//! same enumerated filters.

use url::form_urlencoded::byte_serialize;

use crate::filters::record::{FilterField, FilterRecord};
use crate::filters::vocabulary::CatalogVocabulary;

/// Marker the catalog's search form submits alongside a keyword.
const SUBMIT_SEARCH_PARAM: &str = "action_doFilteringForm=Search";
/// Resets pagination to the first result page.
const PAGINATION_PARAM: &str = "f=1";

/// Builds the catalog search URLs for a filter record.
///
/// N keyword segments yield N URLs in segment order, blank segments included;
/// no keywords yields one URL.
pub fn build_search_urls(filters: &FilterRecord, vocabulary: &CatalogVocabulary) -> Vec<String> {
    let keywords = filters.keyword_list();

    if keywords.is_empty() {
        return vec![build_single_search_url(filters, None, vocabulary)];
    }

    keywords
        .into_iter()
        .map(|keyword| build_single_search_url(filters, Some(keyword), vocabulary))
        .collect()
}

/// Builds one URL. Enumerated values without a catalog id are left out.
pub fn build_single_search_url(
    filters: &FilterRecord,
    keyword: Option<&str>,
    vocabulary: &CatalogVocabulary,
) -> String {
    let mut params: Vec<String> = Vec::new();

    if let Some(keyword) = keyword.filter(|k| !k.is_empty()) {
        // Form encoding: spaces become '+', reserved characters such as '#' and '&' are escaped.
        let encoded: String = byte_serialize(keyword.as_bytes()).collect();
        params.push(format!("keyword={encoded}"));
        params.push(SUBMIT_SEARCH_PARAM.to_string());
    }

    for field in FilterField::ALL {
        let Some(value) = filters.get(field).filter(|v| !v.is_empty()) else {
            continue;
        };
        if let Some(id) = vocabulary.field(field).identifier(value) {
            params.push(format!("{}={id}", field.param_name()));
        }
    }

    params.push(PAGINATION_PARAM.to_string());

    format!("{}?{}", vocabulary.base_url, params.join("&"))
}
