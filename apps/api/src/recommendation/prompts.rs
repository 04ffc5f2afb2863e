// Prompt constants for ranking delegation.

/// Ranking prompt template.
/// Replace: {k}, {query}, {catalog_json}
pub const RANKING_PROMPT_TEMPLATE: &str = r#"Understand the context of the user's job description or query first, then pick from the assessment catalog below at most {k} of the most relevant assessments, most relevant first.

Return a JSON object with this EXACT schema:
{
  "recommended_assessments": [
    {
      "url": "catalog url of the assessment",
      "adaptive_support": "Yes" or "No",
      "description": "...",
      "duration": integer minutes,
      "remote_support": "Yes" or "No",
      "test_type": ["list", "of", "strings"]
    }
  ]
}

Only recommend assessments that appear in the catalog, using their exact urls.

INPUT QUERY:
"{query}"

ASSESSMENT CATALOG:
{catalog_json}"#;
