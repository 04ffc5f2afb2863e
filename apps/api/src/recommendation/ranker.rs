//! Ranking delegation: the completion model picks the most relevant assessments
//! from the gathered catalog snapshot; this module only builds the prompt and
//! repairs the answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::AssessmentDetails;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_lenient, LlmError, TextCompletion};
use crate::recommendation::prompts::RANKING_PROMPT_TEMPLATE;

/// One ranked assessment as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAssessment {
    pub url: String,
    pub adaptive_support: String,
    pub description: String,
    pub duration: i64,
    pub remote_support: String,
    pub test_type: Vec<String>,
}

pub fn build_ranking_prompt(
    query: &str,
    assessments: &[AssessmentDetails],
    k: usize,
) -> Result<String, AppError> {
    let catalog_json = serde_json::to_string(assessments)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize catalog: {e}")))?;

    Ok(RANKING_PROMPT_TEMPLATE
        .replace("{k}", &k.to_string())
        .replace("{catalog_json}", &catalog_json)
        .replace("{query}", query))
}

/// Asks the completion model for the top `k` assessments for `query`.
///
/// An unparseable answer yields no recommendations rather than an error.
pub async fn rank_assessments(
    query: &str,
    assessments: &[AssessmentDetails],
    k: usize,
    completion: &dyn TextCompletion,
) -> Result<Vec<RecommendedAssessment>, AppError> {
    if assessments.is_empty() || k == 0 {
        info!("No catalog assessments to rank");
        return Ok(Vec::new());
    }

    let prompt = build_ranking_prompt(query, assessments, k)?;
    let answer = completion
        .complete(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Ranking failed: {e}")))?;

    let parsed: Value = match parse_json_lenient(&answer) {
        Ok(value) => value,
        Err(LlmError::Parse(e)) => {
            warn!("Ranking answer is not valid JSON: {e}");
            return Ok(Vec::new());
        }
        Err(e) => return Err(AppError::Llm(format!("Ranking failed: {e}"))),
    };

    let mut recommendations = repair_recommendations(&parsed);
    recommendations.truncate(k);
    info!(count = recommendations.len(), "Ranked assessments");
    Ok(recommendations)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn repair_item(item: &Value) -> Result<RecommendedAssessment, String> {
    let object = item.as_object().ok_or("not an object")?;
    let field = |key: &str| object.get(key).ok_or_else(|| format!("missing key: {key}"));

    let duration = field("duration")?;
    let test_type = match field("test_type")? {
        Value::Array(items) => items.iter().map(as_text).collect(),
        other => vec![as_text(other)],
    };

    Ok(RecommendedAssessment {
        url: as_text(field("url")?),
        adaptive_support: as_text(field("adaptive_support")?),
        description: as_text(field("description")?),
        duration: as_integer(duration).ok_or_else(|| format!("invalid duration: {duration}"))?,
        remote_support: as_text(field("remote_support")?),
        test_type,
    })
}

/// Coerces the model's `recommended_assessments` list into well-typed items,
/// skipping any item with a missing or unusable field.
pub fn repair_recommendations(answer: &Value) -> Vec<RecommendedAssessment> {
    let Some(items) = answer
        .get("recommended_assessments")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match repair_item(item) {
            Ok(repaired) => Some(repaired),
            Err(reason) => {
                warn!("Skipping malformed assessment: {reason}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_assessment, CannedCompletion, FailingCompletion};
    use serde_json::json;

    #[test]
    fn test_repair_coerces_types() {
        let answer = json!({
            "recommended_assessments": [{
                "url": " https://catalog.example.com/view/java/ ",
                "adaptive_support": "No",
                "description": "Java test",
                "duration": "30",
                "remote_support": true,
                "test_type": "Knowledge & Skills"
            }]
        });

        let repaired = repair_recommendations(&answer);
        assert_eq!(
            repaired,
            vec![RecommendedAssessment {
                url: "https://catalog.example.com/view/java/".to_string(),
                adaptive_support: "No".to_string(),
                description: "Java test".to_string(),
                duration: 30,
                remote_support: "true".to_string(),
                test_type: vec!["Knowledge & Skills".to_string()],
            }]
        );
    }

    #[test]
    fn test_repair_skips_incomplete_items() {
        let answer = json!({
            "recommended_assessments": [
                "not an object",
                { "url": "a", "adaptive_support": "No", "description": "d",
                  "remote_support": "Yes", "test_type": [] },
                { "url": "b", "adaptive_support": "No", "description": "d", "duration": "soon",
                  "remote_support": "Yes", "test_type": [] },
                { "url": "c", "adaptive_support": "Yes", "description": "d", "duration": 12.9,
                  "remote_support": "Yes", "test_type": ["A", "P"] }
            ]
        });

        let repaired = repair_recommendations(&answer);
        assert_eq!(repaired.len(), 1);
        assert_eq!(repaired[0].url, "c");
        assert_eq!(repaired[0].duration, 12);
        assert_eq!(repaired[0].test_type, vec!["A", "P"]);
    }

    #[test]
    fn test_repair_without_list_is_empty() {
        assert!(repair_recommendations(&json!({})).is_empty());
        assert!(repair_recommendations(&json!({ "recommended_assessments": "none" })).is_empty());
    }

    #[test]
    fn test_prompt_embeds_query_limit_and_catalog() {
        let prompt = build_ranking_prompt("Java developer", &[sample_assessment("java")], 5).unwrap();
        assert!(prompt.contains("at most 5"));
        assert!(prompt.contains("\"Java developer\""));
        assert!(prompt.contains("https://catalog.example.com/view/java/"));
    }

    #[tokio::test]
    async fn test_rank_truncates_to_k() {
        let answer = json!({
            "recommended_assessments": (0..4).map(|i| json!({
                "url": format!("u{i}"), "adaptive_support": "No", "description": "d",
                "duration": i, "remote_support": "Yes", "test_type": ["K"]
            })).collect::<Vec<_>>()
        });
        let completion = CannedCompletion::new(&format!("```json\n{answer}\n```"));

        let ranked = rank_assessments("q", &[sample_assessment("java")], 2, &completion)
            .await
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].url, "u0");
    }

    #[tokio::test]
    async fn test_rank_skips_the_call_when_catalog_is_empty() {
        let completion = CannedCompletion::new("{}");
        let ranked = rank_assessments("q", &[], 10, &completion).await.unwrap();
        assert!(ranked.is_empty());
        assert!(completion.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_rank_tolerates_non_json_answer() {
        let completion = CannedCompletion::new("I cannot help with that.");
        let ranked = rank_assessments("q", &[sample_assessment("java")], 10, &completion)
            .await
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn test_rank_propagates_completion_failure() {
        let result = rank_assessments("q", &[sample_assessment("java")], 10, &FailingCompletion).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
