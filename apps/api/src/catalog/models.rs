use serde::{Deserialize, Serialize};

/// Product detail page data for one catalog assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDetails {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_levels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    /// Raw "Assessment length" text as shown on the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_time: Option<String>,
    /// Minutes derived from `assessment_time`; ranges collapse to their midpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    /// "Yes" or "No".
    pub remote_testing: String,
}

fn digits(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Minutes from free-form duration text. "30-40" gives 35; text with no digits gives 0.
pub fn parse_duration_minutes(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }

    if let Some((low, high)) = text.split_once('-') {
        if !high.contains('-') {
            if let (Some(low), Some(high)) = (digits(low), digits(high)) {
                return ((u64::from(low) + u64::from(high)) / 2) as u32;
            }
        }
    }

    digits(text).unwrap_or(0)
}

/// Splits a comma-separated page value, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
