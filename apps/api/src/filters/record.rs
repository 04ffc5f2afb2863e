//! The filter record: structured search criteria extracted from a job description.

use serde::{Deserialize, Serialize};

/// One of the four enumerated catalog filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    JobFamily,
    JobLevel,
    Industry,
    Language,
}

impl FilterField {
    /// Order in which filters are emitted as search URL parameters.
    pub const ALL: [FilterField; 4] = [
        FilterField::JobFamily,
        FilterField::JobLevel,
        FilterField::Industry,
        FilterField::Language,
    ];

    /// Query-string parameter name used by the catalog search form.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterField::JobFamily => "job_family",
            FilterField::JobLevel => "job_level",
            FilterField::Industry => "industry",
            FilterField::Language => "language",
        }
    }

    /// Section label as it appears (lowercased) in model output.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::JobFamily => "job family",
            FilterField::JobLevel => "job level",
            FilterField::Industry => "industry",
            FilterField::Language => "language",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.label() == label)
    }
}

/// Canonical search criteria. Absent fields are omitted when serialized.
///
/// Enumerated fields normally hold a canonical vocabulary value, but may hold a
/// title-cased fallback when the model answered with something unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRecord {
    /// Comma-joined keyword list, in the order the keywords were encountered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// "<N> minutes" when a minute count was recognised, otherwise the raw answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FilterRecord {
    /// True when no criteria at all could be derived.
    pub fn is_empty(&self) -> bool {
        self == &FilterRecord::default()
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::JobFamily => self.job_family.as_deref(),
            FilterField::JobLevel => self.job_level.as_deref(),
            FilterField::Industry => self.industry.as_deref(),
            FilterField::Language => self.language.as_deref(),
        }
    }

    pub fn set(&mut self, field: FilterField, value: String) {
        let slot = match field {
            FilterField::JobFamily => &mut self.job_family,
            FilterField::JobLevel => &mut self.job_level,
            FilterField::Industry => &mut self.industry,
            FilterField::Language => &mut self.language,
        };
        *slot = Some(value);
    }

    /// Comma-separated keyword segments, trimmed. Blank segments are kept so
    /// each one still yields its own search; an absent or blank field yields none.
    pub fn keyword_list(&self) -> Vec<&str> {
        match self.keywords.as_deref() {
            Some(joined) if !joined.trim().is_empty() => joined.split(',').map(str::trim).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        assert!(FilterRecord::default().is_empty());
    }

    #[test]
    fn test_record_with_notes_only_is_not_empty() {
        let record = FilterRecord {
            notes: Some("Remote".to_string()),
            ..Default::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn test_keyword_list_trims_and_keeps_blank_segments() {
        let record = FilterRecord {
            keywords: Some(" Python ,SQL,, ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.keyword_list(), vec!["Python", "SQL", "", ""]);

        let blank = FilterRecord {
            keywords: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.keyword_list().is_empty());
    }

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let record = FilterRecord {
            job_family: Some("Sales".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "job_family": "Sales" }));
    }

    #[test]
    fn test_from_label_round_trips_every_field() {
        for field in FilterField::ALL {
            assert_eq!(FilterField::from_label(field.label()), Some(field));
        }
        assert_eq!(FilterField::from_label("duration"), None);
    }
}
