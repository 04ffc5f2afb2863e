//! Catalog vocabulary: the controlled vocabularies and filter identifier tables,
//! loaded from one versioned TOML asset and validated for consistency at load time.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::filters::record::FilterField;

/// The asset compiled into the binary. `CATALOG_VOCABULARY_PATH` overrides it at runtime.
const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.toml");

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed vocabulary asset: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid catalog base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("{field}: synonym '{phrase}' must be non-empty, trimmed and lowercase")]
    MalformedSynonym { field: &'static str, phrase: String },

    #[error("{field}: synonym '{phrase}' is declared more than once")]
    DuplicateSynonym { field: &'static str, phrase: String },

    #[error("{field}: identifier name '{name}' is declared more than once")]
    DuplicateIdentifierName { field: &'static str, name: String },

    #[error("{field}: identifier id {id} is used more than once")]
    DuplicateIdentifierId { field: &'static str, id: u32 },
}

/// A catalog filter option: canonical display name plus the catalog's numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterIdentifier {
    pub name: String,
    pub id: u32,
}

/// Vocabulary for one enumerated filter field.
///
/// `synonyms` keep declaration order; lookups depend on it for tie-breaking.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldVocabulary {
    pub synonyms: Vec<(String, String)>,
    pub identifiers: Vec<FilterIdentifier>,
}

impl FieldVocabulary {
    /// Resolves an already-cleaned (lowercase, trimmed) value to its canonical form.
    ///
    /// Exact phrase match wins over everything else. Failing that, the first
    /// declared phrase equal to one whitespace-delimited word of `cleaned` wins.
    pub fn lookup(&self, cleaned: &str) -> Option<&str> {
        if let Some((_, canonical)) = self.synonyms.iter().find(|(phrase, _)| phrase == cleaned) {
            return Some(canonical.as_str());
        }

        let words: Vec<&str> = cleaned.split_whitespace().collect();
        self.synonyms
            .iter()
            .find(|(phrase, _)| words.contains(&phrase.as_str()))
            .map(|(_, canonical)| canonical.as_str())
    }

    /// Catalog id for a canonical display value, if the catalog exposes it as a filter.
    pub fn identifier(&self, canonical: &str) -> Option<u32> {
        self.identifiers
            .iter()
            .find(|entry| entry.name == canonical)
            .map(|entry| entry.id)
    }

    /// Canonical option names in catalog order. Used to render prompt option lists.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(|entry| entry.name.as_str())
    }

    fn validate(&self, field: FilterField) -> Result<(), VocabularyError> {
        let label = field.param_name();

        let mut phrases = HashSet::new();
        for (phrase, _) in &self.synonyms {
            if phrase.is_empty() || phrase.trim() != phrase.as_str() || phrase.to_lowercase() != *phrase {
                return Err(VocabularyError::MalformedSynonym {
                    field: label,
                    phrase: phrase.clone(),
                });
            }
            if !phrases.insert(phrase.as_str()) {
                return Err(VocabularyError::DuplicateSynonym {
                    field: label,
                    phrase: phrase.clone(),
                });
            }
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for entry in &self.identifiers {
            if !names.insert(entry.name.as_str()) {
                return Err(VocabularyError::DuplicateIdentifierName {
                    field: label,
                    name: entry.name.clone(),
                });
            }
            if !ids.insert(entry.id) {
                return Err(VocabularyError::DuplicateIdentifierId {
                    field: label,
                    id: entry.id,
                });
            }
        }

        // Canonical values without an id are legal; they just never reach a search URL.
        let mut unmapped: Vec<&str> = self
            .synonyms
            .iter()
            .map(|(_, canonical)| canonical.as_str())
            .filter(|canonical| !names.contains(canonical))
            .collect();
        unmapped.dedup();
        if !unmapped.is_empty() {
            warn!(
                field = label,
                values = ?unmapped,
                "Canonical values have no catalog identifier and will be omitted from search URLs"
            );
        }

        Ok(())
    }
}

/// All four controlled vocabularies plus the catalog search base path.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogVocabulary {
    pub version: String,
    pub base_url: String,
    pub job_family: FieldVocabulary,
    pub job_level: FieldVocabulary,
    pub industry: FieldVocabulary,
    pub language: FieldVocabulary,
}

impl CatalogVocabulary {
    /// Loads the vocabulary compiled into the binary.
    pub fn embedded() -> Result<Self, VocabularyError> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    /// Loads and validates a vocabulary file from disk.
    pub fn from_path(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path)?;
        let vocabulary = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), version = %vocabulary.version, "Loaded catalog vocabulary from file");
        Ok(vocabulary)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, VocabularyError> {
        let vocabulary: CatalogVocabulary = toml::from_str(raw)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn field(&self, field: FilterField) -> &FieldVocabulary {
        match field {
            FilterField::JobFamily => &self.job_family,
            FilterField::JobLevel => &self.job_level,
            FilterField::Industry => &self.industry,
            FilterField::Language => &self.language,
        }
    }

    fn validate(&self) -> Result<(), VocabularyError> {
        let parsed = Url::parse(&self.base_url).map_err(|source| VocabularyError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(VocabularyError::BaseUrl {
                url: self.base_url.clone(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        for field in FilterField::ALL {
            self.field(field).validate(field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_asset(job_family: &str) -> String {
        let empty = "[{}]\nsynonyms = []\nidentifiers = []\n";
        format!(
            "version = \"test\"\nbase_url = \"https://catalog.example.com/search/\"\n\n[job_family]\n{job_family}\n{}{}{}",
            empty.replace("{}", "job_level"),
            empty.replace("{}", "industry"),
            empty.replace("{}", "language"),
        )
    }

    #[test]
    fn test_embedded_vocabulary_loads_and_validates() {
        let vocabulary = CatalogVocabulary::embedded().unwrap();
        assert_eq!(vocabulary.base_url, "https://www.shl.com/products/product-catalog/");
    }

    #[test]
    fn test_embedded_identifier_table_sizes() {
        let vocabulary = CatalogVocabulary::embedded().unwrap();
        assert_eq!(vocabulary.job_family.identifiers.len(), 7);
        assert_eq!(vocabulary.job_level.identifiers.len(), 10);
        assert_eq!(vocabulary.industry.identifiers.len(), 8);
        assert_eq!(vocabulary.language.identifiers.len(), 46);
    }

    #[test]
    fn test_lookup_prefers_exact_phrase_over_word_match() {
        let vocabulary = CatalogVocabulary::embedded().unwrap();
        // "manager" is also a declared phrase, but the exact phrase must win.
        assert_eq!(
            vocabulary.job_level.lookup("front line manager"),
            Some("Front Line Manager")
        );
    }

    #[test]
    fn test_lookup_word_match_uses_declaration_order() {
        let field = FieldVocabulary {
            synonyms: vec![
                ("gas".to_string(), "Oil & Gas".to_string()),
                ("retail".to_string(), "Retail".to_string()),
            ],
            identifiers: vec![],
        };
        assert_eq!(field.lookup("retail gas station"), Some("Oil & Gas"));
    }

    #[test]
    fn test_lookup_ignores_substrings_inside_words() {
        let vocabulary = CatalogVocabulary::embedded().unwrap();
        // "it" must not match inside "digital".
        assert_eq!(vocabulary.job_family.lookup("digital"), None);
    }

    #[test]
    fn test_identifier_resolves_canonical_names() {
        let vocabulary = CatalogVocabulary::embedded().unwrap();
        assert_eq!(vocabulary.job_family.identifier("Information Technology"), Some(5));
        assert_eq!(vocabulary.job_level.identifier("Entry-Level"), Some(2));
        assert_eq!(vocabulary.industry.identifier("Oil & Gas"), Some(6));
        assert_eq!(vocabulary.language.identifier("Vietnamese"), Some(46));
        assert_eq!(vocabulary.language.identifier("English"), None);
    }

    #[test]
    fn test_rejects_uppercase_synonym() {
        let asset = minimal_asset("synonyms = [[\"Sales\", \"Sales\"]]\nidentifiers = []");
        let err = CatalogVocabulary::from_toml_str(&asset).unwrap_err();
        assert!(matches!(err, VocabularyError::MalformedSynonym { .. }));
    }

    #[test]
    fn test_rejects_duplicate_synonym() {
        let asset = minimal_asset(
            "synonyms = [[\"sales\", \"Sales\"], [\"sales\", \"Business\"]]\nidentifiers = []",
        );
        let err = CatalogVocabulary::from_toml_str(&asset).unwrap_err();
        assert!(matches!(err, VocabularyError::DuplicateSynonym { .. }));
    }

    #[test]
    fn test_rejects_duplicate_identifier_id() {
        let asset = minimal_asset(
            "synonyms = []\nidentifiers = [{ name = \"Sales\", id = 7 }, { name = \"Business\", id = 7 }]",
        );
        let err = CatalogVocabulary::from_toml_str(&asset).unwrap_err();
        assert!(matches!(err, VocabularyError::DuplicateIdentifierId { id: 7, .. }));
    }

    #[test]
    fn test_rejects_relative_base_url() {
        let asset = minimal_asset("synonyms = []\nidentifiers = []")
            .replace("https://catalog.example.com/search/", "/search/");
        let err = CatalogVocabulary::from_toml_str(&asset).unwrap_err();
        assert!(matches!(err, VocabularyError::BaseUrl { .. }));
    }

    #[test]
    fn test_canonical_without_identifier_is_allowed() {
        let asset = minimal_asset("synonyms = [[\"sales\", \"Sales\"]]\nidentifiers = []");
        let vocabulary = CatalogVocabulary::from_toml_str(&asset).unwrap();
        assert_eq!(vocabulary.job_family.lookup("sales"), Some("Sales"));
        assert_eq!(vocabulary.job_family.identifier("Sales"), None);
    }
}
