//! Flat JSON snapshot of the assessments gathered for a request.

use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::catalog::models::AssessmentDetails;
use crate::catalog::CatalogError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub captured_at: DateTime<Utc>,
    /// Version of the vocabulary asset the search URLs were built from.
    pub vocabulary_version: String,
    pub search_urls: Vec<String>,
    pub assessments: Vec<AssessmentDetails>,
}

/// Writes the snapshot as pretty JSON. The file is replaced atomically, so a
/// reader never observes a half-written snapshot.
pub fn save_snapshot(path: &Path, snapshot: &CatalogSnapshot) -> Result<(), CatalogError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
    }
    file.persist(path).map_err(|e| CatalogError::Io(e.error))?;

    info!(
        "Saved {} assessments to {}",
        snapshot.assessments.len(),
        path.display()
    );
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<CatalogSnapshot, CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Reports the snapshot left by a previous run, if one is readable at `path`.
/// A snapshot built from another vocabulary version is flagged, since its
/// search URLs may carry stale filter ids.
pub fn inspect_previous_snapshot(path: &Path, vocabulary_version: &str) -> Option<CatalogSnapshot> {
    if !path.exists() {
        return None;
    }

    match load_snapshot(path) {
        Ok(snapshot) => {
            info!(
                captured_at = %snapshot.captured_at,
                assessments = snapshot.assessments.len(),
                "Found previous catalog snapshot at {}",
                path.display()
            );
            if snapshot.vocabulary_version != vocabulary_version {
                warn!(
                    snapshot_version = %snapshot.vocabulary_version,
                    current_version = %vocabulary_version,
                    "Previous snapshot was built from a different vocabulary version"
                );
            }
            Some(snapshot)
        }
        Err(e) => {
            warn!("Ignoring unreadable snapshot at {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            captured_at: Utc::now(),
            vocabulary_version: "test".to_string(),
            search_urls: vec!["https://catalog.example.com/?keyword=Java&f=1".to_string()],
            assessments: vec![AssessmentDetails {
                url: "https://catalog.example.com/view/java/".to_string(),
                description: Some("Java knowledge test".to_string()),
                languages: vec!["English (USA)".to_string()],
                duration_minutes: Some(18),
                remote_testing: "Yes".to_string(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_saved_snapshot_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assessments.json");
        let snapshot = sample_snapshot();

        save_snapshot(&path, &snapshot).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(loaded.vocabulary_version, "test");
        assert_eq!(loaded.search_urls, snapshot.search_urls);
        assert_eq!(loaded.assessments, snapshot.assessments);
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assessments.json");
        std::fs::write(&path, "stale").unwrap();

        let mut snapshot = sample_snapshot();
        snapshot.assessments.clear();
        save_snapshot(&path, &snapshot).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert!(loaded.assessments.is_empty());
    }

    #[test]
    fn test_inspect_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assessments.json");
        assert!(inspect_previous_snapshot(&path, "test").is_none());

        save_snapshot(&path, &sample_snapshot()).unwrap();
        let previous = inspect_previous_snapshot(&path, "other-version").unwrap();
        assert_eq!(previous.assessments.len(), 1);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(inspect_previous_snapshot(&path, "test").is_none());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_snapshot(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
