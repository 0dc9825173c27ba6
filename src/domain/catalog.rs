//! Catalog loading and validation.
//!
//! A catalog is a JSON array of records, each naming a winget package
//! identifier and exactly one piece of evidence of successful installation.
//! The whole catalog is validated before any package generation starts.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::AppError;

/// Evidence of successful installation for a generated detection script.
///
/// Exactly one strategy applies per catalog entry; the enum makes that
/// structural once a record has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Existence of a registry key path.
    RegistryKey(String),
    /// An uninstall entry whose DisplayName value matches.
    DisplayName(String),
    /// Existence of a file path.
    FilePath(String),
}

/// A raw catalog record as deserialized from JSON, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRecord {
    pub identifier: Option<String>,
    pub registry_key: Option<String>,
    pub display_name: Option<String>,
    pub file_path: Option<String>,
    pub version: Option<String>,
}

/// A validated catalog entry, ready for package generation.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub identifier: String,
    pub detection: Detection,
    pub version: Option<String>,
}

impl CatalogRecord {
    /// Validate this record, producing a [`CatalogEntry`].
    ///
    /// The identifier must be present and non-empty, and exactly one of the
    /// three detection fields must be set. `index` is the record's position in
    /// the catalog, used for error reporting.
    pub fn validate(&self, index: usize) -> Result<CatalogEntry, AppError> {
        let identifier = match &self.identifier {
            Some(value) if !value.is_empty() => value.clone(),
            Some(_) => {
                return Err(AppError::InvalidCatalogEntry {
                    index,
                    reason: "'identifier' must be non-empty".to_string(),
                });
            }
            None => {
                return Err(AppError::InvalidCatalogEntry {
                    index,
                    reason: "missing required 'identifier' field".to_string(),
                });
            }
        };

        let mut detections = Vec::new();
        if let Some(key) = &self.registry_key {
            detections.push(Detection::RegistryKey(key.clone()));
        }
        if let Some(name) = &self.display_name {
            detections.push(Detection::DisplayName(name.clone()));
        }
        if let Some(path) = &self.file_path {
            detections.push(Detection::FilePath(path.clone()));
        }

        let detection = match detections.len() {
            1 => detections.remove(0),
            0 => {
                return Err(AppError::InvalidCatalogEntry {
                    index,
                    reason: "exactly one of 'registry_key', 'display_name', or 'file_path' must \
                             be supplied; none were"
                        .to_string(),
                });
            }
            n => {
                return Err(AppError::InvalidCatalogEntry {
                    index,
                    reason: format!(
                        "exactly one of 'registry_key', 'display_name', or 'file_path' must be \
                         supplied; {n} were"
                    ),
                });
            }
        };

        Ok(CatalogEntry { identifier, detection, version: self.version.clone() })
    }
}

/// Load and validate a catalog file.
///
/// Fails on the first invalid record; no entry is generated until the whole
/// catalog validates.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, AppError> {
    let content = fs::read_to_string(path)?;
    let records: Vec<CatalogRecord> =
        serde_json::from_str(&content).map_err(|err| AppError::ParseError {
            what: format!("catalog file '{}'", path.display()),
            details: err.to_string(),
        })?;

    records.iter().enumerate().map(|(index, record)| record.validate(index)).collect()
}

/// Load an exclusion file: a JSON array of identifiers.
pub fn load_exclusions(path: &Path) -> Result<Vec<String>, AppError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|err| AppError::ParseError {
        what: format!("exclusion file '{}'", path.display()),
        details: err.to_string(),
    })
}

/// Remove entries whose identifier case-insensitively matches an excluded
/// value. Retained entries keep their catalog order.
pub fn apply_exclusions(entries: Vec<CatalogEntry>, excluded: &[String]) -> Vec<CatalogEntry> {
    if excluded.is_empty() {
        return entries;
    }
    let folded: Vec<String> = excluded.iter().map(|id| id.to_lowercase()).collect();
    entries
        .into_iter()
        .filter(|entry| !folded.contains(&entry.identifier.to_lowercase()))
        .collect()
}
