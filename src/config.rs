//! Loader configuration.
//!
//! ```json
//! {
//!   "qualification_sources": { "WatchShiftType": "WatchQualification" },
//!   "directories": ["./predefs"],
//!   "files": [],
//!   "include_embedded": false
//! }
//! ```
//!
//! List names in `qualification_sources` may be full `TypeFullName`s or short
//! names (the part after the last `.`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parsing::source::{DocumentSource, SourceDocument, SourceError};

pub const WATCH_SHIFT_TYPE_LIST: &str = "CommandCentral.Entities.ReferenceLists.Watchbill.WatchShiftType";
pub const WATCH_QUALIFICATION_LIST: &str = "CommandCentral.Entities.ReferenceLists.WatchQualification";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid qualification source '{0}': expected LIST=SOURCE")]
    InvalidMapping(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Referring list name -> list that supplies valid qualification ids
    pub qualification_sources: BTreeMap<String, String>,

    /// Directories scanned for `.json` / `.cc` definition files
    pub directories: Vec<PathBuf>,

    /// Individual definition files
    pub files: Vec<PathBuf>,

    /// Load the embedded predefined lists. When unset, they are loaded only
    /// if no directories or files are configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_embedded: Option<bool>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let mut qualification_sources = BTreeMap::new();
        qualification_sources.insert(
            WATCH_SHIFT_TYPE_LIST.to_string(),
            WATCH_QUALIFICATION_LIST.to_string(),
        );
        Self {
            qualification_sources,
            directories: Vec::new(),
            files: Vec::new(),
            include_embedded: None,
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read or
    /// `ConfigError::ParseError` if it is not valid configuration JSON.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if `json` is not valid configuration JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace a mapping given as `LIST=SOURCE`
    ///
    /// Any existing mapping whose list has the same short name is replaced,
    /// whether it was written as a full or a short name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMapping` if either side is missing.
    pub fn add_qualification_source(&mut self, spec: &str) -> Result<(), ConfigError> {
        let (list, source) = spec
            .split_once('=')
            .map(|(l, s)| (l.trim(), s.trim()))
            .filter(|(l, s)| !l.is_empty() && !s.is_empty())
            .ok_or_else(|| ConfigError::InvalidMapping(spec.to_string()))?;
        let short = short_name(list);
        self.qualification_sources
            .retain(|key, _| short_name(key) != short);
        self.qualification_sources
            .insert(list.to_string(), source.to_string());
        Ok(())
    }

    #[must_use]
    pub fn includes_embedded(&self) -> bool {
        self.include_embedded
            .unwrap_or(self.directories.is_empty() && self.files.is_empty())
    }

    /// Configured sources, embedded first, then directories, then files
    #[must_use]
    pub fn sources(&self) -> Vec<DocumentSource> {
        let mut sources = Vec::new();
        if self.includes_embedded() {
            sources.push(DocumentSource::Embedded);
        }
        sources.extend(self.directories.iter().cloned().map(DocumentSource::Directory));
        sources.extend(self.files.iter().cloned().map(DocumentSource::File));
        sources
    }

    /// Read every configured source
    ///
    /// # Errors
    ///
    /// Returns the first `SourceError` encountered; nothing is loaded in that case.
    pub fn read_documents(&self) -> Result<Vec<SourceDocument>, SourceError> {
        let mut documents = Vec::new();
        for source in self.sources() {
            documents.extend(source.read()?);
        }
        Ok(documents)
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maps_watch_shift_types() {
        let config = LoaderConfig::default();
        assert_eq!(
            config.qualification_sources.get(WATCH_SHIFT_TYPE_LIST).map(String::as_str),
            Some(WATCH_QUALIFICATION_LIST)
        );
        assert!(config.includes_embedded());
        assert_eq!(config.sources(), vec![DocumentSource::Embedded]);
    }

    #[test]
    fn test_from_json_partial() {
        let config = LoaderConfig::from_json(r#"{"directories": ["/etc/predefs"]}"#).unwrap();
        assert_eq!(config.directories, vec![PathBuf::from("/etc/predefs")]);
        // Defaults fill the rest
        assert_eq!(config.qualification_sources.len(), 1);
        assert!(!config.includes_embedded());
    }

    #[test]
    fn test_explicit_embedded_with_directories() {
        let config = LoaderConfig::from_json(
            r#"{"directories": ["extra"], "include_embedded": true}"#,
        )
        .unwrap();
        assert_eq!(
            config.sources(),
            vec![
                DocumentSource::Embedded,
                DocumentSource::Directory(PathBuf::from("extra"))
            ]
        );
    }

    #[test]
    fn test_add_qualification_source() {
        let mut config = LoaderConfig::default();
        config
            .add_qualification_source("WatchStation = WatchQualification")
            .unwrap();
        assert_eq!(
            config.qualification_sources.get("WatchStation").map(String::as_str),
            Some("WatchQualification")
        );

        assert!(config.add_qualification_source("WatchStation").is_err());
        assert!(config.add_qualification_source("=WatchQualification").is_err());
    }

    #[test]
    fn test_add_qualification_source_replaces_full_name_mapping() {
        let mut config = LoaderConfig::default();
        config
            .add_qualification_source("WatchShiftType=WatchbillStatus")
            .unwrap();
        assert_eq!(config.qualification_sources.len(), 1);
        assert_eq!(
            config.qualification_sources.get("WatchShiftType").map(String::as_str),
            Some("WatchbillStatus")
        );
        assert!(!config.qualification_sources.contains_key(WATCH_SHIFT_TYPE_LIST));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            LoaderConfig::from_json("{"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
