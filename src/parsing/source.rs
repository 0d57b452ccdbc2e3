use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::utils::validation::MAX_DOCUMENT_BYTES;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is {size} bytes, exceeding the maximum of {MAX_DOCUMENT_BYTES}")]
    TooLarge { path: PathBuf, size: u64 },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("{origin} is not valid UTF-8")]
    InvalidUtf8 { origin: String },
}

/// Raw text of one definition file, tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File path or resource name, used in violation reports
    pub origin: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }

    /// Wrap bytes from an arbitrary provider
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUtf8` if the bytes are not UTF-8 text.
    pub fn from_bytes(origin: impl Into<String>, bytes: Vec<u8>) -> Result<Self, SourceError> {
        let origin = origin.into();
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Self { origin, text }),
            Err(_) => Err(SourceError::InvalidUtf8 { origin }),
        }
    }
}

/// The predefined lists compiled into the binary (checked by build.rs)
const EMBEDDED_DOCUMENTS: &[(&str, &str)] = &[
    (
        "predefs/account_history_types.json",
        include_str!("../../predefs/account_history_types.json"),
    ),
    (
        "predefs/duty_statuses.json",
        include_str!("../../predefs/duty_statuses.json"),
    ),
    (
        "predefs/watch_qualifications.json",
        include_str!("../../predefs/watch_qualifications.json"),
    ),
    (
        "predefs/watch_shift_types.json",
        include_str!("../../predefs/watch_shift_types.json"),
    ),
    (
        "predefs/watchbill_statuses.json",
        include_str!("../../predefs/watchbill_statuses.json"),
    ),
];

/// File extensions picked up when scanning a directory
const DOCUMENT_EXTENSIONS: &[&str] = &["json", "cc"];

/// Where definition documents are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// The predefined lists shipped with this crate
    Embedded,
    /// A single file holding one document or a bundle of documents
    File(PathBuf),
    /// Every `.json` / `.cc` file directly inside a directory, in name order
    Directory(PathBuf),
}

impl DocumentSource {
    /// Read every document this source provides
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if a file cannot be read, is too large, or
    /// a directory source does not point at a directory.
    pub fn read(&self) -> Result<Vec<SourceDocument>, SourceError> {
        match self {
            Self::Embedded => Ok(embedded_documents()),
            Self::File(path) => Ok(vec![read_file(path)?]),
            Self::Directory(path) => read_directory(path),
        }
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::File(path) | Self::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The predefined lists compiled into the binary
#[must_use]
pub fn embedded_documents() -> Vec<SourceDocument> {
    EMBEDDED_DOCUMENTS
        .iter()
        .map(|(origin, text)| SourceDocument::new(format!("embedded:{origin}"), *text))
        .collect()
}

/// Read a single definition file
///
/// # Errors
///
/// Returns `SourceError::Io` if the file cannot be read, `SourceError::TooLarge`
/// if it exceeds `MAX_DOCUMENT_BYTES`, or `SourceError::InvalidUtf8`.
pub fn read_file(path: &Path) -> Result<SourceDocument, SourceError> {
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_DOCUMENT_BYTES {
        return Err(SourceError::TooLarge {
            path: path.to_path_buf(),
            size,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read definition file");
    SourceDocument::from_bytes(path.display().to_string(), bytes)
}

/// Read every definition file directly inside `dir`.
///
/// Files are returned sorted by name so that load order, and therefore
/// catalog list order, does not depend on the filesystem.
///
/// # Errors
///
/// Returns `SourceError::NotADirectory` if `dir` is not a directory, or any
/// error from reading an individual file.
pub fn read_directory(dir: &Path) -> Result<Vec<SourceDocument>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::NotADirectory(dir.to_path_buf()));
    }

    let io_err = |source| SourceError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && has_document_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    debug!(dir = %dir.display(), files = paths.len(), "scanning definition directory");
    paths.iter().map(|p| read_file(p)).collect()
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_documents() {
        let docs = embedded_documents();
        assert_eq!(docs.len(), 5);
        assert!(docs.iter().all(|d| d.origin.starts_with("embedded:")));
        assert!(docs.iter().all(|d| d.text.contains("TypeFullName")));
    }

    #[test]
    fn test_has_document_extension() {
        assert!(has_document_extension(Path::new("Def_DutyStatuses.cc")));
        assert!(has_document_extension(Path::new("duty.JSON")));
        assert!(!has_document_extension(Path::new("README.md")));
        assert!(!has_document_extension(Path::new("json")));
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = SourceDocument::from_bytes("blob", vec![0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, SourceError::InvalidUtf8 { origin } if origin == "blob"));
    }

    #[test]
    fn test_read_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.cc"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = read_directory(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].origin.ends_with("a.cc"));
        assert!(docs[1].origin.ends_with("b.json"));
    }

    #[test]
    fn test_read_directory_not_a_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = read_directory(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory(_)));
    }
}
