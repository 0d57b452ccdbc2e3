use serde::Serialize;
use thiserror::Error;

use crate::core::types::{EntryId, TypeName};

/// A single problem found while loading definition documents
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("{origin}: malformed document: {detail}")]
    MalformedDocument { origin: String, detail: String },

    #[error("{origin}: duplicate TypeFullName '{type_name}' (already defined by {first_origin})")]
    DuplicateType {
        type_name: TypeName,
        first_origin: String,
        origin: String,
    },

    #[error("{list}: Id {id} is used by {} entries ({})", .values.len(), .values.join(", "))]
    DuplicateId {
        list: TypeName,
        id: EntryId,
        values: Vec<String>,
    },

    #[error("{list}: Value '{value}' is used by {} entries ({})", .ids.len(), join_ids(.ids))]
    DuplicateValue {
        list: TypeName,
        value: String,
        ids: Vec<EntryId>,
    },

    #[error(
        "{list}: entry '{entry_value}' ({entry_id}) requires qualification {missing_id}, which is not defined in {source_list}"
    )]
    UnresolvedReference {
        list: TypeName,
        entry_value: String,
        entry_id: EntryId,
        missing_id: EntryId,
        source_list: TypeName,
    },

    #[error("{list}: {entries} entries require qualifications but no qualification source is configured for this list")]
    MissingQualificationSource { list: TypeName, entries: usize },

    #[error("{list}: qualification source '{source_list}' is not among the loaded lists")]
    UnknownQualificationSource { list: TypeName, source_list: String },

    #[error("{list}: a list cannot be its own qualification source")]
    SelfReferencingQualificationSource { list: TypeName },

    #[error("{list}: conflicting qualification sources configured ({})", .sources.join(", "))]
    ConflictingQualificationSources { list: TypeName, sources: Vec<String> },
}

fn join_ids(ids: &[EntryId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Violation {
    /// Short machine-readable kind, matching the `kind` tag of the JSON form
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedDocument { .. } => "malformed_document",
            Self::DuplicateType { .. } => "duplicate_type",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::DuplicateValue { .. } => "duplicate_value",
            Self::UnresolvedReference { .. } => "unresolved_reference",
            Self::MissingQualificationSource { .. } => "missing_qualification_source",
            Self::UnknownQualificationSource { .. } => "unknown_qualification_source",
            Self::SelfReferencingQualificationSource { .. } => {
                "self_referencing_qualification_source"
            }
            Self::ConflictingQualificationSources { .. } => "conflicting_qualification_sources",
        }
    }
}

/// Every violation found by one load attempt.
///
/// A load never stops at the first problem; the report lists all of them so
/// the source documents can be fixed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    violations: Vec<Violation>,
}

impl LoadError {
    #[must_use]
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Number of violations of the given kind (see [`Violation::kind`])
    #[must_use]
    pub fn count_of(&self, kind: &str) -> usize {
        self.violations.iter().filter(|v| v.kind() == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reference data failed validation with {} violation(s):",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  [{}] {violation}", violation.kind())?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> EntryId {
        EntryId::parse(s).unwrap()
    }

    #[test]
    fn test_unresolved_reference_message() {
        let v = Violation::UnresolvedReference {
            list: TypeName::new("WatchShiftType"),
            entry_value: "JOOD".to_string(),
            entry_id: id("858F6B78-5508-4A59-97A0-6E45AADAB2A9"),
            missing_id: id("726A2088-AE51-4E41-B10A-952F0CBD73C3"),
            source_list: TypeName::new("WatchQualification"),
        };
        let msg = v.to_string();
        assert!(msg.contains("JOOD"));
        assert!(msg.contains("726A2088-AE51-4E41-B10A-952F0CBD73C3"));
        assert!(msg.contains("WatchQualification"));
        assert_eq!(v.kind(), "unresolved_reference");
    }

    #[test]
    fn test_duplicate_value_message_lists_ids() {
        let v = Violation::DuplicateValue {
            list: TypeName::new("DutyStatus"),
            value: "Active".to_string(),
            ids: vec![
                id("C06D1123-60D9-4F06-B4DE-DD15EAE724A2"),
                id("CE393F64-6ADB-4CA8-9E76-1691CD473CFC"),
            ],
        };
        let msg = v.to_string();
        assert!(msg.contains("used by 2 entries"));
        assert!(msg.contains("C06D1123-60D9-4F06-B4DE-DD15EAE724A2"));
    }

    #[test]
    fn test_load_error_report() {
        let err = LoadError::new(vec![
            Violation::MalformedDocument {
                origin: "a.json".to_string(),
                detail: "missing TypeFullName".to_string(),
            },
            Violation::SelfReferencingQualificationSource {
                list: TypeName::new("WatchShiftType"),
            },
        ]);

        let report = err.to_string();
        assert!(report.starts_with("Reference data failed validation with 2 violation(s):"));
        assert!(report.contains("[malformed_document] a.json: malformed document"));
        assert_eq!(err.count_of("malformed_document"), 1);
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_violation_json_is_tagged() {
        let v = Violation::MissingQualificationSource {
            list: TypeName::new("WatchShiftType"),
            entries: 3,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "missing_qualification_source");
        assert_eq!(json["list"], "WatchShiftType");
    }
}
