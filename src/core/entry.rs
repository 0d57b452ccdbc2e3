use serde::{Deserialize, Serialize};

use crate::core::types::EntryId;

/// Reference to an entry of another list, by identifier only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualificationRef {
    #[serde(rename = "Id")]
    pub id: EntryId,
}

impl QualificationRef {
    #[must_use]
    pub fn new(id: EntryId) -> Self {
        Self { id }
    }
}

/// A single value of a reference list.
///
/// Serializes in the same shape as the definition documents, so an exported
/// catalog can be loaded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Stable identifier, never reassigned once published
    #[serde(rename = "Id")]
    pub id: EntryId,

    /// Short label, unique within its list (case-sensitive)
    #[serde(rename = "Value")]
    pub value: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    /// Entries of the list's qualification source that a person must hold.
    /// Empty for lists whose entries are not roles.
    #[serde(
        rename = "RequiredWatchQualifications",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required_qualifications: Vec<QualificationRef>,
}

impl ReferenceEntry {
    pub fn new(id: EntryId, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            description: description.into(),
            required_qualifications: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_qualifications(mut self, ids: impl IntoIterator<Item = EntryId>) -> Self {
        self.required_qualifications = ids.into_iter().map(QualificationRef::new).collect();
        self
    }

    #[must_use]
    pub fn has_qualifications(&self) -> bool {
        !self.required_qualifications.is_empty()
    }
}

impl std::fmt::Display for ReferenceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOOD_SHIFT: &str = "858F6B78-5508-4A59-97A0-6E45AADAB2A9";
    const JOOD_QUAL: &str = "726A2088-AE51-4E41-B10A-952F0CBD73C3";

    #[test]
    fn test_serializes_in_document_shape() {
        let entry = ReferenceEntry::new(
            EntryId::parse(JOOD_SHIFT).unwrap(),
            "JOOD",
            "This watch shift is for JOODs.",
        )
        .with_qualifications([EntryId::parse(JOOD_QUAL).unwrap()]);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Value"], "JOOD");
        assert_eq!(json["RequiredWatchQualifications"][0]["Id"], JOOD_QUAL);
    }

    #[test]
    fn test_no_qualifications_omitted() {
        let entry = ReferenceEntry::new(
            EntryId::parse("C06D1123-60D9-4F06-B4DE-DD15EAE724A2").unwrap(),
            "Active",
            "",
        );
        assert!(!entry.has_qualifications());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("RequiredWatchQualifications"));
        assert_eq!(entry.to_string(), "Active");
    }
}
