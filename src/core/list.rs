use serde::{Deserialize, Serialize};

use crate::core::entry::ReferenceEntry;
use crate::core::types::TypeName;

/// One reference list: the typed form of a single definition document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceList {
    #[serde(rename = "TypeFullName")]
    pub type_name: TypeName,

    /// Entries in document order
    #[serde(rename = "Definitions")]
    pub entries: Vec<ReferenceEntry>,
}

impl ReferenceList {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: TypeName::new(type_name),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_entries(mut self, entries: Vec<ReferenceEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Number of entries that carry required qualifications
    #[must_use]
    pub fn qualified_entry_count(&self) -> usize {
        self.entries.iter().filter(|e| e.has_qualifications()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
