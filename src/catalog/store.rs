use std::collections::HashMap;

use thiserror::Error;

use crate::core::entry::ReferenceEntry;
use crate::core::list::ReferenceList;
use crate::core::types::{EntryId, TypeName};
use crate::utils::validation::compute_signature;

/// A query against the catalog that matched nothing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("Unknown reference list '{0}'")]
    UnknownType(String),

    #[error("Reference list name '{name}' is ambiguous: {}", join_names(.candidates))]
    AmbiguousType {
        name: String,
        candidates: Vec<TypeName>,
    },

    #[error("No entry with Id {id} in '{list}'")]
    UnknownId { list: TypeName, id: EntryId },

    #[error("No entry with Value '{value}' in '{list}'")]
    UnknownValue { list: TypeName, value: String },
}

fn join_names(names: &[TypeName]) -> String {
    names
        .iter()
        .map(TypeName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lookup tables for one list
#[derive(Debug, Default)]
struct ListIndex {
    /// Index: Id -> position in the list's entries
    by_id: HashMap<EntryId, usize>,

    /// Index: Value -> position in the list's entries
    by_value: HashMap<String, usize>,
}

/// Immutable, validated reference data with lookup indexes.
///
/// Only [`ReferenceListLoader`](super::loader::ReferenceListLoader) builds a
/// catalog, and only after every document has passed validation. Nothing
/// mutates it afterwards; share it behind an `Arc` and swap whole catalogs
/// with [`CatalogHandle`](super::handle::CatalogHandle).
#[derive(Debug)]
pub struct Catalog {
    /// All lists, in load order
    lists: Vec<ReferenceList>,

    /// Index: full type name -> index in lists vec
    type_to_index: HashMap<TypeName, usize>,

    /// Index: short type name -> indices of lists with that short name
    short_name_to_indices: HashMap<String, Vec<usize>>,

    /// Per-list id/value indexes, parallel to `lists`
    indexes: Vec<ListIndex>,

    /// Index: list -> list supplying its qualification ids
    qualification_sources: HashMap<usize, usize>,

    /// Content fingerprint (see [`Catalog::signature`])
    signature: String,
}

impl Catalog {
    /// Assemble a catalog from lists that already passed validation.
    ///
    /// `qualification_sources` pairs are (referring list, source list) and
    /// must both name lists in `lists`.
    pub(crate) fn from_validated(
        lists: Vec<ReferenceList>,
        qualification_sources: &[(TypeName, TypeName)],
    ) -> Self {
        let mut type_to_index = HashMap::with_capacity(lists.len());
        let mut short_name_to_indices: HashMap<String, Vec<usize>> = HashMap::new();
        let mut indexes = Vec::with_capacity(lists.len());

        for (index, list) in lists.iter().enumerate() {
            type_to_index.insert(list.type_name.clone(), index);
            short_name_to_indices
                .entry(list.type_name.short_name().to_string())
                .or_default()
                .push(index);

            let mut list_index = ListIndex::default();
            for (pos, entry) in list.entries.iter().enumerate() {
                list_index.by_id.insert(entry.id, pos);
                list_index.by_value.insert(entry.value.clone(), pos);
            }
            indexes.push(list_index);
        }

        let qualification_sources = qualification_sources
            .iter()
            .filter_map(|(list, source)| {
                Some((*type_to_index.get(list)?, *type_to_index.get(source)?))
            })
            .collect();

        let signature = Self::compute_signature(&lists);

        Self {
            lists,
            type_to_index,
            short_name_to_indices,
            indexes,
            qualification_sources,
            signature,
        }
    }

    /// Signature over every list in type-name order, entries in document order
    fn compute_signature(lists: &[ReferenceList]) -> String {
        let mut sorted: Vec<&ReferenceList> = lists.iter().collect();
        sorted.sort_by(|a, b| a.type_name.cmp(&b.type_name));

        let lines = sorted.into_iter().flat_map(|list| {
            std::iter::once(format!("#{}", list.type_name)).chain(list.entries.iter().map(
                |entry| {
                    let quals: Vec<String> = entry
                        .required_qualifications
                        .iter()
                        .map(|q| q.id.to_string())
                        .collect();
                    format!(
                        "{}\t{}\t{}\t{}",
                        entry.id,
                        entry.value,
                        entry.description,
                        quals.join(",")
                    )
                },
            ))
        });
        compute_signature(lines)
    }

    /// Resolve a list name to its position.
    ///
    /// Exact full names win; otherwise a short name (segment after the last
    /// `.`) is accepted when exactly one loaded list has it.
    fn index_of(&self, name: &str) -> Result<usize, NotFound> {
        if let Some(&index) = self.type_to_index.get(name) {
            return Ok(index);
        }
        match self.short_name_to_indices.get(name).map(Vec::as_slice) {
            Some([index]) => Ok(*index),
            Some(candidates) if !candidates.is_empty() => Err(NotFound::AmbiguousType {
                name: name.to_string(),
                candidates: candidates
                    .iter()
                    .map(|&i| self.lists[i].type_name.clone())
                    .collect(),
            }),
            _ => Err(NotFound::UnknownType(name.to_string())),
        }
    }

    /// Full type name for a full or short list name
    ///
    /// # Errors
    ///
    /// Returns `NotFound::UnknownType` or `NotFound::AmbiguousType`.
    pub fn resolve_type_name(&self, name: &str) -> Result<&TypeName, NotFound> {
        Ok(&self.lists[self.index_of(name)?].type_name)
    }

    /// The whole list for a type
    ///
    /// # Errors
    ///
    /// Returns `NotFound::UnknownType` or `NotFound::AmbiguousType`.
    pub fn find_list(&self, type_name: &str) -> Result<&ReferenceList, NotFound> {
        Ok(&self.lists[self.index_of(type_name)?])
    }

    /// Entries of a list, in document order
    ///
    /// # Errors
    ///
    /// Returns `NotFound::UnknownType` or `NotFound::AmbiguousType`.
    pub fn list(&self, type_name: &str) -> Result<&[ReferenceEntry], NotFound> {
        Ok(&self.find_list(type_name)?.entries)
    }

    /// Get an entry by Id
    ///
    /// # Errors
    ///
    /// Returns `NotFound::UnknownId` if the list has no such entry, or a
    /// type-name error if the list itself is unknown.
    pub fn get(&self, type_name: &str, id: EntryId) -> Result<&ReferenceEntry, NotFound> {
        let index = self.index_of(type_name)?;
        let list = &self.lists[index];
        self.indexes[index]
            .by_id
            .get(&id)
            .map(|&pos| &list.entries[pos])
            .ok_or_else(|| NotFound::UnknownId {
                list: list.type_name.clone(),
                id,
            })
    }

    /// Get an entry by its Value (case-sensitive)
    ///
    /// # Errors
    ///
    /// Returns `NotFound::UnknownValue` if the list has no such entry, or a
    /// type-name error if the list itself is unknown.
    pub fn get_by_value(&self, type_name: &str, value: &str) -> Result<&ReferenceEntry, NotFound> {
        let index = self.index_of(type_name)?;
        let list = &self.lists[index];
        self.indexes[index]
            .by_value
            .get(value)
            .map(|&pos| &list.entries[pos])
            .ok_or_else(|| NotFound::UnknownValue {
                list: list.type_name.clone(),
                value: value.to_string(),
            })
    }

    /// The list whose entries satisfy `type_name`'s required qualifications
    #[must_use]
    pub fn qualification_source(&self, type_name: &str) -> Option<&TypeName> {
        let index = self.index_of(type_name).ok()?;
        self.qualification_sources
            .get(&index)
            .map(|&source| &self.lists[source].type_name)
    }

    /// Resolved qualification entries of one entry, in declared order.
    ///
    /// Entries without required qualifications yield an empty vec.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Catalog::get`].
    pub fn required_qualifications(
        &self,
        type_name: &str,
        id: EntryId,
    ) -> Result<Vec<&ReferenceEntry>, NotFound> {
        let entry = self.get(type_name, id)?;
        if !entry.has_qualifications() {
            return Ok(Vec::new());
        }

        let index = self.index_of(type_name)?;
        let Some(&source) = self.qualification_sources.get(&index) else {
            return Ok(Vec::new());
        };
        let source_list = &self.lists[source];
        let source_index = &self.indexes[source];

        // Validation guarantees every reference resolves
        Ok(entry
            .required_qualifications
            .iter()
            .filter_map(|q| source_index.by_id.get(&q.id))
            .map(|&pos| &source_list.entries[pos])
            .collect())
    }

    /// (referring list, source list) name pairs, sorted
    fn source_pairs(&self) -> Vec<(&TypeName, &TypeName)> {
        let mut pairs: Vec<(&TypeName, &TypeName)> = self
            .qualification_sources
            .iter()
            .map(|(&list, &source)| (&self.lists[list].type_name, &self.lists[source].type_name))
            .collect();
        pairs.sort();
        pairs
    }

    /// Full type names, in load order
    pub fn type_names(&self) -> impl Iterator<Item = &TypeName> {
        self.lists.iter().map(|list| &list.type_name)
    }

    #[must_use]
    pub fn lists(&self) -> &[ReferenceList] {
        &self.lists
    }

    /// Stable MD5 fingerprint of the catalog's content.
    ///
    /// Two catalogs loaded from the same definitions have the same signature,
    /// regardless of document order.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Export as a JSON array of definition documents that loads back into
    /// an equal catalog
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot occur for well-formed lists.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.lists)
    }

    /// Total number of entries across all lists
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.lists.iter().map(ReferenceList::len).sum()
    }

    /// Number of lists in catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.lists == other.lists && self.source_pairs() == other.source_pairs()
    }
}

impl Eq for Catalog {}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE: &str = "C06D1123-60D9-4F06-B4DE-DD15EAE724A2";
    const RESERVES: &str = "CE393F64-6ADB-4CA8-9E76-1691CD473CFC";
    const JOOD_SHIFT: &str = "858F6B78-5508-4A59-97A0-6E45AADAB2A9";
    const JOOD_QUAL: &str = "726A2088-AE51-4E41-B10A-952F0CBD73C3";

    fn id(s: &str) -> EntryId {
        EntryId::parse(s).unwrap()
    }

    fn sample_catalog() -> Catalog {
        let duty = ReferenceList::new("CommandCentral.Entities.ReferenceLists.DutyStatus")
            .with_entries(vec![
                ReferenceEntry::new(id(ACTIVE), "Active", "Active duty."),
                ReferenceEntry::new(id(RESERVES), "Reserves", "Reserve component."),
            ]);
        let quals = ReferenceList::new("WatchQualification")
            .with_entries(vec![ReferenceEntry::new(id(JOOD_QUAL), "JOOD", "")]);
        let shifts = ReferenceList::new("WatchShiftType").with_entries(vec![ReferenceEntry::new(
            id(JOOD_SHIFT),
            "JOOD",
            "This watch shift is for JOODs.",
        )
        .with_qualifications([id(JOOD_QUAL)])]);

        Catalog::from_validated(
            vec![duty, quals, shifts],
            &[(TypeName::new("WatchShiftType"), TypeName::new("WatchQualification"))],
        )
    }

    #[test]
    fn test_get_by_id_and_value() {
        let catalog = sample_catalog();

        let active = catalog
            .get("CommandCentral.Entities.ReferenceLists.DutyStatus", id(ACTIVE))
            .unwrap();
        assert_eq!(active.value, "Active");

        let reserves = catalog.get_by_value("DutyStatus", "Reserves").unwrap();
        assert_eq!(reserves.id, id(RESERVES));
    }

    #[test]
    fn test_value_lookup_is_case_sensitive() {
        let catalog = sample_catalog();
        assert!(matches!(
            catalog.get_by_value("DutyStatus", "active"),
            Err(NotFound::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_list_preserves_order() {
        let catalog = sample_catalog();
        let values: Vec<&str> = catalog
            .list("DutyStatus")
            .unwrap()
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(values, vec!["Active", "Reserves"]);
    }

    #[test]
    fn test_not_found() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.list("Paygrade").unwrap_err(),
            NotFound::UnknownType("Paygrade".to_string())
        );
        assert!(matches!(
            catalog.get("DutyStatus", id(JOOD_QUAL)),
            Err(NotFound::UnknownId { .. })
        ));
    }

    #[test]
    fn test_ambiguous_short_name() {
        let catalog = Catalog::from_validated(
            vec![
                ReferenceList::new("A.Status"),
                ReferenceList::new("B.Status"),
            ],
            &[],
        );
        let err = catalog.list("Status").unwrap_err();
        assert!(matches!(err, NotFound::AmbiguousType { ref candidates, .. } if candidates.len() == 2));
        assert!(err.to_string().contains("A.Status, B.Status"));

        // Full names still resolve
        assert!(catalog.list("A.Status").is_ok());
    }

    #[test]
    fn test_required_qualifications_resolved() {
        let catalog = sample_catalog();
        let quals = catalog
            .required_qualifications("WatchShiftType", id(JOOD_SHIFT))
            .unwrap();
        assert_eq!(quals.len(), 1);
        assert_eq!(quals[0].id, id(JOOD_QUAL));
        assert_eq!(
            catalog.qualification_source("WatchShiftType").map(TypeName::as_str),
            Some("WatchQualification")
        );

        let none = catalog.required_qualifications("DutyStatus", id(ACTIVE)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_counts_and_names() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entry_count(), 4);
        assert!(!catalog.is_empty());
        let names: Vec<&str> = catalog.type_names().map(TypeName::as_str).collect();
        assert_eq!(names[1], "WatchQualification");
    }

    #[test]
    fn test_signature_ignores_list_order() {
        let a = sample_catalog();
        let mut lists = a.lists().to_vec();
        lists.reverse();
        let b = Catalog::from_validated(
            lists,
            &[(TypeName::new("WatchShiftType"), TypeName::new("WatchQualification"))],
        );
        assert_eq!(a.signature(), b.signature());
        assert_ne!(a, b);
    }

    #[test]
    fn test_to_json_document_shape() {
        let json = sample_catalog().to_json().unwrap();
        assert!(json.contains("\"TypeFullName\""));
        assert!(json.contains("\"Definitions\""));
        assert!(json.contains("\"RequiredWatchQualifications\""));
        assert!(json.contains(JOOD_QUAL));
    }
}
