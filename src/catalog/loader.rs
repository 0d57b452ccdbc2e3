//! Validating loader for reference-list definitions.
//!
//! Loading runs in four passes over the whole document set:
//!
//! 1. parse every document (malformed data is recorded, not fatal yet)
//! 2. reject duplicate `TypeFullName`s across documents
//! 3. check `Id` and `Value` uniqueness inside each list
//! 4. resolve every required qualification against its configured source list
//!
//! Violations from all passes are collected. The catalog is only built if
//! none were found.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::catalog::store::Catalog;
use crate::catalog::violation::{LoadError, Violation};
use crate::config::LoaderConfig;
use crate::core::list::ReferenceList;
use crate::core::types::{EntryId, TypeName};
use crate::parsing::document::{parse_source, ParsedList};
use crate::parsing::source::SourceDocument;

/// Turns definition documents into a validated [`Catalog`]
#[derive(Debug, Clone, Default)]
pub struct ReferenceListLoader {
    /// (referring list name, source list name); full or short names
    qualification_sources: Vec<(String, String)>,
}

impl ReferenceListLoader {
    /// Create a loader with an explicit qualification-source mapping
    pub fn new<I, K, V>(qualification_sources: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            qualification_sources: qualification_sources
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(
            config
                .qualification_sources
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    /// Parse, validate and cross-reference `documents`.
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` listing every violation found across all
    /// documents. No catalog is produced in that case.
    pub fn load(&self, documents: &[SourceDocument]) -> Result<Catalog, LoadError> {
        let mut violations = Vec::new();
        let mut parsed = Vec::new();

        for doc in documents {
            let outcome = parse_source(doc);
            violations.extend(outcome.violations);
            parsed.extend(outcome.lists);
        }

        let lists = dedupe_types(parsed, &mut violations);

        for list in &lists {
            check_uniqueness(list, &mut violations);
        }

        let links = self.resolve_sources(&lists, &mut violations);
        for (list_name, source_name) in &links {
            check_references(&lists, list_name, source_name, &mut violations);
        }

        if !violations.is_empty() {
            warn!(
                documents = documents.len(),
                violations = violations.len(),
                "reference data failed validation"
            );
            return Err(LoadError::new(violations));
        }

        let catalog = Catalog::from_validated(lists, &links);
        info!(
            lists = catalog.len(),
            entries = catalog.entry_count(),
            signature = catalog.signature(),
            "loaded reference catalog"
        );
        Ok(catalog)
    }

    /// Work out which loaded list supplies qualification ids for each list
    /// whose entries carry required qualifications.
    ///
    /// Mapping keys that name lists absent from this load are ignored; a
    /// configuration may cover more lists than a given document set has.
    /// Several keys naming the same list must agree on its source.
    fn resolve_sources(
        &self,
        lists: &[ReferenceList],
        violations: &mut Vec<Violation>,
    ) -> Vec<(TypeName, TypeName)> {
        let mut links = Vec::new();

        for list in lists {
            let qualified = list.qualified_entry_count();
            let mut configured: Vec<&String> = self
                .qualification_sources
                .iter()
                .filter(|(key, _)| resolve_name(lists, key) == Some(&list.type_name))
                .map(|(_, source)| source)
                .collect();
            // Full and short spellings of one source list agree
            configured.sort_by(|a, b| source_key(lists, a).cmp(source_key(lists, b)));
            configured.dedup_by(|a, b| source_key(lists, a) == source_key(lists, b));

            if configured.len() > 1 {
                violations.push(Violation::ConflictingQualificationSources {
                    list: list.type_name.clone(),
                    sources: configured.into_iter().cloned().collect(),
                });
                continue;
            }

            let Some(source_name) = configured.first().copied() else {
                if qualified > 0 {
                    violations.push(Violation::MissingQualificationSource {
                        list: list.type_name.clone(),
                        entries: qualified,
                    });
                }
                continue;
            };

            if qualified == 0 {
                continue;
            }

            match resolve_name(lists, source_name) {
                None => violations.push(Violation::UnknownQualificationSource {
                    list: list.type_name.clone(),
                    source_list: source_name.clone(),
                }),
                Some(source) if *source == list.type_name => {
                    violations.push(Violation::SelfReferencingQualificationSource {
                        list: list.type_name.clone(),
                    });
                }
                Some(source) => {
                    debug!(list = %list.type_name, source = %source, "linked qualification source");
                    links.push((list.type_name.clone(), source.clone()));
                }
            }
        }

        links
    }
}

/// Resolve a configured list name against the loaded lists: exact full name
/// first, then a short name that exactly one list has.
fn resolve_name<'a>(lists: &'a [ReferenceList], name: &str) -> Option<&'a TypeName> {
    if let Some(list) = lists.iter().find(|l| l.type_name.as_str() == name) {
        return Some(&list.type_name);
    }
    let mut matches = lists.iter().filter(|l| l.type_name.short_name() == name);
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(&only.type_name),
        _ => None,
    }
}

/// Loaded full name of a configured source, or the name as written if it
/// does not resolve
fn source_key<'a>(lists: &'a [ReferenceList], name: &'a str) -> &'a str {
    resolve_name(lists, name).map_or(name, TypeName::as_str)
}

/// Keep the first document for each `TypeFullName`; report the rest
fn dedupe_types(parsed: Vec<ParsedList>, violations: &mut Vec<Violation>) -> Vec<ReferenceList> {
    let mut first_origin: HashMap<TypeName, String> = HashMap::new();
    let mut lists = Vec::with_capacity(parsed.len());

    for ParsedList { origin, list } in parsed {
        if let Some(first) = first_origin.get(&list.type_name) {
            violations.push(Violation::DuplicateType {
                type_name: list.type_name,
                first_origin: first.clone(),
                origin,
            });
            continue;
        }
        first_origin.insert(list.type_name.clone(), origin);
        lists.push(list);
    }

    lists
}

/// Report every Id and every Value used by more than one entry of `list`,
/// in order of first use
fn check_uniqueness(list: &ReferenceList, violations: &mut Vec<Violation>) {
    let mut id_order: Vec<EntryId> = Vec::new();
    let mut values_by_id: HashMap<EntryId, Vec<String>> = HashMap::new();
    let mut value_order: Vec<&str> = Vec::new();
    let mut ids_by_value: HashMap<&str, Vec<EntryId>> = HashMap::new();

    for entry in &list.entries {
        let values = values_by_id.entry(entry.id).or_default();
        if values.is_empty() {
            id_order.push(entry.id);
        }
        values.push(entry.value.clone());

        // Empty values were already reported as malformed
        if entry.value.trim().is_empty() {
            continue;
        }
        let ids = ids_by_value.entry(entry.value.as_str()).or_default();
        if ids.is_empty() {
            value_order.push(entry.value.as_str());
        }
        ids.push(entry.id);
    }

    for id in id_order {
        if let Some(values) = values_by_id.remove(&id).filter(|v| v.len() > 1) {
            violations.push(Violation::DuplicateId {
                list: list.type_name.clone(),
                id,
                values,
            });
        }
    }

    for value in value_order {
        if let Some(ids) = ids_by_value.remove(value).filter(|ids| ids.len() > 1) {
            violations.push(Violation::DuplicateValue {
                list: list.type_name.clone(),
                value: value.to_string(),
                ids,
            });
        }
    }
}

/// Report every required qualification of `list_name` that is not an entry
/// of `source_name`
fn check_references(
    lists: &[ReferenceList],
    list_name: &TypeName,
    source_name: &TypeName,
    violations: &mut Vec<Violation>,
) {
    let (Some(list), Some(source)) = (
        lists.iter().find(|l| &l.type_name == list_name),
        lists.iter().find(|l| &l.type_name == source_name),
    ) else {
        return;
    };

    let known: HashSet<EntryId> = source.entries.iter().map(|e| e.id).collect();

    for entry in &list.entries {
        for qualification in &entry.required_qualifications {
            if !known.contains(&qualification.id) {
                violations.push(Violation::UnresolvedReference {
                    list: list.type_name.clone(),
                    entry_value: entry.value.clone(),
                    entry_id: entry.id,
                    missing_id: qualification.id,
                    source_list: source.type_name.clone(),
                });
            }
        }
    }
}
