//! Definition document parser.
//!
//! Turns the text of one source into typed lists. Problems are recorded as
//! [`Violation`]s instead of aborting, so that a single load reports every
//! malformed entry across every document.

use serde::Deserialize;
use tracing::debug;

use crate::catalog::violation::Violation;
use crate::core::entry::{QualificationRef, ReferenceEntry};
use crate::core::list::ReferenceList;
use crate::core::types::{EntryId, TypeName};
use crate::parsing::source::SourceDocument;
use crate::utils::validation::{check_entry_limit, validate_type_name};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDocument {
    type_full_name: Option<String>,
    definitions: Option<Vec<RawEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEntry {
    id: Option<String>,
    value: Option<String>,
    description: Option<String>,
    required_watch_qualifications: Option<Vec<RawQualificationRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawQualificationRef {
    id: Option<String>,
}

/// A list parsed from one document, before cross-document checks
#[derive(Debug, Clone)]
pub struct ParsedList {
    /// Origin of the document, e.g. a file path or `file.json[2]` within a bundle
    pub origin: String,
    pub list: ReferenceList,
}

/// Everything extracted from one source document
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub lists: Vec<ParsedList>,
    pub violations: Vec<Violation>,
}

/// Parse a source that holds either one definition document or a JSON array
/// of them.
///
/// Entries with an unusable `Id` are dropped; entries with a missing or empty
/// `Value` are kept so that other lists can still resolve references to them.
/// Either way a violation is recorded, so the load as a whole fails.
#[must_use]
pub fn parse_source(doc: &SourceDocument) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    // Definition files saved by .NET tooling often carry a BOM
    let text = doc.text.trim_start_matches('\u{feff}');

    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            outcome.violations.push(malformed(&doc.origin, format!("invalid JSON: {e}")));
            return outcome;
        }
    };

    match value {
        serde_json::Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                let origin = format!("{}[{i}]", doc.origin);
                parse_document_value(&origin, item, &mut outcome);
            }
        }
        value @ serde_json::Value::Object(_) => {
            parse_document_value(&doc.origin, value, &mut outcome);
        }
        _ => outcome.violations.push(malformed(
            &doc.origin,
            "expected a definition object or an array of definition objects".to_string(),
        )),
    }

    outcome
}

fn parse_document_value(origin: &str, value: serde_json::Value, outcome: &mut ParseOutcome) {
    let raw: RawDocument = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            outcome.violations.push(malformed(origin, e.to_string()));
            return;
        }
    };

    let Some(type_name) = raw.type_full_name else {
        outcome
            .violations
            .push(malformed(origin, "missing TypeFullName".to_string()));
        return;
    };
    if let Err(e) = validate_type_name(&type_name) {
        outcome
            .violations
            .push(malformed(origin, format!("invalid TypeFullName '{type_name}': {e}")));
        return;
    }
    let type_name = TypeName::new(type_name);

    let Some(raw_entries) = raw.definitions else {
        outcome
            .violations
            .push(malformed(origin, format!("{type_name}: missing Definitions")));
        return;
    };

    let mut entries = Vec::with_capacity(raw_entries.len());
    for (index, raw_entry) in raw_entries.into_iter().enumerate() {
        if let Some(msg) = check_entry_limit(entries.len()) {
            outcome
                .violations
                .push(malformed(origin, format!("{type_name}: {msg}")));
            break;
        }
        if let Some(entry) = parse_entry(origin, &type_name, index, raw_entry, outcome) {
            entries.push(entry);
        }
    }

    debug!(origin, list = %type_name, entries = entries.len(), "parsed definition document");

    outcome.lists.push(ParsedList {
        origin: origin.to_string(),
        list: ReferenceList {
            type_name,
            entries,
        },
    });
}

fn parse_entry(
    origin: &str,
    type_name: &TypeName,
    index: usize,
    raw: RawEntry,
    outcome: &mut ParseOutcome,
) -> Option<ReferenceEntry> {
    // Label used in messages: the Value if there is one, else the position
    let label = match raw.value.as_deref() {
        Some(v) if !v.is_empty() => format!("entry #{} ('{v}')", index + 1),
        _ => format!("entry #{}", index + 1),
    };

    let id = match raw.id.as_deref().map(EntryId::parse) {
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            let text = raw.id.as_deref().unwrap_or_default();
            outcome.violations.push(malformed(
                origin,
                format!("{type_name}: {label} has invalid Id '{text}': {e}"),
            ));
            return None;
        }
        None => {
            outcome
                .violations
                .push(malformed(origin, format!("{type_name}: {label} is missing Id")));
            return None;
        }
    };

    let value = match raw.value {
        Some(v) if !v.trim().is_empty() => v,
        Some(v) => {
            outcome.violations.push(malformed(
                origin,
                format!("{type_name}: {label} (Id {id}) has an empty Value"),
            ));
            v
        }
        None => {
            outcome.violations.push(malformed(
                origin,
                format!("{type_name}: {label} (Id {id}) is missing Value"),
            ));
            String::new()
        }
    };

    let mut required_qualifications = Vec::new();
    for (q_index, q) in raw
        .required_watch_qualifications
        .unwrap_or_default()
        .into_iter()
        .enumerate()
    {
        match q.id.as_deref().map(EntryId::parse) {
            Some(Ok(q_id))
                if required_qualifications
                    .iter()
                    .any(|r: &QualificationRef| r.id == q_id) =>
            {
                outcome.violations.push(malformed(
                    origin,
                    format!(
                        "{type_name}: {label} qualification #{} repeats Id {q_id}",
                        q_index + 1
                    ),
                ));
            }
            Some(Ok(q_id)) => required_qualifications.push(QualificationRef::new(q_id)),
            Some(Err(e)) => outcome.violations.push(malformed(
                origin,
                format!(
                    "{type_name}: {label} qualification #{} has invalid Id: {e}",
                    q_index + 1
                ),
            )),
            None => outcome.violations.push(malformed(
                origin,
                format!(
                    "{type_name}: {label} qualification #{} is missing Id",
                    q_index + 1
                ),
            )),
        }
    }

    Some(ReferenceEntry {
        id,
        value,
        description: raw.description.unwrap_or_default(),
        required_qualifications,
    })
}

fn malformed(origin: &str, detail: String) -> Violation {
    Violation::MalformedDocument {
        origin: origin.to_string(),
        detail,
    }
}
