use std::collections::HashSet;
use std::path::Path;

const PREDEF_DIR: &str = "predefs";

const PREDEF_FILES: &[&str] = &[
    "account_history_types.json",
    "duty_statuses.json",
    "watch_qualifications.json",
    "watch_shift_types.json",
    "watchbill_statuses.json",
];

fn main() {
    let mut total_entries = 0;
    for file in PREDEF_FILES {
        let path = Path::new(PREDEF_DIR).join(file);
        total_entries += validate_predef_file(&path);
    }

    println!(
        "cargo:warning=Validated predefs: {} lists, {total_entries} total entries",
        PREDEF_FILES.len()
    );
    set_build_dependencies();
}

fn validate_predef_file(path: &Path) -> usize {
    // Ensure predef exists at build time
    assert!(
        path.exists(),
        "\n\nPREDEF BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the definition file before building.\n",
        path.display()
    );

    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nPREDEF BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    let doc: serde_json::Value =
        serde_json::from_str(contents.trim_start_matches('\u{feff}')).unwrap_or_else(|e| {
            panic!(
                "\n\nPREDEF BUILD ERROR: Invalid JSON\n\
                 Path: {}\n\
                 Error: {e}\n\
                 Hint: Check for missing commas, brackets, or invalid syntax.\n",
                path.display()
            );
        });

    validate_document_structure(&doc, path)
}

fn validate_document_structure(doc: &serde_json::Value, path: &Path) -> usize {
    assert!(
        doc.is_object(),
        "\n\nPREDEF BUILD ERROR: Root must be a JSON object\n\
         Path: {}\n",
        path.display()
    );

    let type_name = doc
        .get("TypeFullName")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_else(|| {
            panic!(
                "\n\nPREDEF BUILD ERROR: Missing 'TypeFullName' string\n\
                 Path: {}\n",
                path.display()
            );
        });

    let definitions = doc
        .get("Definitions")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "\n\nPREDEF BUILD ERROR: '{type_name}' is missing a 'Definitions' array\n\
                 Path: {}\n",
                path.display()
            );
        });

    let mut values = HashSet::new();
    for (i, entry) in definitions.iter().enumerate() {
        validate_entry_fields(entry, type_name, i);
        if let Some(value) = entry.get("Value").and_then(serde_json::Value::as_str) {
            assert!(
                values.insert(value),
                "\n\nPREDEF BUILD ERROR: '{type_name}' defines Value '{value}' more than once\n"
            );
        }
    }

    definitions.len()
}

fn validate_entry_fields(entry: &serde_json::Value, type_name: &str, index: usize) {
    let id = entry.get("Id").and_then(serde_json::Value::as_str);
    assert!(
        id.is_some_and(is_uuid_shaped),
        "\n\nPREDEF BUILD ERROR: '{type_name}' entry {index} has a missing or malformed 'Id'\n"
    );

    let value = entry.get("Value").and_then(serde_json::Value::as_str);
    assert!(
        value.is_some_and(|v| !v.trim().is_empty()),
        "\n\nPREDEF BUILD ERROR: '{type_name}' entry {index} has a missing or empty 'Value'\n"
    );
}

/// 8-4-4-4-12 hex digits
fn is_uuid_shaped(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the predefs change
    println!("cargo:rerun-if-changed={PREDEF_DIR}");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
