//! Centralized validation and helper functions.

/// Maximum number of entries allowed in a single list (DOS protection)
pub const MAX_ENTRIES_PER_LIST: usize = 10_000;

/// Maximum size of a single definition file read from disk
pub const MAX_DOCUMENT_BYTES: u64 = 4 * 1024 * 1024;

/// Maximum length of a `TypeFullName`
pub const MAX_TYPE_NAME_LENGTH: usize = 255;

/// Type-name validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("TypeFullName is empty")]
    EmptyTypeName,
    #[error("TypeFullName too long: exceeds {MAX_TYPE_NAME_LENGTH} characters")]
    TypeNameTooLong,
    #[error("TypeFullName contains whitespace or control characters")]
    InvalidTypeName,
}

/// Validate a list's `TypeFullName`.
///
/// Names are dotted identifiers such as `CommandCentral.Entities.ReferenceLists.DutyStatus`
/// or bare names such as `DutyStatus`. Whitespace inside the name is rejected
/// because it can never match a configured qualification source.
///
/// # Examples
///
/// ```
/// use predef_catalog::utils::validation::validate_type_name;
///
/// assert!(validate_type_name("DutyStatus").is_ok());
/// assert!(validate_type_name("   ").is_err());
/// assert!(validate_type_name("Duty Status").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyTypeName` for empty or blank names,
/// `ValidationError::TypeNameTooLong` if the name exceeds the limit, or
/// `ValidationError::InvalidTypeName` for embedded whitespace or control characters.
pub fn validate_type_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyTypeName);
    }

    if name.len() > MAX_TYPE_NAME_LENGTH {
        return Err(ValidationError::TypeNameTooLong);
    }

    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidTypeName);
    }

    Ok(())
}

/// Check if adding another entry would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new entry.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_entry_limit(count: usize) -> Option<String> {
    if count >= MAX_ENTRIES_PER_LIST {
        Some(format!(
            "Too many entries: adding another would exceed maximum of {MAX_ENTRIES_PER_LIST}"
        ))
    } else {
        None
    }
}

/// Compute a signature hash over an ordered sequence of canonical lines.
///
/// The lines are joined with newlines and hashed with MD5. Callers decide the
/// order; the same lines in the same order always give the same signature.
#[must_use]
pub fn compute_signature<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut context = md5::Context::new();
    for line in lines {
        context.consume(line.as_ref().as_bytes());
        context.consume(b"\n");
    }
    format!("{:x}", context.compute())
}

/// Make `field` safe for one TSV cell: tabs and line breaks become spaces.
#[must_use]
pub fn tsv_field(field: &str) -> std::borrow::Cow<'_, str> {
    let breaks_cell = |c: char| matches!(c, '\t' | '\n' | '\r');
    if field.contains(breaks_cell) {
        field
            .chars()
            .map(|c| if breaks_cell(c) { ' ' } else { c })
            .collect::<String>()
            .into()
    } else {
        field.into()
    }
}
