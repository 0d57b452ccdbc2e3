//! Core data types for predefined reference lists.
//!
//! - [`TypeName`]: the `TypeFullName` naming a list
//! - [`EntryId`]: the stable UUID of an entry
//! - [`ReferenceEntry`]: one identified, described value
//! - [`QualificationRef`]: a reference to an entry of another list
//! - [`ReferenceList`]: an ordered list of entries for one type
//!
//! ## Identifiers
//!
//! Identifiers are compared as UUIDs, not as text. The predefined lists mix
//! `858F6B78-...` and `1095a185-...` spellings; both parse to the same value.

pub mod entry;
pub mod list;
pub mod types;
