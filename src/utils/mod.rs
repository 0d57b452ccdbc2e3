//! Shared helpers used by the parser and the catalog.

pub mod validation;
