//! # predef-catalog
//!
//! A library for loading the predefined reference lists of a personnel and
//! watch-scheduling application: account history types, duty statuses, watch
//! qualifications, watch shift types and watchbill statuses.
//!
//! Each list is a JSON definition document naming its type and an ordered set
//! of entries with a stable UUID, a label and a description. Watch shift types
//! additionally name the watch qualifications a person must hold.
//!
//! `predef-catalog` turns a set of such documents into an immutable catalog,
//! or refuses the whole set and reports every problem in it.
//!
//! ## Features
//!
//! - **Batch validation**: Every malformed document, duplicate Id/Value and
//!   dangling reference is reported in one pass
//! - **Cross-list resolution**: Required qualifications are checked against a
//!   configurable source list
//! - **Atomic publication**: Catalogs are swapped in whole; failed reloads keep
//!   the previous catalog
//! - **Indexed lookup**: By Id or Value, with full or short list names
//!
//! ## Example
//!
//! ```rust
//! use predef_catalog::{CatalogHandle, LoaderConfig};
//!
//! let handle = CatalogHandle::new();
//! handle.reload_from_config(&LoaderConfig::default()).unwrap();
//!
//! let catalog = handle.snapshot().unwrap();
//! for entry in catalog.list("WatchbillStatus").unwrap() {
//!     println!("{}: {}", entry.value, entry.description);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Loader, immutable catalog and publication handle
//! - [`core`]: Core data types for lists and entries
//! - [`parsing`]: Document sources and the definition parser
//! - [`config`]: Loader configuration
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::handle::{CatalogHandle, ReloadError};
pub use catalog::loader::ReferenceListLoader;
pub use catalog::store::{Catalog, NotFound};
pub use catalog::violation::{LoadError, Violation};
pub use config::LoaderConfig;
pub use crate::core::entry::{QualificationRef, ReferenceEntry};
pub use crate::core::list::ReferenceList;
pub use crate::core::types::*;
pub use parsing::source::{DocumentSource, SourceDocument, SourceError};
