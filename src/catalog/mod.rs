//! Loading, validating and querying reference lists.
//!
//! - [`loader`]: [`ReferenceListLoader`](loader::ReferenceListLoader) turns
//!   definition documents into a catalog or a batch of violations
//! - [`store`]: the immutable [`Catalog`](store::Catalog) and its indexes
//! - [`handle`]: [`CatalogHandle`](handle::CatalogHandle) publishes catalogs
//!   atomically for concurrent readers
//! - [`violation`]: everything a load can reject
//!
//! ## Example
//!
//! ```rust
//! use predef_catalog::catalog::loader::ReferenceListLoader;
//! use predef_catalog::parsing::source::SourceDocument;
//!
//! let doc = SourceDocument::new(
//!     "duty.json",
//!     r#"{"TypeFullName": "DutyStatus", "Definitions": [
//!         {"Id": "C06D1123-60D9-4F06-B4DE-DD15EAE724A2", "Value": "Active", "Description": "Active duty"}
//!     ]}"#,
//! );
//!
//! let catalog = ReferenceListLoader::default().load(&[doc]).unwrap();
//! let active = catalog.get_by_value("DutyStatus", "Active").unwrap();
//! assert_eq!(active.id.to_string(), "C06D1123-60D9-4F06-B4DE-DD15EAE724A2");
//! ```
//!
//! ## Embedded Predefs
//!
//! The predefined lists (account history types, duty statuses, watch
//! qualifications, watch shift types, watchbill statuses) are compiled in:
//!
//! ```rust
//! use predef_catalog::catalog::handle::CatalogHandle;
//! use predef_catalog::config::LoaderConfig;
//!
//! let handle = CatalogHandle::new();
//! let catalog = handle.reload_from_config(&LoaderConfig::default()).unwrap();
//! let jood = catalog.get_by_value("WatchShiftType", "JOOD").unwrap();
//! let quals = catalog.required_qualifications("WatchShiftType", jood.id).unwrap();
//! assert_eq!(quals[0].value, "JOOD");
//! ```

pub mod handle;
pub mod loader;
pub mod store;
pub mod violation;
