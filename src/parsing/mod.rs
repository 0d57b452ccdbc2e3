//! Reading and parsing reference-list definition documents.
//!
//! - [`source`]: where documents come from (embedded predefs, files, directories)
//! - [`document`]: JSON parsing into typed lists, collecting malformed-data violations
//!
//! ## Document Format
//!
//! ```json
//! {
//!   "TypeFullName": "CommandCentral.Entities.ReferenceLists.Watchbill.WatchShiftType",
//!   "Definitions": [
//!     {
//!       "Id": "858F6B78-5508-4A59-97A0-6E45AADAB2A9",
//!       "Value": "JOOD",
//!       "Description": "This watch shift is for JOODs.",
//!       "RequiredWatchQualifications": [ { "Id": "726A2088-AE51-4E41-B10A-952F0CBD73C3" } ]
//!     }
//!   ]
//! }
//! ```
//!
//! | Field | Description | Required |
//! |-------|-------------|----------|
//! | TypeFullName | Name of the list | Yes |
//! | Definitions | Ordered entries | Yes |
//! | Id | Entry UUID | Yes |
//! | Value | Entry label | Yes |
//! | Description | Free text | No |
//! | RequiredWatchQualifications | `{ "Id": ... }` references into the qualification source | No |
//!
//! A file may also hold a JSON array of such documents.

pub mod document;
pub mod source;
