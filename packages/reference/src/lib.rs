#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference data for encoding state and city names as model labels.
//!
//! The source document is a JSON object keyed by state name:
//!
//! ```json
//! {
//!   "Texas": { "le_state": 42, "cities": { "Austin": 3, "Dallas": 17 } },
//!   "Territories": {
//!     "Puerto Rico": { "le_state": 51, "cities": { "San Juan": 0 } }
//!   }
//! }
//! ```
//!
//! Objects carrying `cities` or `le_state` are states; any other object is
//! a grouping whose children are further states or groupings. The document
//! is parsed into a [`ReferenceTable`] tree that keeps the source key order,
//! and every lookup walks that tree in pre-order so ties resolve to the
//! first match in document order.

pub mod lookup;
pub mod table;

pub use lookup::{lookup_city_code, lookup_city_code_in_state, lookup_state_code};
pub use table::{CityEntry, ReferenceNode, ReferenceTable, StateEntry, StateGroup};

use thiserror::Error;

/// Errors from loading reference data.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// Reading the reference file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document does not follow the state/city schema.
    #[error("Schema error at {path}: {message}")]
    Schema {
        /// Key path of the offending node (e.g. `Texas.cities.Austin`).
        path: String,
        /// Description of the violation.
        message: String,
    },

    /// Two entries in the same scope share an encoded label.
    #[error("Duplicate code {code} in {scope}: '{first}' and '{second}'")]
    DuplicateCode {
        /// Scope the codes must be unique in (`states` or a state name).
        scope: String,
        /// The repeated label.
        code: u32,
        /// Name of the first entry holding the label.
        first: String,
        /// Name of the second entry holding the label.
        second: String,
    },
}
