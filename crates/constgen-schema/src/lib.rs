//! Constant-group schema for constgen.
//!
//! A schema describes families of named binary-format constants (DWARF tags,
//! attribute codes, forms, ...) as ordered groups sharing one field layout.
//! This crate loads the schema document and turns it into a typed model,
//! rejecting malformed shapes before any code is generated.
//!
//! # Schema format
//!
//! ```json
//! {
//!   "Tag": {
//!     "format": { "value": "uint16" },
//!     "values": [{ "Array": [1] }, { "Pointer": [15] }],
//!     "genCreateFromValue": true
//!   }
//! }
//! ```
//!
//! Group order, field order and entry order are all significant and are kept
//! exactly as written.

mod error;
mod schema;
mod validation;

pub use error::SchemaError;
pub use schema::{ConstantGroup, Field, Literal, SCHEMA_FILE_NAMES, Schema, VALUE_FIELD, ValueEntry};
pub use validation::is_identifier;
