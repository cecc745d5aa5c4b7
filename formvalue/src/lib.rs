#![warn(missing_docs)]
//! # formvalue
//!
//! Typed field-value schema for a form-centric data platform.
//!
//! ## Overview
//!
//! Forms on the platform are built from a closed set of field kinds (text,
//! number, rating, date range, image upload, address, sub-table, ...). This
//! crate defines, for each kind, the exact shape a submitted value must
//! take, and validates/normalizes raw wire input into an immutable typed
//! value:
//!
//! - [`FieldKind`] — the closed registry of kinds.
//! - [`Registry`] — validates `(kind, raw value)` into a [`FieldValue`];
//!   [`serialize`] is the inverse.
//! - [`content`] — the JSON-within-JSON boundary: some kinds carry their
//!   payload as a JSON-encoded *string* that must be decoded before
//!   structural checks and re-encoded on output.
//! - [`KindResolver`] — collaborator contract resolving table column names
//!   to kinds, enabling the recursive sub-form kind.
//!
//! ## Data flow
//!
//! ```text
//! raw wire value ──► content decode (encoded kinds only)
//!                       │
//!                       ▼
//!                 structural check for the kind
//!                       │
//!                       ▼ (table kind)
//!                 per-cell recursion through the registry
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use formvalue::{FieldKind, FieldValue, Registry, serialize};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//!
//! let value = registry.validate(FieldKind::Rate, &json!(87))?;
//! assert_eq!(value, FieldValue::Rate(87));
//!
//! // Content-bearing kinds arrive as JSON-encoded strings.
//! let raw = json!("[{\"link\":\"https://example.com\",\"text\":\"home\"}]");
//! let link = registry.validate(FieldKind::Link, &raw)?;
//! assert_eq!(serialize(&link)?, raw);
//! ```
//!
//! ## Tables
//!
//! The table kind's content is a list of rows, each row mapping a column
//! name to a nested value of arbitrary kind, including nested tables. The
//! expected kind per column comes from the surrounding form's column
//! definitions via [`KindResolver`]:
//!
//! ```rust,ignore
//! use std::collections::BTreeMap;
//! use formvalue::{FieldKind, Registry};
//! use serde_json::json;
//!
//! let columns: BTreeMap<String, FieldKind> =
//!     [("col1".to_string(), FieldKind::Text)].into();
//! let raw = json!("[{\"col1\":\"hello\"}]");
//! let table = Registry::new().validate_with_resolver(FieldKind::Table, &raw, &columns)?;
//! ```
//!
//! ## Errors
//!
//! Every failure is a single [`ValidationError`] with a typed
//! [`ErrorCode`] and, for failures inside table cells, a row/column
//! [`FieldPath`]. A field either validates completely or yields one error;
//! this layer never repairs input.
//!
//! ## Concurrency
//!
//! All operations are pure, synchronous transformations with no shared
//! mutable state; values are immutable once validated. The only resource
//! policy is [`ValidatorConfig`]'s depth and size caps.

pub mod config;
pub mod content;
pub mod error;
pub mod kind;
pub mod registry;
pub mod table;
pub mod value;

mod tests;

pub use config::{
    ConfigValidationError, ValidatorConfig, DEFAULT_MAX_CONTENT_BYTES, DEFAULT_MAX_TABLE_DEPTH,
};
pub use error::{ErrorCode, FieldPath, PathSegment, ValidationError, ValidationResult};
pub use kind::FieldKind;
pub use registry::{serialize, shape_for, ContentShape, Registry, ShapeSpec};
pub use table::KindResolver;
pub use value::{
    AddressContent, AssociationFormContent, AttachmentContent, FieldValue, ImageContent,
    LinkContent, RegionLabel, TableRow,
};
