//! Recursive validation of the table (sub-form) kind.
//!
//! A table's decoded content is an ordered sequence of row objects, each
//! mapping a column name to a nested raw value of arbitrary kind. The kind
//! of each column is not embedded in the value itself; it is supplied by
//! the surrounding form's column definitions through the [`KindResolver`]
//! collaborator. Nested values re-enter the registry, so tables may nest
//! inside tables without limit in the schema itself; a configurable depth
//! cap guards against adversarially deep nesting.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

use crate::error::{ValidationError, ValidationResult};
use crate::kind::FieldKind;
use crate::registry::Registry;
use crate::value::TableRow;

/// External collaborator supplying the expected kind for each table column.
///
/// Implemented for plain maps from column name to kind; implement it
/// yourself when column definitions live elsewhere (e.g. a form schema
/// store).
pub trait KindResolver {
    /// Returns the kind expected for `column`, or `None` if the column is
    /// not part of the table's schema.
    fn kind_of(&self, column: &str) -> Option<FieldKind>;

    /// Returns the resolver for a nested table in `column`.
    ///
    /// Return `None` (the default) to reuse this resolver for the nested
    /// table's columns; return `Some` when nested tables have their own
    /// column namespace.
    fn resolver_for(&self, column: &str) -> Option<&dyn KindResolver> {
        let _ = column;
        None
    }
}

impl KindResolver for BTreeMap<String, FieldKind> {
    fn kind_of(&self, column: &str) -> Option<FieldKind> {
        self.get(column).copied()
    }
}

impl KindResolver for HashMap<String, FieldKind> {
    fn kind_of(&self, column: &str) -> Option<FieldKind> {
        self.get(column).copied()
    }
}

/// Resolver that knows no columns. Used when validation is invoked without
/// a resolver; any table cell then fails with `UNKNOWN_FIELD_KIND`.
pub(crate) struct NoColumns;

impl KindResolver for NoColumns {
    fn kind_of(&self, _column: &str) -> Option<FieldKind> {
        None
    }
}

/// Validate a table's decoded JSON content into typed rows.
///
/// `depth` is the table nesting level of this call (0 for a top-level
/// table). The first failing cell aborts validation of the whole table and
/// surfaces a path-qualified error.
pub(crate) fn validate_table(
    decoded: &Value,
    resolver: &dyn KindResolver,
    registry: &Registry,
    depth: usize,
) -> ValidationResult<Vec<TableRow>> {
    let max_depth = registry.config().max_table_depth;
    if depth >= max_depth {
        return Err(ValidationError::depth_exceeded(max_depth));
    }

    let rows = decoded.as_array().ok_or_else(|| {
        ValidationError::shape_mismatch("table content must decode to an array of row objects")
    })?;
    trace!(rows = rows.len(), depth, "validating table rows");

    let mut validated = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or_else(|| {
            ValidationError::shape_mismatch("table row must be an object").at_row(index)
        })?;

        let mut cells = TableRow::new();
        for (name, nested_raw) in object {
            let kind = resolver.kind_of(name).ok_or_else(|| {
                ValidationError::unresolved_column(name)
                    .at_column(name.clone())
                    .at_row(index)
            })?;
            let nested_resolver = resolver.resolver_for(name).unwrap_or(resolver);
            let value = registry
                .validate_at(kind, nested_raw, nested_resolver, depth + 1)
                .map_err(|e| e.at_column(name.clone()).at_row(index))?;
            cells.insert(name.clone(), value);
        }
        validated.push(cells);
    }
    Ok(validated)
}
