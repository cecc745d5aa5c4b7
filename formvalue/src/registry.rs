//! Field Type Registry: the single dispatch table from kind to shape.
//!
//! The registry maps every [`FieldKind`] to its wire-shape contract
//! ([`shape_for`]) and applies that contract to raw input
//! ([`Registry::validate`]). Validation is a pure function of
//! `(kind, raw value)` plus the configured resource caps; there is no
//! mutable state, so one registry may be shared by any number of
//! concurrent callers.
//!
//! Data flow: raw value → content decode (only for JSON-string-encoded
//! kinds) → structural check for the kind → recursive re-entry per table
//! cell. [`serialize`] is the inverse, re-encoding content payloads to
//! JSON strings on the way out.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::content;
use crate::error::{ValidationError, ValidationResult};
use crate::kind::FieldKind;
use crate::table::{self, KindResolver, NoColumns};
use crate::value::{
    AddressContent, AssociationFormContent, AttachmentContent, FieldValue, ImageContent,
    LinkContent,
};

/// The wire-shape contract for a field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeSpec {
    /// A native JSON string.
    Text,
    /// A native JSON number.
    Float,
    /// A native JSON integer within an inclusive range.
    BoundedInt {
        /// Lower bound, inclusive.
        min: i64,
        /// Upper bound, inclusive.
        max: i64,
    },
    /// A native JSON array of strings.
    StringList,
    /// Either a single string or an array of strings.
    StringOrStringList,
    /// An ISO-8601 timestamp string.
    Timestamp,
    /// Exactly two ISO-8601 timestamp strings.
    TimestampPair,
    /// A JSON-encoded string that decodes to the given content shape.
    Encoded(ContentShape),
}

/// Structural shape of a content-bearing kind's decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    /// Sequence of image records.
    ImageList,
    /// Sequence of attachment records.
    AttachmentList,
    /// Sequence of link records.
    LinkList,
    /// Sequence of association-form records.
    AssociationFormList,
    /// A single address record.
    Address,
    /// Sequence of free-form records (intentionally unconstrained).
    FreeformRecords,
    /// Sequence of row objects mapping column names to nested values.
    TableRows,
}

/// Returns the wire-shape contract for a kind.
///
/// This is the single source of truth the decoder and validator consult;
/// it is total over the closed [`FieldKind`] set.
pub fn shape_for(kind: FieldKind) -> ShapeSpec {
    match kind {
        FieldKind::Text
        | FieldKind::TextArea
        | FieldKind::Radio
        | FieldKind::Select
        | FieldKind::Editor => ShapeSpec::Text,
        FieldKind::Number => ShapeSpec::Float,
        FieldKind::Rate => ShapeSpec::BoundedInt { min: 1, max: 100 },
        FieldKind::Checkbox
        | FieldKind::MultiSelect
        | FieldKind::CascadeSelect
        | FieldKind::Employee
        | FieldKind::City => ShapeSpec::StringList,
        FieldKind::DepartmentSelect => ShapeSpec::StringOrStringList,
        FieldKind::Date => ShapeSpec::Timestamp,
        FieldKind::CascadeDate => ShapeSpec::TimestampPair,
        FieldKind::Image => ShapeSpec::Encoded(ContentShape::ImageList),
        FieldKind::Attachment => ShapeSpec::Encoded(ContentShape::AttachmentList),
        FieldKind::Link => ShapeSpec::Encoded(ContentShape::LinkList),
        FieldKind::AssociationForm => ShapeSpec::Encoded(ContentShape::AssociationFormList),
        FieldKind::Address => ShapeSpec::Encoded(ContentShape::Address),
        FieldKind::CountrySelect => ShapeSpec::Encoded(ContentShape::FreeformRecords),
        FieldKind::Table => ShapeSpec::Encoded(ContentShape::TableRows),
    }
}

/// Stateless validator over the closed field-kind set.
///
/// # Example
/// ```rust,ignore
/// use formvalue::{FieldKind, FieldValue, Registry};
/// use serde_json::json;
///
/// let registry = Registry::new();
/// let value = registry.validate(FieldKind::Rate, &json!(87))?;
/// assert_eq!(value, FieldValue::Rate(87));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    config: ValidatorConfig,
}

impl Registry {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with custom resource caps.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The resource caps in effect.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a raw wire value against a kind's contract.
    ///
    /// The raw value must already be JSON-decoded at the outer document
    /// layer (a string, number, boolean, array, or object). For the table
    /// kind use [`Registry::validate_with_resolver`]; without a resolver
    /// every table cell fails with `UNKNOWN_FIELD_KIND`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first failure; there is
    /// no partial success.
    pub fn validate(&self, kind: FieldKind, raw: &Value) -> ValidationResult<FieldValue> {
        self.validate_at(kind, raw, &NoColumns, 0)
    }

    /// Validate a raw wire value, resolving table columns through `resolver`.
    pub fn validate_with_resolver(
        &self,
        kind: FieldKind,
        raw: &Value,
        resolver: &dyn KindResolver,
    ) -> ValidationResult<FieldValue> {
        self.validate_at(kind, raw, resolver, 0)
    }

    /// Validation entry point shared with the table validator; `depth` is
    /// the current table nesting level.
    pub(crate) fn validate_at(
        &self,
        kind: FieldKind,
        raw: &Value,
        resolver: &dyn KindResolver,
        depth: usize,
    ) -> ValidationResult<FieldValue> {
        trace!(kind = %kind, depth, "validating field value");
        let result = self.dispatch(kind, raw, resolver, depth);
        if let Err(error) = &result {
            debug!(kind = %kind, code = %error.code, depth, "field validation failed");
        }
        result
    }

    fn dispatch(
        &self,
        kind: FieldKind,
        raw: &Value,
        resolver: &dyn KindResolver,
        depth: usize,
    ) -> ValidationResult<FieldValue> {
        match kind {
            FieldKind::Text => expect_string(kind, raw).map(FieldValue::Text),
            FieldKind::TextArea => expect_string(kind, raw).map(FieldValue::TextArea),
            FieldKind::Radio => expect_string(kind, raw).map(FieldValue::Radio),
            FieldKind::Select => expect_string(kind, raw).map(FieldValue::Select),
            FieldKind::Editor => expect_string(kind, raw).map(FieldValue::Editor),
            FieldKind::Number => expect_number(kind, raw).map(FieldValue::Number),
            FieldKind::Rate => {
                let n = expect_integer(kind, raw)?;
                if let ShapeSpec::BoundedInt { min, max } = shape_for(kind) {
                    if n < min || n > max {
                        return Err(ValidationError::constraint(format!(
                            "{} must be between {} and {}, got {}",
                            kind, min, max, n
                        )));
                    }
                }
                Ok(FieldValue::Rate(n))
            }
            FieldKind::Checkbox => expect_string_list(kind, raw).map(FieldValue::Checkbox),
            FieldKind::MultiSelect => expect_string_list(kind, raw).map(FieldValue::MultiSelect),
            FieldKind::CascadeSelect => {
                expect_string_list(kind, raw).map(FieldValue::CascadeSelect)
            }
            FieldKind::Employee => expect_string_list(kind, raw).map(FieldValue::Employee),
            FieldKind::City => expect_string_list(kind, raw).map(FieldValue::City),
            FieldKind::DepartmentSelect => {
                // Single-select departments arrive as a bare string.
                if let Some(id) = raw.as_str() {
                    Ok(FieldValue::DepartmentSelect(vec![id.to_owned()]))
                } else {
                    expect_string_list(kind, raw).map(FieldValue::DepartmentSelect)
                }
            }
            FieldKind::Date => parse_timestamp(kind, raw).map(FieldValue::Date),
            FieldKind::CascadeDate => {
                let items = raw.as_array().ok_or_else(|| {
                    ValidationError::shape_mismatch(format!(
                        "{} expects a 2-element array of timestamps, got {}",
                        kind,
                        json_type_name(raw)
                    ))
                })?;
                if items.len() != 2 {
                    return Err(ValidationError::shape_mismatch(format!(
                        "{} expects exactly 2 timestamps, got {}",
                        kind,
                        items.len()
                    )));
                }
                let start = parse_timestamp(kind, &items[0])?;
                let end = parse_timestamp(kind, &items[1])?;
                Ok(FieldValue::CascadeDate([start, end]))
            }
            FieldKind::Image => {
                let decoded = self.decode_content(kind, raw)?;
                from_content::<Vec<ImageContent>>(kind, decoded).map(FieldValue::Image)
            }
            FieldKind::Attachment => {
                let decoded = self.decode_content(kind, raw)?;
                from_content::<Vec<AttachmentContent>>(kind, decoded).map(FieldValue::Attachment)
            }
            FieldKind::Link => {
                let decoded = self.decode_content(kind, raw)?;
                from_content::<Vec<LinkContent>>(kind, decoded).map(FieldValue::Link)
            }
            FieldKind::AssociationForm => {
                let decoded = self.decode_content(kind, raw)?;
                from_content::<Vec<AssociationFormContent>>(kind, decoded)
                    .map(FieldValue::AssociationForm)
            }
            FieldKind::Address => {
                let decoded = self.decode_content(kind, raw)?;
                from_content::<AddressContent>(kind, decoded).map(FieldValue::Address)
            }
            FieldKind::CountrySelect => {
                let decoded = self.decode_content(kind, raw)?;
                from_content::<Vec<serde_json::Map<String, Value>>>(kind, decoded)
                    .map(FieldValue::CountrySelect)
            }
            FieldKind::Table => {
                let decoded = self.decode_content(kind, raw)?;
                table::validate_table(&decoded, resolver, self, depth).map(FieldValue::Table)
            }
        }
    }

    fn decode_content(&self, kind: FieldKind, raw: &Value) -> ValidationResult<Value> {
        let encoded = raw.as_str().ok_or_else(|| {
            ValidationError::shape_mismatch(format!(
                "{} content must arrive as a JSON-encoded string, got {}",
                kind,
                json_type_name(raw)
            ))
        })?;
        content::decode(kind, encoded, &self.config)
    }
}

/// Serialize a validated value back to its raw wire form.
///
/// Inverse of [`Registry::validate`]: content-bearing payloads are
/// re-encoded to JSON strings, everything else becomes its native JSON
/// value. Round trip is lossless for any successfully validated value.
pub fn serialize(value: &FieldValue) -> ValidationResult<Value> {
    let raw = match value {
        FieldValue::Text(s)
        | FieldValue::TextArea(s)
        | FieldValue::Radio(s)
        | FieldValue::Select(s)
        | FieldValue::Editor(s) => Value::String(s.clone()),
        FieldValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .ok_or_else(|| ValidationError::constraint("number must be finite"))?,
        FieldValue::Rate(n) => Value::from(*n),
        FieldValue::Checkbox(items)
        | FieldValue::MultiSelect(items)
        | FieldValue::CascadeSelect(items)
        | FieldValue::Employee(items)
        | FieldValue::City(items)
        | FieldValue::DepartmentSelect(items) => string_array(items),
        FieldValue::Date(ts) => Value::String(ts.to_rfc3339()),
        FieldValue::CascadeDate([start, end]) => Value::Array(vec![
            Value::String(start.to_rfc3339()),
            Value::String(end.to_rfc3339()),
        ]),
        FieldValue::Image(_)
        | FieldValue::Attachment(_)
        | FieldValue::Table(_)
        | FieldValue::CountrySelect(_)
        | FieldValue::Address(_)
        | FieldValue::Link(_)
        | FieldValue::AssociationForm(_) => {
            Value::String(content::encode(value.kind(), value)?)
        }
    };
    Ok(raw)
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn from_content<T: DeserializeOwned>(kind: FieldKind, decoded: Value) -> ValidationResult<T> {
    serde_json::from_value(decoded).map_err(|e| {
        ValidationError::shape_mismatch(format!("{} content has unexpected shape: {}", kind, e))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_string(kind: FieldKind, raw: &Value) -> ValidationResult<String> {
    raw.as_str().map(str::to_owned).ok_or_else(|| {
        ValidationError::shape_mismatch(format!(
            "{} expects a string, got {}",
            kind,
            json_type_name(raw)
        ))
    })
}

fn expect_number(kind: FieldKind, raw: &Value) -> ValidationResult<f64> {
    raw.as_f64().ok_or_else(|| {
        ValidationError::shape_mismatch(format!(
            "{} expects a number, got {}",
            kind,
            json_type_name(raw)
        ))
    })
}

fn expect_integer(kind: FieldKind, raw: &Value) -> ValidationResult<i64> {
    raw.as_i64().ok_or_else(|| {
        let got = if raw.is_number() {
            "a non-integer number"
        } else {
            json_type_name(raw)
        };
        ValidationError::shape_mismatch(format!("{} expects an integer, got {}", kind, got))
    })
}

fn expect_string_list(kind: FieldKind, raw: &Value) -> ValidationResult<Vec<String>> {
    let items = raw.as_array().ok_or_else(|| {
        ValidationError::shape_mismatch(format!(
            "{} expects an array of strings, got {}",
            kind,
            json_type_name(raw)
        ))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                ValidationError::shape_mismatch(format!(
                    "{} expects an array of strings, element {} is {}",
                    kind,
                    i,
                    json_type_name(item)
                ))
            })
        })
        .collect()
}

fn parse_timestamp(kind: FieldKind, raw: &Value) -> ValidationResult<DateTime<FixedOffset>> {
    let text = raw.as_str().ok_or_else(|| {
        ValidationError::shape_mismatch(format!(
            "{} expects an ISO-8601 timestamp string, got {}",
            kind,
            json_type_name(raw)
        ))
    })?;
    // Offset-less timestamps are read as UTC, matching the permissive
    // parsing of the documents this schema ingests.
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc().fixed_offset())
        })
        .map_err(|_| {
            ValidationError::shape_mismatch(format!(
                "{} expects an ISO-8601 timestamp, got '{}'",
                kind, text
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_table_agrees_with_content_encoding() {
        for kind in FieldKind::ALL {
            let encoded = matches!(shape_for(kind), ShapeSpec::Encoded(_));
            assert_eq!(
                encoded,
                kind.is_content_encoded(),
                "shape/encoding disagree for {}",
                kind
            );
        }
    }

    #[test]
    fn test_rate_bounds_in_shape_table() {
        assert_eq!(
            shape_for(FieldKind::Rate),
            ShapeSpec::BoundedInt { min: 1, max: 100 }
        );
    }
}
