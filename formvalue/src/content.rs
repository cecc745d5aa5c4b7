//! Content decoder: the JSON-within-JSON serialization boundary.
//!
//! Content-bearing kinds (image, attachment, table, countrySelect, address,
//! link, associationForm) carry their payload as a JSON-encoded *string*
//! rather than a native JSON value. Decoding that string is a separate step
//! from structural validation, so the two failure modes stay
//! distinguishable: a string that is not valid JSON is
//! `MALFORMED_CONTENT_ENCODING`, while valid JSON of the wrong shape is
//! `SHAPE_MISMATCH`. Kinds outside this set never pass through this module.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::error::{ValidationError, ValidationResult};
use crate::kind::FieldKind;
use crate::registry;
use crate::value::FieldValue;

/// Decode a content-bearing field's wire string into a JSON value.
///
/// The size cap is checked before any parsing.
///
/// # Errors
///
/// * `CONTENT_TOO_LARGE` if the string exceeds `config.max_content_bytes`.
/// * `MALFORMED_CONTENT_ENCODING` if the string is not valid JSON,
///   independent of whether the decoded shape is later accepted.
pub fn decode(kind: FieldKind, raw: &str, config: &ValidatorConfig) -> ValidationResult<Value> {
    if raw.len() > config.max_content_bytes {
        debug!(
            kind = %kind,
            size = raw.len(),
            max = config.max_content_bytes,
            "content exceeds size cap"
        );
        return Err(ValidationError::content_too_large(
            kind,
            raw.len(),
            config.max_content_bytes,
        ));
    }
    trace!(kind = %kind, bytes = raw.len(), "decoding content string");
    serde_json::from_str(raw).map_err(|e| {
        debug!(kind = %kind, error = %e, "content string is not valid JSON");
        ValidationError::malformed_encoding(kind, &e)
    })
}

/// Encode a validated content value back to its wire string.
///
/// Inverse of [`decode`] followed by structural validation: re-validating
/// the encoded string yields a value equal to `value` (round-trip law).
///
/// # Errors
///
/// Returns `SHAPE_MISMATCH` if `value` does not belong to `kind`.
pub fn encode(kind: FieldKind, value: &FieldValue) -> ValidationResult<String> {
    let payload = match (kind, value) {
        (FieldKind::Image, FieldValue::Image(items)) => to_json(kind, items)?,
        (FieldKind::Attachment, FieldValue::Attachment(items)) => to_json(kind, items)?,
        (FieldKind::Link, FieldValue::Link(items)) => to_json(kind, items)?,
        (FieldKind::AssociationForm, FieldValue::AssociationForm(items)) => to_json(kind, items)?,
        (FieldKind::Address, FieldValue::Address(content)) => to_json(kind, content)?,
        (FieldKind::CountrySelect, FieldValue::CountrySelect(records)) => to_json(kind, records)?,
        (FieldKind::Table, FieldValue::Table(rows)) => {
            let mut encoded_rows = Vec::with_capacity(rows.len());
            for row in rows {
                let mut object = serde_json::Map::with_capacity(row.len());
                for (name, cell) in row {
                    object.insert(name.clone(), registry::serialize(cell)?);
                }
                encoded_rows.push(Value::Object(object));
            }
            Value::Array(encoded_rows)
        }
        _ => {
            return Err(ValidationError::shape_mismatch(format!(
                "cannot encode a {} value as {} content",
                value.kind(),
                kind
            )))
        }
    };
    serde_json::to_string(&payload).map_err(|e| ValidationError::malformed_encoding(kind, &e))
}

fn to_json<T: serde::Serialize>(kind: FieldKind, payload: &T) -> ValidationResult<Value> {
    serde_json::to_value(payload).map_err(|e| ValidationError::malformed_encoding(kind, &e))
}
