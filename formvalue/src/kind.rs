//! The closed set of field kinds.
//!
//! Every field in a form declares exactly one [`FieldKind`], and the kind
//! determines the wire shape its value must take. The set is closed:
//! adding a kind is a schema change, not a runtime extension point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Tag identifying one of the supported field types.
///
/// Wire tags are camelCase (`"multiSelect"`, `"cascadeDate"`, ...), matching
/// the form documents this crate validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Numeric value.
    Number,
    /// Single choice.
    Radio,
    /// Multiple choice.
    Checkbox,
    /// Rating, an integer in `[1, 100]`.
    Rate,
    /// Dropdown single select.
    Select,
    /// Dropdown multi select.
    MultiSelect,
    /// Cascading select.
    CascadeSelect,
    /// Single date.
    Date,
    /// Date range: exactly two timestamps (start, end).
    CascadeDate,
    /// Image upload.
    Image,
    /// File attachment.
    Attachment,
    /// Employee picker.
    Employee,
    /// Sub-form: rows of named cells, each cell any field kind.
    Table,
    /// Department picker.
    DepartmentSelect,
    /// Country/region picker.
    CountrySelect,
    /// Postal address.
    Address,
    /// Rich text.
    Editor,
    /// City picker.
    City,
    /// Hyperlink.
    Link,
    /// Reference to another form instance.
    AssociationForm,
}

impl FieldKind {
    /// Every kind in the registry, in declaration order.
    pub const ALL: [FieldKind; 22] = [
        Self::Text,
        Self::TextArea,
        Self::Number,
        Self::Radio,
        Self::Checkbox,
        Self::Rate,
        Self::Select,
        Self::MultiSelect,
        Self::CascadeSelect,
        Self::Date,
        Self::CascadeDate,
        Self::Image,
        Self::Attachment,
        Self::Employee,
        Self::Table,
        Self::DepartmentSelect,
        Self::CountrySelect,
        Self::Address,
        Self::Editor,
        Self::City,
        Self::Link,
        Self::AssociationForm,
    ];

    /// Returns the wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textArea",
            Self::Number => "number",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Rate => "rate",
            Self::Select => "select",
            Self::MultiSelect => "multiSelect",
            Self::CascadeSelect => "cascadeSelect",
            Self::Date => "date",
            Self::CascadeDate => "cascadeDate",
            Self::Image => "image",
            Self::Attachment => "attachment",
            Self::Employee => "employee",
            Self::Table => "table",
            Self::DepartmentSelect => "departmentSelect",
            Self::CountrySelect => "countrySelect",
            Self::Address => "address",
            Self::Editor => "editor",
            Self::City => "city",
            Self::Link => "link",
            Self::AssociationForm => "associationForm",
        }
    }

    /// Returns true if this kind's wire value is a JSON-encoded string
    /// rather than a native JSON value.
    ///
    /// These kinds pass through the content decoder before structural
    /// validation, and are re-encoded on the way out.
    pub fn is_content_encoded(&self) -> bool {
        matches!(
            self,
            Self::Image
                | Self::Attachment
                | Self::Table
                | Self::CountrySelect
                | Self::Address
                | Self::Link
                | Self::AssociationForm
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ValidationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ValidationError::unknown_kind(tag))
    }
}
