//! Typed field values and their Content records.
//!
//! A [`FieldValue`] is constructed from raw wire input at ingest time,
//! validated once, and is thereafter immutable: any edit re-enters as a new
//! raw value requiring re-validation. The `Table` variant makes the union
//! self-referential; the row vector provides the heap indirection that keeps
//! the type definition finite despite unbounded logical depth.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::kind::FieldKind;

/// One row of a table field: a mapping from column name to a nested value.
pub type TableRow = BTreeMap<String, FieldValue>;

/// A validated field value, tagged by [`FieldKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Single-line text.
    Text(String),
    /// Multi-line text.
    TextArea(String),
    /// Numeric value.
    Number(f64),
    /// Single choice.
    Radio(String),
    /// Multiple choice.
    Checkbox(Vec<String>),
    /// Rating in `[1, 100]`.
    Rate(i64),
    /// Dropdown single select.
    Select(String),
    /// Dropdown multi select.
    MultiSelect(Vec<String>),
    /// Cascading select path.
    CascadeSelect(Vec<String>),
    /// Single timestamp.
    Date(DateTime<FixedOffset>),
    /// Date range: start and end timestamps. The schema does not order them.
    CascadeDate([DateTime<FixedOffset>; 2]),
    /// Uploaded images.
    Image(Vec<ImageContent>),
    /// File attachments.
    Attachment(Vec<AttachmentContent>),
    /// Employee identifiers.
    Employee(Vec<String>),
    /// Sub-form rows. Nested values may themselves be tables.
    Table(Vec<TableRow>),
    /// Department identifiers. A single-select department arrives on the
    /// wire as a bare string and is normalized to a one-element list.
    DepartmentSelect(Vec<String>),
    /// Country/region records, intentionally free-form.
    CountrySelect(Vec<serde_json::Map<String, Value>>),
    /// Postal address.
    Address(AddressContent),
    /// Rich text.
    Editor(String),
    /// City identifiers.
    City(Vec<String>),
    /// Hyperlinks.
    Link(Vec<LinkContent>),
    /// References to other form instances.
    AssociationForm(Vec<AssociationFormContent>),
}

impl FieldValue {
    /// Returns the kind this value belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::TextArea(_) => FieldKind::TextArea,
            Self::Number(_) => FieldKind::Number,
            Self::Radio(_) => FieldKind::Radio,
            Self::Checkbox(_) => FieldKind::Checkbox,
            Self::Rate(_) => FieldKind::Rate,
            Self::Select(_) => FieldKind::Select,
            Self::MultiSelect(_) => FieldKind::MultiSelect,
            Self::CascadeSelect(_) => FieldKind::CascadeSelect,
            Self::Date(_) => FieldKind::Date,
            Self::CascadeDate(_) => FieldKind::CascadeDate,
            Self::Image(_) => FieldKind::Image,
            Self::Attachment(_) => FieldKind::Attachment,
            Self::Employee(_) => FieldKind::Employee,
            Self::Table(_) => FieldKind::Table,
            Self::DepartmentSelect(_) => FieldKind::DepartmentSelect,
            Self::CountrySelect(_) => FieldKind::CountrySelect,
            Self::Address(_) => FieldKind::Address,
            Self::Editor(_) => FieldKind::Editor,
            Self::City(_) => FieldKind::City,
            Self::Link(_) => FieldKind::Link,
            Self::AssociationForm(_) => FieldKind::AssociationForm,
        }
    }
}

/// One uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    /// Preview (thumbnail) URL.
    pub preview_url: String,
    /// Size in bytes.
    pub size: u64,
    /// File name.
    pub name: String,
    /// Download URL.
    pub download_url: String,
    /// Canonical URL.
    pub url: String,
}

/// One file attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentContent {
    /// Download URL.
    pub download_url: String,
    /// File name.
    pub name: String,
    /// Preview URL.
    pub preview_url: String,
    /// Canonical URL.
    pub url: String,
    /// File extension.
    pub ext: String,
}

/// Localized label for one administrative region level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLabel {
    /// English label.
    #[serde(rename = "en_US")]
    pub en_us: String,
    /// Simplified Chinese label.
    #[serde(rename = "zh_CN")]
    pub zh_cn: String,
}

/// A postal address.
///
/// `region_ids` and `region_text` are expected to correspond positionally
/// (one entry per administrative level); the schema does not enforce equal
/// length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressContent {
    /// Free-text street address.
    pub address: String,
    /// Region identifiers, outermost level first.
    pub region_ids: Vec<String>,
    /// Localized region labels, one per level.
    pub region_text: Vec<RegionLabel>,
}

/// One hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkContent {
    /// Target URL.
    pub link: String,
    /// Display label.
    pub text: String,
}

/// Reference to another form instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationFormContent {
    /// Application type.
    pub app_type: String,
    /// UUID of the referenced form definition.
    pub form_uuid: String,
    /// Form type; defaults to `"receipt"` when absent on the wire.
    #[serde(default = "default_form_type")]
    pub form_type: String,
    /// Identifier of the referenced form instance.
    pub instance_id: String,
    /// Title of the referenced instance.
    pub title: String,
    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
}

fn default_form_type() -> String {
    "receipt".to_string()
}
