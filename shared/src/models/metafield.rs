//! Metafield Model

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Wire name used when a type is missing or unrecognized
pub const DEFAULT_TYPE_NAME: &str = "single_line_text_field";

/// Namespace given to entries the operator left without one
pub const DEFAULT_NAMESPACE: &str = "custom";

/// Key given to entries the operator left without one
pub const DEFAULT_KEY: &str = "key";

/// `namespace.key` identity shared by definitions and stored values
pub fn identity(namespace: &str, key: &str) -> String {
    format!("{namespace}.{key}")
}

// =============================================================================
// AttributeType
// =============================================================================

/// Closed set of attribute types
///
/// Unknown type strings parse as [`AttributeType::Text`]. Lists nest one
/// level deep; a list of lists is unknown too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    #[default]
    Text,
    MultilineText,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Json,
    Color,
    FileReference,
    ProductReference,
    CollectionReference,
    VariantReference,
    /// `list.<item>`; a list of file references is `List(FileReference)`
    List(Box<AttributeType>),
}

impl AttributeType {
    /// Parse a remote type name, case-insensitively
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.strip_prefix("list.") {
            Some(item) if item.is_empty() || item.starts_with("list.") => Self::Text,
            Some(item) => Self::List(Box::new(Self::parse_scalar(item))),
            None => Self::parse_scalar(&name),
        }
    }

    fn parse_scalar(name: &str) -> Self {
        match name {
            "multi_line_text_field" => Self::MultilineText,
            "number_integer" => Self::Integer,
            "number_decimal" => Self::Decimal,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "date_time" => Self::DateTime,
            "json" => Self::Json,
            "color" => Self::Color,
            "file_reference" => Self::FileReference,
            "product_reference" => Self::ProductReference,
            "collection_reference" => Self::CollectionReference,
            "variant_reference" => Self::VariantReference,
            _ => Self::Text,
        }
    }

    /// Remote type name
    pub fn wire_name(&self) -> Cow<'static, str> {
        let name = match self {
            Self::Text => DEFAULT_TYPE_NAME,
            Self::MultilineText => "multi_line_text_field",
            Self::Integer => "number_integer",
            Self::Decimal => "number_decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::Json => "json",
            Self::Color => "color",
            Self::FileReference => "file_reference",
            Self::ProductReference => "product_reference",
            Self::CollectionReference => "collection_reference",
            Self::VariantReference => "variant_reference",
            Self::List(item) => return Cow::Owned(format!("list.{}", item.wire_name())),
        };
        Cow::Borrowed(name)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Item type of a list type
    pub fn item_type(&self) -> Option<&AttributeType> {
        match self {
            Self::List(item) => Some(item),
            _ => None,
        }
    }

    /// Single file reference or list of file references
    pub fn is_file_reference(&self) -> bool {
        match self {
            Self::FileReference => true,
            Self::List(item) => **item == Self::FileReference,
            _ => false,
        }
    }

    /// Resource kind picked through the host resource picker
    pub fn reference_kind(&self) -> Option<ReferenceKind> {
        match self {
            Self::ProductReference => Some(ReferenceKind::Product),
            Self::CollectionReference => Some(ReferenceKind::Collection),
            Self::VariantReference => Some(ReferenceKind::Variant),
            _ => None,
        }
    }
}

impl From<&str> for AttributeType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for AttributeType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<AttributeType> for String {
    fn from(ty: AttributeType) -> Self {
        ty.wire_name().into_owned()
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_name())
    }
}

/// Resource kinds offered by the host resource picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Product,
    Collection,
    Variant,
}

impl ReferenceKind {
    /// Resource type name understood by the host picker
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Collection => "collection",
            Self::Variant => "variant",
        }
    }
}

/// Owner resource of a metafield definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerType {
    #[default]
    Product,
    #[serde(rename = "PRODUCTVARIANT")]
    ProductVariant,
    Collection,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "PRODUCT",
            Self::ProductVariant => "PRODUCTVARIANT",
            Self::Collection => "COLLECTION",
        }
    }
}

// =============================================================================
// Definitions and values
// =============================================================================

/// Validation attached to a definition (e.g. `choices`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionValidation {
    pub name: String,
    pub value: Option<String>,
}

/// One selectable value of a choice-constrained text attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Shop-level declaration of an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub namespace: String,
    pub key: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub ty: AttributeType,
    #[serde(default)]
    pub validations: Vec<DefinitionValidation>,
}

impl AttributeDefinition {
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        display_name: impl Into<String>,
        ty: AttributeType,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            display_name: display_name.into(),
            ty,
            validations: Vec::new(),
        }
    }

    pub fn identity(&self) -> String {
        identity(&self.namespace, &self.key)
    }

    /// Choices declared by a `choices` validation
    ///
    /// Accepts a JSON array of strings, an array of `{value, label}`
    /// objects, or an object mapping value to label. Returns `None`
    /// when absent, malformed or empty.
    pub fn choices(&self) -> Option<Vec<Choice>> {
        let raw = self
            .validations
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case("choices"))?
            .value
            .as_deref()?;

        let parsed: serde_json::Value = serde_json::from_str(raw).ok()?;
        let choices: Vec<Choice> = match parsed {
            serde_json::Value::Array(items) => items.iter().filter_map(choice_from_item).collect(),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(value, label)| {
                    let label = match label {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => value.clone(),
                        other => other.to_string(),
                    };
                    Choice { value, label }
                })
                .collect(),
            _ => return None,
        };

        (!choices.is_empty()).then_some(choices)
    }
}

fn choice_from_item(item: &serde_json::Value) -> Option<Choice> {
    match item {
        serde_json::Value::String(s) => Some(Choice {
            value: s.clone(),
            label: s.clone(),
        }),
        serde_json::Value::Object(obj) => {
            let value = obj.get("value").and_then(|v| v.as_str());
            let label = obj.get("label").and_then(|v| v.as_str());
            let value = value.or(label)?;
            Some(Choice {
                value: value.to_string(),
                label: label.unwrap_or(value).to_string(),
            })
        }
        _ => None,
    }
}

/// Stored attribute value on a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// `None` when the record has no stored value yet
    pub id: Option<String>,
    pub namespace: String,
    pub key: String,
    #[serde(rename = "value")]
    pub raw_value: String,
    #[serde(rename = "type")]
    pub ty: AttributeType,
}

impl AttributeValue {
    pub fn identity(&self) -> String {
        identity(&self.namespace, &self.key)
    }
}

// =============================================================================
// Edit model
// =============================================================================

/// One row of the edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableEntry {
    pub id: Option<String>,
    pub namespace: String,
    pub key: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub value: String,
}

impl EditableEntry {
    /// Blank row added by the operator
    pub fn blank() -> Self {
        Self {
            id: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            key: String::new(),
            display_name: String::new(),
            ty: AttributeType::Text,
            value: String::new(),
        }
    }

    pub fn identity(&self) -> String {
        identity(&self.namespace, &self.key)
    }

    /// Identity the entry is written under once blank namespace/key take their defaults
    pub fn written_identity(&self) -> String {
        identity(
            or_default(&self.namespace, DEFAULT_NAMESPACE),
            or_default(&self.key, DEFAULT_KEY),
        )
    }
}

/// Trimmed `value`, or `default` when blank
pub(crate) fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        trimmed => trimmed,
    }
}

/// Wire-ready write unit; `value` has passed type validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteCandidate {
    pub owner_id: String,
    pub namespace: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub ty: AttributeType,
}
