use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A closed set of field types accepted in one schema context.
pub trait FieldKind: Copy + Sized + fmt::Debug + 'static {
    /// Every accepted variant, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == value)
    }

    /// Comma separated list of accepted names, used in error messages.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Field types allowed inside a slice schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceFieldType {
    Text,
    RichText,
    Number,
    Boolean,
    Image,
    Group,
    Select,
    Date,
}

impl FieldKind for SliceFieldType {
    const ALL: &'static [Self] = &[
        Self::Text,
        Self::RichText,
        Self::Number,
        Self::Boolean,
        Self::Image,
        Self::Group,
        Self::Select,
        Self::Date,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Image => "image",
            Self::Group => "group",
            Self::Select => "select",
            Self::Date => "date",
        }
    }
}

/// Field types allowed inside a content type schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypeFieldType {
    Text,
    Uid,
    Boolean,
    Number,
    Date,
    Select,
}

impl FieldKind for ContentTypeFieldType {
    const ALL: &'static [Self] = &[
        Self::Text,
        Self::Uid,
        Self::Boolean,
        Self::Number,
        Self::Date,
        Self::Select,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Uid => "uid",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
        }
    }
}

/// One field of a schema, parameterised by the type set of its context.
///
/// `config` is an open bag of editor hints (placeholders, options, ...);
/// its contents are not interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor<K> {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: K,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

pub type SliceField = FieldDescriptor<SliceFieldType>;
pub type ContentTypeField = FieldDescriptor<ContentTypeFieldType>;

impl<K: FieldKind> FieldDescriptor<K> {
    pub fn new(id: impl Into<String>, field_type: K, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            config: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
