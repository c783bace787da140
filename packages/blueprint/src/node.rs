//! Normalized blueprint nodes
//!
//! Every node keeps its typed keys as struct fields and everything else
//! (`help`, `when`, `required`, plugin props ...) in a flattened `props`
//! map. Serializing a node produces the same map shape the normalizers
//! accept, so a normalized tree can be fed back in unchanged.

use crate::diagnostics::Diagnostic;
use crate::ordered_map::OrderedMap;
use crate::Props;
use folio_common::text::strip_tags;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_WIDTH: &str = "1/1";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    pub label: String,

    pub width: String,

    /// Nested fields of structure and object fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<OrderedMap<Field>>,

    /// Fieldsets of blocks and layout fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fieldsets: Option<OrderedMap<Fieldset>>,

    #[serde(flatten)]
    pub props: Props,
}

impl Field {
    /// Visible error card that replaces a broken field definition
    pub fn error(name: impl Into<String>, message: &str) -> Self {
        Self::info(name, "Error", &strip_tags(message)).with_prop("theme", "negative")
    }

    /// Plain `info` field
    pub fn info(name: impl Into<String>, label: impl Into<String>, text: &str) -> Self {
        let mut props = Props::new();
        props.insert("text".to_string(), Value::String(text.to_string()));

        Self {
            name: name.into(),
            field_type: "info".to_string(),
            label: label.into(),
            width: DEFAULT_WIDTH.to_string(),
            fields: None,
            fieldsets: None,
            props,
        }
    }

    pub fn with_prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn is_info(&self) -> bool {
        self.field_type == "info"
    }

    pub fn is_negative(&self) -> bool {
        self.is_info() && self.prop("theme").and_then(Value::as_str) == Some("negative")
    }
}

/// One fieldset of a blocks or layout field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fieldset {
    /// Inline definition with its fields grouped into tabs
    Defined(FieldsetDefinition),
    /// `true` or the name of a fieldset defined elsewhere
    Reference(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldsetDefinition {
    pub tabs: OrderedMap<FieldsetTab>,

    #[serde(flatten)]
    pub props: Props,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldsetTab {
    pub fields: OrderedMap<Field>,

    #[serde(flatten)]
    pub props: Props,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,

    #[serde(rename = "type")]
    pub section_type: String,

    /// Only present on `fields` sections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<OrderedMap<Field>>,

    #[serde(flatten)]
    pub props: Props,
}

impl Section {
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn is_info(&self) -> bool {
        self.section_type == "info"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub width: String,

    pub sections: OrderedMap<Section>,

    #[serde(flatten)]
    pub props: Props,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub name: String,

    pub label: String,

    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    pub columns: Vec<Column>,

    #[serde(flatten)]
    pub props: Props,
}

/// Root of a normalized blueprint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedBlueprint {
    pub name: String,

    pub title: String,

    pub tabs: OrderedMap<Tab>,

    #[serde(flatten)]
    pub props: Props,

    /// Problems found while normalizing; not part of the tree
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizedBlueprint {
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
