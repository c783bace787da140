use std::collections::BTreeSet;

/// Pseudo field type that is expanded into its children
pub const GROUP_TYPE: &str = "group";

const FIELD_TYPES: &[&str] = &[
    "blocks",
    "checkboxes",
    "color",
    "date",
    "email",
    "entries",
    "files",
    "gap",
    "headline",
    "hidden",
    "info",
    "layout",
    "line",
    "link",
    "list",
    "multiselect",
    "number",
    "object",
    "pages",
    "radio",
    "range",
    "select",
    "slug",
    "structure",
    "tags",
    "tel",
    "text",
    "textarea",
    "time",
    "toggle",
    "toggles",
    "url",
    "users",
    "writer",
];

const SECTION_TYPES: &[&str] = &["fields", "files", "info", "pages", "stats"];

/// Registered field and section types
///
/// Built once at start-up (built-in types plus any configured extras) and
/// shared read-only by every normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    field_types: BTreeSet<String>,
    section_types: BTreeSet<String>,
}

impl TypeRegistry {
    /// Registry with the built-in field and section types
    pub fn new() -> Self {
        Self {
            field_types: FIELD_TYPES.iter().map(|t| t.to_string()).collect(),
            section_types: SECTION_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Registry without any types
    pub fn empty() -> Self {
        Self {
            field_types: BTreeSet::new(),
            section_types: BTreeSet::new(),
        }
    }

    pub fn with_field_type(mut self, name: impl Into<String>) -> Self {
        self.field_types.insert(name.into());
        self
    }

    pub fn with_section_type(mut self, name: impl Into<String>) -> Self {
        self.section_types.insert(name.into());
        self
    }

    /// `group` is always accepted
    pub fn is_field_type(&self, name: &str) -> bool {
        name == GROUP_TYPE || self.field_types.contains(name)
    }

    pub fn is_section_type(&self, name: &str) -> bool {
        self.section_types.contains(name)
    }

    /// Section type names, sorted
    pub fn section_types(&self) -> impl Iterator<Item = &str> {
        self.section_types.iter().map(String::as_str)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
