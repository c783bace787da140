/// Accepted file templates
///
/// Scans normalized sections for every place a file can be uploaded to the
/// blueprint's model and collects the file templates those places assign:
///
/// - `files` sections contribute their `template` (or `default`)
/// - fields with `uploads` contribute the upload template, unless the
///   uploads target another model through `uploads.parent`
/// - structure/object fields and blocks/layout fieldsets are searched
///   recursively
/// - `files`, `textarea` and `writer` fields without `uploads` accept
///   `default` uploads
use crate::node::{Field, Section};
use crate::visitor::{walk_field, walk_section, Visitor};
use serde_json::Value;

const DEFAULT_TEMPLATE: &str = "default";

/// Field types that upload to the model unless configured otherwise
const UPLOADING_FIELD_TYPES: &[&str] = &["files", "textarea", "writer"];

#[derive(Debug, Clone)]
pub struct AcceptRules<'a> {
    model_id: &'a str,
    templates: Vec<String>,
}

impl<'a> AcceptRules<'a> {
    pub fn new(model_id: &'a str) -> Self {
        Self {
            model_id,
            templates: Vec::new(),
        }
    }

    /// Collect the templates of a list of sections
    pub fn collect<'s>(model_id: &'a str, sections: impl IntoIterator<Item = &'s Section>) -> Vec<String> {
        let mut rules = Self::new(model_id);
        for section in sections {
            rules.visit_section(section);
        }
        rules.into_templates()
    }

    /// Templates in first-seen order, without duplicates
    pub fn into_templates(self) -> Vec<String> {
        self.templates
    }

    fn accept(&mut self, template: &str) {
        if !self.templates.iter().any(|t| t == template) {
            self.templates.push(template.to_string());
        }
    }

    fn accept_uploads(&mut self, uploads: &Value) {
        match uploads {
            Value::Bool(false) | Value::Null => {}
            Value::String(template) => self.accept(template),
            Value::Object(settings) => {
                if let Some(parent) = settings.get("parent") {
                    if parent.as_str() != Some(self.model_id) {
                        return;
                    }
                }

                let template = settings
                    .get("template")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_TEMPLATE);
                self.accept(template);
            }
            _ => self.accept(DEFAULT_TEMPLATE),
        }
    }
}

impl<'a> Visitor for AcceptRules<'a> {
    fn visit_section(&mut self, section: &Section) {
        match section.section_type.as_str() {
            "files" => {
                let template = section
                    .prop("template")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_TEMPLATE);
                self.accept(template);
            }
            "fields" => walk_section(self, section),
            _ => {}
        }
    }

    fn visit_field(&mut self, field: &Field) {
        if let Some(uploads) = field.prop("uploads") {
            self.accept_uploads(uploads);
            return;
        }

        if field.fields.is_some() || field.fieldsets.is_some() {
            walk_field(self, field);
            return;
        }

        if UPLOADING_FIELD_TYPES.contains(&field.field_type.as_str()) {
            self.accept(DEFAULT_TEMPLATE);
        }
    }
}
