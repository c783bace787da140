use crate::declaration::Declaration;
use crate::diagnostics::Diagnostic;
use crate::node::{Field, Section};
use crate::normalizer::{entries, Normalizer};
use crate::ordered_map::OrderedMap;
use crate::Props;
use folio_common::text::{escape_html, help_list};
use serde_json::Value;
use tracing::debug;

impl<'a> Normalizer<'a> {
    /// Normalize a map of section declarations belonging to `tab`
    pub fn normalize_sections(&mut self, tab: &str, value: Value) -> OrderedMap<Section> {
        let mut sections = OrderedMap::new();

        for (name, declaration) in entries(value) {
            let Some(props) = Declaration::from(declaration).into_props() else {
                debug!(section = %name, "Removing disabled section");
                continue;
            };

            let section =
                self.within(&["sections", name.as_str()], |n| n.normalize_section(tab, &name, props));
            sections.insert(name, section);
        }

        sections
    }

    /// Normalize one section
    ///
    /// Unknown or missing types never fail; the section is replaced by an
    /// `info` section listing the registered types.
    pub fn normalize_section(&mut self, tab: &str, name: &str, props: Props) -> Section {
        let mut props = self.ctx.registry.extend(props);
        props.remove("name");

        let section_type = match props.remove("type") {
            None | Some(Value::Null) => name.to_string(),
            Some(Value::String(section_type)) if !section_type.is_empty() => section_type,
            Some(_) => {
                return self.invalid_section(
                    name,
                    format!("Invalid section type for section \"{}\"", escape_html(name)),
                )
            }
        };

        if !self.ctx.types.is_section_type(&section_type) {
            return self.invalid_section(
                name,
                format!("Invalid section type (\"{}\")", escape_html(&section_type)),
            );
        }

        let fields = if section_type == "fields" {
            let value = props.remove("fields").unwrap_or(Value::Null);
            let fields = self.within(&["fields"], |n| n.normalize_fields(value));
            Some(self.finish_section_fields(tab, fields))
        } else {
            None
        };

        Section {
            name: name.to_string(),
            section_type,
            fields,
            props,
        }
    }

    fn invalid_section(&mut self, name: &str, label: String) -> Section {
        let ctx = self.ctx;
        let types: Vec<&str> = ctx.types.section_types().collect();

        let path = self.path();
        self.report(
            Diagnostic::error("invalid-section-type", label.clone(), path)
                .with_suggestion(format!("Use one of: {}", types.join(", "))),
        );

        let mut props = Props::new();
        props.insert("label".to_string(), Value::String(label));
        props.insert(
            "text".to_string(),
            Value::String(format!(
                "The following section types are available: \n{}",
                help_list(&types)
            )),
        );
        props.insert("theme".to_string(), Value::String("negative".to_string()));

        Section {
            name: name.to_string(),
            section_type: "info".to_string(),
            fields: None,
            props,
        }
    }

    /// Insert the empty-state field or replace duplicate names
    fn finish_section_fields(&mut self, tab: &str, fields: OrderedMap<Field>) -> OrderedMap<Field> {
        if fields.is_empty() {
            let path = self.path();
            self.report(Diagnostic::info(
                "empty-fields-section",
                "The section has no fields yet",
                path,
            ));

            let name = format!("{}-info", tab);
            let mut placeholder = OrderedMap::new();
            let label = self.ctx.t("fields", "Fields");
            placeholder.insert(name.clone(), Field::info(name, label, "No fields yet"));
            return placeholder;
        }

        let mut checked = OrderedMap::with_capacity(fields.len());
        for (key, field) in fields {
            // info fields carry no value and may repeat
            if field.is_info() || self.seen_fields.insert(key.clone()) {
                checked.insert(key, field);
                continue;
            }

            let path = self.path_to(&format!("fields.{}", key));
            self.report(
                Diagnostic::error(
                    "duplicate-field",
                    format!("The field name \"{}\" already exists in your blueprint", key),
                    path,
                )
                .with_suggestion("Rename the field or remove one of the definitions"),
            );

            let text = format!(
                "The field name <strong>\"{}\"</strong> already exists in your blueprint.",
                escape_html(&key)
            );
            let duplicate = Field::info(key.clone(), field.label, &text).with_prop("theme", "negative");
            checked.insert(key, duplicate);
        }

        checked
    }
}
