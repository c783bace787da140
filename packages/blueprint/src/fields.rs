use crate::declaration::Declaration;
use crate::diagnostics::Diagnostic;
use crate::error::FieldError;
use crate::node::{Field, Fieldset, FieldsetDefinition, FieldsetTab, DEFAULT_WIDTH};
use crate::normalizer::{entries, take_string, FieldOutcome, Normalizer};
use crate::ordered_map::OrderedMap;
use crate::types::GROUP_TYPE;
use crate::Props;
use serde_json::{json, Value};
use tracing::debug;

impl<'a> Normalizer<'a> {
    /// Normalize one field declaration that already carries its `name`
    ///
    /// Errors are returned to the caller, which turns them into an error
    /// field in place.
    pub fn normalize_field(&mut self, props: Props) -> Result<FieldOutcome, FieldError> {
        let mut props = self.ctx.registry.extend(props);

        let name = match props.remove("name") {
            Some(Value::String(name)) if !name.is_empty() => name,
            _ => return Err(FieldError::MissingName),
        };

        let field_type = match props.remove("type") {
            None | Some(Value::Null) => name.clone(),
            Some(Value::String(field_type)) => field_type,
            Some(other) => {
                return Err(FieldError::InvalidType {
                    field_type: other.to_string(),
                })
            }
        };

        if !self.ctx.types.is_field_type(&field_type) {
            return Err(FieldError::InvalidType { field_type });
        }

        let fields = match props.remove("fields") {
            None | Some(Value::Null) => None,
            Some(fields) => Some(self.within(&["fields"], |n| n.normalize_fields(fields))),
        };

        if field_type == GROUP_TYPE {
            let mut fields = fields.unwrap_or_default();

            // the group's condition applies to children without their own;
            // error cards stay visible
            if let Some(when) = props.remove("when") {
                for field in fields.values_mut() {
                    if !field.is_negative() && !field.props.contains_key("when") {
                        field.props.insert("when".to_string(), when.clone());
                    }
                }
            }

            return Ok(FieldOutcome::Group { name, fields });
        }

        let fieldsets = match props.remove("fieldsets") {
            None | Some(Value::Null) => None,
            Some(fieldsets) => Some(self.within(&["fieldsets"], |n| n.normalize_fieldsets(fieldsets))),
        };

        let label = self.ctx.label(props.remove("label").as_ref(), &name);
        let width = take_string(&mut props, "width").unwrap_or_else(|| DEFAULT_WIDTH.to_string());

        Ok(FieldOutcome::Field(Field {
            name,
            field_type,
            label,
            width,
            fields,
            fieldsets,
            props,
        }))
    }

    /// Normalize a map (or list) of field declarations
    ///
    /// `false` entries are dropped, broken entries become error fields and
    /// groups are spliced in at their own position.
    pub fn normalize_fields(&mut self, value: Value) -> OrderedMap<Field> {
        let mut fields = OrderedMap::new();

        for (key, declaration) in entries(value) {
            let Some(mut props) = Declaration::from(declaration).into_props() else {
                debug!(field = %key, "Removing disabled field");
                continue;
            };
            props.insert("name".to_string(), Value::String(key.clone()));

            self.enter(key.as_str());
            match self.normalize_field(props) {
                Ok(FieldOutcome::Field(field)) => {
                    fields.insert(key, field);
                }
                Ok(FieldOutcome::Group { name, fields: children }) => {
                    if children.is_empty() {
                        let path = self.path();
                        self.report(Diagnostic::warning(
                            "empty-group",
                            format!("The group \"{}\" has no fields", name),
                            path,
                        ));
                    } else {
                        debug!(group = %name, children = children.len(), "Splicing group fields");
                        fields.extend(children);
                    }
                }
                Err(err) => {
                    let path = self.path();
                    self.report(
                        Diagnostic::error("invalid-field", err.to_string(), path).with_suggestion(
                            match &err {
                                FieldError::MissingName => "Give the field a name".to_string(),
                                FieldError::InvalidType { .. } => {
                                    "Use one of the registered field types".to_string()
                                }
                            },
                        ),
                    );
                    fields.insert(key.clone(), Field::error(key, &err.to_string()));
                }
            }
            self.leave();
        }

        fields
    }

    /// Normalize the fieldsets of a blocks or layout field
    ///
    /// Names (`[gallery]`, `gallery: true`) resolve to the `blocks/<name>`
    /// blueprint and a string value names the blueprint directly. Names that
    /// cannot be resolved are kept as references. Inline definitions have
    /// their `fields` moved into a `content` tab and every tab's fields
    /// normalized.
    pub fn normalize_fieldsets(&mut self, value: Value) -> OrderedMap<Fieldset> {
        let mut fieldsets = OrderedMap::new();

        match value {
            Value::Array(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    match item {
                        Value::String(name) => {
                            let blueprint = format!("blocks/{}", name);
                            let fieldset = self.resolve_fieldset(&name, &blueprint, Value::Bool(true));
                            fieldsets.insert(name, fieldset);
                        }
                        Value::Object(props) => {
                            let key = index.to_string();
                            let definition =
                                self.within(&[key.as_str()], |n| n.normalize_fieldset(props));
                            fieldsets.insert(key, Fieldset::Defined(definition));
                        }
                        other => {
                            let path = self.path_to(&index.to_string());
                            self.report(Diagnostic::warning(
                                "invalid-fieldset",
                                format!("Ignoring fieldset declared as {}", other),
                                path,
                            ));
                        }
                    }
                }
            }
            Value::Object(map) => {
                for (key, fieldset) in map {
                    let fieldset = match fieldset {
                        Value::Bool(false) => continue,
                        Value::Bool(true) | Value::Null => {
                            let blueprint = format!("blocks/{}", key);
                            self.resolve_fieldset(&key, &blueprint, Value::Bool(true))
                        }
                        Value::String(blueprint) => {
                            let reference = Value::String(blueprint.clone());
                            self.resolve_fieldset(&key, &blueprint, reference)
                        }
                        Value::Object(props) => {
                            let definition =
                                self.within(&[key.as_str()], |n| n.normalize_fieldset(props));
                            Fieldset::Defined(definition)
                        }
                        other => Fieldset::Reference(other),
                    };
                    fieldsets.insert(key, fieldset);
                }
            }
            _ => {}
        }

        fieldsets
    }

    /// Load a named fieldset blueprint, keeping `reference` when it is unknown
    fn resolve_fieldset(&mut self, key: &str, blueprint: &str, reference: Value) -> Fieldset {
        let props = self.ctx.registry.extend_name(blueprint);
        if props.is_empty() {
            debug!(fieldset = %key, blueprint = %blueprint, "Keeping unresolved fieldset reference");
            return Fieldset::Reference(reference);
        }

        let definition = self.within(&[key], |n| n.normalize_fieldset(props));
        Fieldset::Defined(definition)
    }

    fn normalize_fieldset(&mut self, props: Props) -> FieldsetDefinition {
        let mut props = self.ctx.registry.extend(props);

        let mut tabs_value = props.remove("tabs").unwrap_or(Value::Null);
        match props.remove("fields") {
            None | Some(Value::Null) => {}
            Some(fields) => tabs_value = json!({ "content": { "fields": fields } }),
        }

        let mut tabs = OrderedMap::new();
        for (name, tab) in entries(tabs_value) {
            let Value::Object(mut tab_props) = tab else {
                continue;
            };

            let fields = match tab_props.remove("fields") {
                Some(fields) => self.within(&["tabs", name.as_str(), "fields"], |n| n.normalize_fields(fields)),
                None => OrderedMap::new(),
            };

            tabs.insert(
                name,
                FieldsetTab {
                    fields,
                    props: tab_props,
                },
            );
        }

        FieldsetDefinition { tabs, props }
    }
}
