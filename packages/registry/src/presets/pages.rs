use super::{into_props, section, t};
use crate::Props;
use folio_common::Translator;
use serde_json::{json, Value};

/// `preset: pages`
///
/// Builds one pages section per status. `drafts` and `listed` are on by
/// default, `unlisted` is off unless set. A top-level `templates` value is
/// copied into every section that does not define its own.
pub fn pages_preset(mut props: Props, translator: &dyn Translator) -> Props {
    let templates = props
        .remove("templates")
        .filter(|templates| !is_empty(templates));

    let statuses = [
        ("drafts", "pages.status.draft", "Drafts", true),
        ("unlisted", "pages.status.unlisted", "Unlisted", false),
        ("listed", "pages.status.listed", "Published", true),
    ];

    let mut sections = Props::new();

    for (status, key, fallback, enabled_by_default) in statuses {
        let value = match props.remove(status) {
            Some(value) => Some(value),
            None if enabled_by_default => None,
            None => Some(Value::Bool(false)),
        };

        let defaults = into_props(json!({
            "label": t(translator, key, fallback),
            "type": "pages",
            "layout": "list",
            "status": status,
        }));

        if let Some(mut section) = section(defaults, value) {
            if let Some(templates) = &templates {
                if !section.contains_key("templates") {
                    section.insert("templates".to_string(), templates.clone());
                }
            }
            sections.insert(status.to_string(), Value::Object(section));
        }
    }

    props.insert("sections".to_string(), Value::Object(sections));
    props
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}
