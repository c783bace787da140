use super::t;
use crate::Props;
use folio_common::Translator;
use serde_json::Value;

/// `preset: files`
///
/// Turns the blueprint into a single files section. `headline`, `layout`,
/// `template` and `image` configure that section.
pub fn files_preset(mut props: Props, translator: &dyn Translator) -> Props {
    let mut section = Props::new();

    let label = props
        .remove("headline")
        .unwrap_or_else(|| Value::String(t(translator, "files", "Files")));
    section.insert("label".to_string(), label);
    section.insert("type".to_string(), Value::String("files".to_string()));
    section.insert(
        "layout".to_string(),
        props
            .remove("layout")
            .unwrap_or_else(|| Value::String("cards".to_string())),
    );

    for key in ["template", "image"] {
        if let Some(value) = props.remove(key).filter(|value| !value.is_null()) {
            section.insert(key.to_string(), value);
        }
    }

    section.insert(
        "info".to_string(),
        Value::String("{{ file.dimensions }}".to_string()),
    );

    let mut sections = Props::new();
    sections.insert("files".to_string(), Value::Object(section));
    props.insert("sections".to_string(), Value::Object(sections));

    props
}
