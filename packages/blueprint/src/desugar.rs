/// Shorthand desugaring
///
/// Authors may skip levels of the tree. Each pass wraps one trigger key a
/// level deeper and removes it; without the trigger key a pass returns the
/// props unchanged, so running the passes again is a no-op.
///
/// ```yaml
/// fields:            # convert_fields_to_sections("main", ..)
///   title: true      #   sections: { main-fields: { type: fields, fields } }
///                    # convert_sections_to_columns("main", ..)
///                    #   columns: [{ width: 1/1, sections }]
///                    # convert_columns_to_tabs("main", ..)
///                    #   tabs: { main: { columns } }
/// ```
use crate::node::DEFAULT_WIDTH;
use crate::Props;
use serde_json::{json, Value};

/// Take a trigger key, treating `null` as absent
fn take(props: &mut Props, key: &str) -> Option<Value> {
    match props.remove(key) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

/// Wrap bare `fields` into one `fields` section named `<name>-fields`
///
/// Bare `fields` replace any `sections` declared next to them.
pub fn convert_fields_to_sections(name: &str, mut props: Props) -> Props {
    if let Some(fields) = take(&mut props, "fields") {
        props.insert(
            "sections".to_string(),
            json!({ format!("{}-fields", name): { "type": "fields", "fields": fields } }),
        );
    }
    props
}

/// Wrap bare `sections` into one full-width column
pub fn convert_sections_to_columns(_name: &str, mut props: Props) -> Props {
    if let Some(sections) = take(&mut props, "sections") {
        props.insert(
            "columns".to_string(),
            json!([{ "width": DEFAULT_WIDTH, "sections": sections }]),
        );
    }
    props
}

/// Wrap bare `columns` into one tab named `<name>`
pub fn convert_columns_to_tabs(name: &str, mut props: Props) -> Props {
    if let Some(columns) = take(&mut props, "columns") {
        props.insert("tabs".to_string(), json!({ name: { "columns": columns } }));
    }
    props
}

/// Run all three passes in order
pub fn desugar(name: &str, props: Props) -> Props {
    let props = convert_fields_to_sections(name, props);
    let props = convert_sections_to_columns(name, props);
    convert_columns_to_tabs(name, props)
}
