use super::{into_props, section, t};
use crate::Props;
use folio_common::Translator;
use serde_json::{json, Value};

/// `preset: page`
///
/// Lays the blueprint out as a wide content column holding `fields` and a
/// narrow sidebar with a `pages` and a `files` section.
///
/// ```yaml
/// preset: page
/// fields:
///   text: true
/// pages: false
/// files: Attachments
/// ```
pub fn page_preset(mut props: Props, translator: &dyn Translator) -> Props {
    let sidebar = match props.remove("sidebar") {
        Some(Value::Object(sidebar)) if !sidebar.is_empty() => sidebar,
        _ => {
            let mut sidebar = Props::new();

            let pages = into_props(json!({
                "label": t(translator, "pages", "Pages"),
                "type": "pages",
                "status": "all",
                "layout": "list",
            }));
            if let Some(pages) = section(pages, props.remove("pages")) {
                sidebar.insert("pages".to_string(), Value::Object(pages));
            }

            let files = into_props(json!({
                "label": t(translator, "files", "Files"),
                "type": "files",
                "layout": "list",
            }));
            if let Some(files) = section(files, props.remove("files")) {
                sidebar.insert("files".to_string(), Value::Object(files));
            }

            sidebar
        }
    };

    // both sidebar sections are gone: plain fields layout
    if sidebar.is_empty() {
        props.remove("pages");
        props.remove("files");
        if !props.contains_key("fields") {
            props.insert("fields".to_string(), Value::Object(Props::new()));
        }
        return props;
    }

    let fields = props
        .remove("fields")
        .unwrap_or_else(|| Value::Object(Props::new()));
    props.remove("pages");
    props.remove("files");

    props.insert(
        "columns".to_string(),
        json!([
            { "width": "2/3", "fields": fields },
            { "width": "1/3", "sections": sidebar },
        ]),
    );

    props
}
