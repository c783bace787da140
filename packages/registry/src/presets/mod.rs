mod files;
mod page;
mod pages;

use crate::loader::RawProps;
use crate::Props;
use folio_common::Translator;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub use files::files_preset;
pub use page::page_preset;
pub use pages::pages_preset;

/// Preset function: receives the blueprint props and returns the new props
pub type PresetFn = Arc<dyn Fn(Props, &dyn Translator) -> Props + Send + Sync>;

/// A registered preset
#[derive(Clone)]
pub enum Preset {
    /// Programmatic preset
    Function(PresetFn),
    /// Props document merged under the blueprint props
    Document(RawProps),
}

impl Preset {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(Props, &dyn Translator) -> Props + Send + Sync + 'static,
    {
        Preset::Function(Arc::new(f))
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Function(_) => f.write_str("Function(..)"),
            Preset::Document(raw) => f.debug_tuple("Document").field(raw).finish(),
        }
    }
}

/// All built-in presets
pub fn builtin() -> Vec<(&'static str, Preset)> {
    vec![
        ("files", Preset::function(files_preset)),
        ("page", Preset::function(page_preset)),
        ("pages", Preset::function(pages_preset)),
    ]
}

/// Translate a key with an English fallback
pub(crate) fn t(translator: &dyn Translator, key: &str, fallback: &str) -> String {
    translator
        .translate_key(key)
        .unwrap_or_else(|| fallback.to_string())
}

/// Build a section from defaults and an author override
///
/// `false` disables the section, `true`/`null` keeps the defaults, a string
/// replaces the label and a map is merged over the defaults.
pub(crate) fn section(defaults: Props, value: Option<Value>) -> Option<Props> {
    match value {
        Some(Value::Bool(false)) => None,
        None | Some(Value::Null) | Some(Value::Bool(true)) => Some(defaults),
        Some(Value::String(label)) => {
            let mut props = defaults;
            props.insert("label".to_string(), Value::String(label));
            Some(props)
        }
        Some(Value::Object(overrides)) => Some(crate::merge_replace(defaults, overrides)),
        Some(_) => Some(defaults),
    }
}

pub(crate) fn into_props(value: Value) -> Props {
    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}
