/// Extension resolution (`extends`) and preset injection
///
/// `extends` names one blueprint or a list of them. Each referenced
/// blueprint is loaded, extended itself, and merged *under* the current
/// props, so the more specific definition always wins. Lookups that fail are
/// skipped; the props stay unextended for that ancestor.
use crate::merge::merge_replace;
use crate::presets::Preset;
use crate::registry::BlueprintRegistry;
use crate::Props;
use folio_common::Translator;
use serde_json::Value;
use tracing::{debug, warn};

impl BlueprintRegistry {
    /// Resolve the `extends` chain of a props map
    ///
    /// Calling this on props without an `extends` key returns them unchanged.
    pub fn extend(&self, props: Props) -> Props {
        let mut chain = Vec::new();
        self.extend_with_chain(props, &mut chain)
    }

    /// Resolve the string shorthand `field: fields/seo` into extended props
    pub fn extend_name(&self, name: &str) -> Props {
        let mut props = Props::new();
        props.insert("extends".to_string(), Value::String(name.to_string()));
        self.extend(props)
    }

    fn extend_with_chain(&self, mut props: Props, chain: &mut Vec<String>) -> Props {
        let Some(extends) = props.remove("extends") else {
            return props;
        };

        for name in extends_names(&extends) {
            if chain.contains(&name) {
                warn!(
                    blueprint = %name,
                    chain = %chain.join(" → "),
                    "Circular extends detected - keeping props unextended"
                );
                continue;
            }

            let mixin = match self.find(&name) {
                Ok(mixin) => mixin,
                Err(err) => {
                    debug!(blueprint = %name, error = %err, "Skipping unresolved extends");
                    continue;
                }
            };

            chain.push(name);
            let mixin = self.extend_with_chain(mixin, chain);
            chain.pop();

            props = merge_replace(mixin, props);
        }

        props
    }

    /// Apply a registered preset named by the `preset` key
    ///
    /// Unknown presets leave the props untouched. The `preset` key is consumed
    /// so that applying presets is idempotent.
    pub fn apply_preset(&self, mut props: Props, translator: &dyn Translator) -> Props {
        let Some(name) = props.get("preset").and_then(Value::as_str).map(str::to_string) else {
            return props;
        };

        let Some(preset) = self.preset(&name) else {
            debug!(preset = %name, "Unknown preset - keeping props");
            return props;
        };

        props.remove("preset");
        debug!(preset = %name, "Applying preset");

        match preset {
            Preset::Function(preset_fn) => preset_fn(props, translator),
            Preset::Document(raw) => match self.resolve_raw(&name, raw) {
                Ok(mut document) => {
                    document.remove("preset");
                    merge_replace(document, props)
                }
                Err(err) => {
                    warn!(preset = %name, error = %err, "Failed to load preset document");
                    props
                }
            },
        }
    }
}

fn extends_names(extends: &Value) -> Vec<String> {
    match extends {
        Value::String(name) => vec![name.clone()],
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
