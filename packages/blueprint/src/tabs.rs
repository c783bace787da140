use crate::declaration::Declaration;
use crate::desugar::{convert_fields_to_sections, convert_sections_to_columns};
use crate::node::Tab;
use crate::normalizer::{entries, take_string, Normalizer};
use crate::ordered_map::OrderedMap;
use crate::Props;
use serde_json::Value;
use tracing::{debug, instrument};

impl<'a> Normalizer<'a> {
    /// Normalize a map of tab declarations
    #[instrument(skip_all)]
    pub fn normalize_tabs(&mut self, value: Value) -> OrderedMap<Tab> {
        let mut tabs = OrderedMap::new();

        for (name, declaration) in entries(value) {
            let Some(props) = Declaration::from(declaration).into_props() else {
                debug!(tab = %name, "Removing disabled tab");
                continue;
            };

            let tab = self.within(&["tabs", name.as_str()], |n| n.normalize_tab(&name, props));
            tabs.insert(name, tab);
        }

        debug!(tabs = tabs.len(), "Normalized tabs");
        tabs
    }

    /// Normalize one tab: extends, preset, shorthand, defaults, columns
    pub fn normalize_tab(&mut self, name: &str, props: Props) -> Tab {
        let props = self.ctx.registry.extend(props);
        let props = self
            .ctx
            .registry
            .apply_preset(props, self.ctx.translator.as_ref());
        let props = convert_fields_to_sections(name, props);
        let mut props = convert_sections_to_columns(name, props);
        props.remove("name");

        let columns_value = props.remove("columns").unwrap_or(Value::Null);
        let columns = self.normalize_columns(name, columns_value);

        let icon = take_string(&mut props, "icon");
        let label = self.ctx.label(props.remove("label").as_ref(), name);

        let authored_link = take_string(&mut props, "link");
        let link = self
            .model
            .and_then(|model| model.panel_url())
            .map(|url| format!("{}/?tab={}", url.trim_end_matches('/'), name))
            .or(authored_link);

        Tab {
            name: name.to_string(),
            label,
            icon,
            link,
            columns,
            props,
        }
    }
}
