use crate::desugar::convert_fields_to_sections;
use crate::diagnostics::Diagnostic;
use crate::node::{Column, Section, DEFAULT_WIDTH};
use crate::normalizer::{entries, take_string, Normalizer};
use crate::Props;
use serde_json::Value;
use tracing::debug;

impl<'a> Normalizer<'a> {
    /// Normalize the columns of `tab`
    ///
    /// Columns may be authored as a list or a map; entries that are not
    /// maps are dropped.
    pub fn normalize_columns(&mut self, tab: &str, value: Value) -> Vec<Column> {
        let mut columns = Vec::new();

        for (key, column) in entries(value) {
            let Value::Object(props) = column else {
                debug!(tab = %tab, column = %key, "Dropping column that is not a map");
                continue;
            };

            let column =
                self.within(&["columns", key.as_str()], |n| n.normalize_column(tab, &key, props));
            columns.push(column);
        }

        columns
    }

    fn normalize_column(&mut self, tab: &str, key: &str, props: Props) -> Column {
        let mut props = convert_fields_to_sections(&format!("{}-col-{}", tab, key), props);
        let width = take_string(&mut props, "width").unwrap_or_else(|| DEFAULT_WIDTH.to_string());

        let sections_value = props.remove("sections").unwrap_or(Value::Null);
        let mut sections = self.normalize_sections(tab, sections_value);

        if sections.is_empty() {
            let path = self.path();
            self.report(Diagnostic::info("empty-column", "The column has no sections yet", path));

            let name = format!("{}-info-{}", tab, key);
            let mut placeholder = Props::new();
            placeholder.insert("label".to_string(), Value::String(format!("Column ({})", width)));
            placeholder.insert("text".to_string(), Value::String("No sections yet".to_string()));

            sections.insert(
                name.clone(),
                Section {
                    name,
                    section_type: "info".to_string(),
                    fields: None,
                    props: placeholder,
                },
            );
        }

        Column {
            width,
            sections,
            props,
        }
    }
}
