use std::collections::HashMap;

/// The content entity that owns a blueprint
///
/// The engine never reads or writes content. It only needs a stable identity
/// (compared against `uploads.parent` references) and the ability to render
/// a template string in the context of the model.
pub trait Model: Send + Sync {
    /// Stable identity, e.g. `blog/hello-world` or `site`
    fn id(&self) -> &str;

    /// Render a template string such as `{{ page.title }}` against the model
    fn render(&self, template: &str) -> String;

    /// Base URL of the model in the panel, used to build tab links
    fn panel_url(&self) -> Option<String> {
        None
    }
}

/// Model with a fixed id and a flat set of `{{ key }}` placeholders
#[derive(Debug, Clone, Default)]
pub struct StaticModel {
    id: String,
    panel_url: Option<String>,
    values: HashMap<String, String>,
}

impl StaticModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_panel_url(mut self, url: impl Into<String>) -> Self {
        self.panel_url = Some(url.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl Model for StaticModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, template: &str) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    if let Some(value) = self.values.get(key) {
                        output.push_str(value);
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    // unterminated placeholder, keep it verbatim
                    output.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        output.push_str(rest);
        output
    }

    fn panel_url(&self) -> Option<String> {
        self.panel_url.clone()
    }
}
