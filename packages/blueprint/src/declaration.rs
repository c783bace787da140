use crate::Props;
use serde_json::Value;

/// How a tab, column, section or field entry was declared
///
/// ```yaml
/// fields:
///   text:                    # Omitted
///   date: true               # Enabled({})
///   tags: false              # Disabled
///   seo: fields/seo          # ExtendsFrom("fields/seo")
///   title:                   # Enabled({type: text})
///     type: text
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Omitted,
    Enabled(Props),
    Disabled,
    ExtendsFrom(String),
}

impl Declaration {
    /// Props to normalize, or `None` when the entry must be removed
    pub fn into_props(self) -> Option<Props> {
        match self {
            Declaration::Disabled => None,
            Declaration::Omitted => Some(Props::new()),
            Declaration::Enabled(props) => Some(props),
            Declaration::ExtendsFrom(name) => {
                let mut props = Props::new();
                props.insert("extends".to_string(), Value::String(name));
                Some(props)
            }
        }
    }
}

impl From<Value> for Declaration {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(false) => Declaration::Disabled,
            Value::Bool(true) => Declaration::Enabled(Props::new()),
            Value::String(name) => Declaration::ExtendsFrom(name),
            Value::Object(props) => Declaration::Enabled(props),
            Value::Null | Value::Number(_) | Value::Array(_) => Declaration::Omitted,
        }
    }
}
