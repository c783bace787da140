/// Blueprint source loading
///
/// A loader turns a blueprint name (`pages/article`, `fields/seo`) into raw
/// props. The raw form is either parsed data, a YAML file to read, or a
/// callable that produces one of those. The registry resolves all three
/// forms before any extension or normalization happens.
use crate::registry::BlueprintRegistry;
use folio_common::{FileSystem, RealFileSystem};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Blueprint '{name}' not found")]
    NotFound { name: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid YAML in {path}: {message}")]
    Yaml { path: String, message: String },

    #[error("Blueprint '{name}' does not contain a props map")]
    InvalidProps { name: String },

    #[error("Blueprint callable '{name}' failed: {message}")]
    Callable { name: String, message: String },
}

/// Callable raw props, invoked with the registry as application context
pub type RawPropsFn =
    Arc<dyn Fn(&BlueprintRegistry) -> Result<RawProps, LoadError> + Send + Sync>;

/// Raw props in one of the three forms a loader may return
#[derive(Clone)]
pub enum RawProps {
    /// Already parsed props
    Data(Value),
    /// Path to a YAML file
    File(PathBuf),
    /// Function producing raw props
    Callable(RawPropsFn),
}

impl RawProps {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&BlueprintRegistry) -> Result<RawProps, LoadError> + Send + Sync + 'static,
    {
        RawProps::Callable(Arc::new(f))
    }
}

impl fmt::Debug for RawProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawProps::Data(value) => f.debug_tuple("Data").field(value).finish(),
            RawProps::File(path) => f.debug_tuple("File").field(path).finish(),
            RawProps::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl From<Value> for RawProps {
    fn from(value: Value) -> Self {
        RawProps::Data(value)
    }
}

/// Source of named blueprints
pub trait SourceLoader: Send + Sync {
    /// Look up raw props by name; `Ok(None)` when the name is unknown
    fn load(&self, name: &str) -> Result<Option<RawProps>, LoadError>;
}

/// Loader backed by an in-memory table, mostly for tests and plugins
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, RawProps>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, raw: impl Into<RawProps>) {
        self.entries.insert(name.into(), raw.into());
    }

    pub fn with(mut self, name: impl Into<String>, raw: impl Into<RawProps>) -> Self {
        self.insert(name, raw);
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Option<RawProps>, LoadError> {
        Ok(self.entries.get(name).cloned())
    }
}

/// Loader that looks in a blueprints root first, then in registered extensions
pub struct DirectoryLoader {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    extensions: HashMap<String, RawProps>,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, Arc::new(RealFileSystem))
    }

    /// Create a loader with a custom file system (for testing)
    pub fn with_fs(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
            extensions: HashMap::new(),
        }
    }

    /// Register a plugin-provided blueprint
    pub fn add_extension(&mut self, name: impl Into<String>, raw: impl Into<RawProps>) {
        self.extensions.insert(name.into(), raw.into());
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for a name, in lookup order
    fn candidates(&self, name: &str) -> [PathBuf; 2] {
        [
            self.root.join(format!("{}.yml", name)),
            self.root.join(format!("{}.yaml", name)),
        ]
    }
}

impl fmt::Debug for DirectoryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryLoader")
            .field("root", &self.root)
            .field("extensions", &self.extensions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SourceLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Result<Option<RawProps>, LoadError> {
        // only plain relative names are looked up below the root
        if is_relative_name(name) {
            for candidate in self.candidates(name) {
                if self.fs.exists(&candidate) {
                    return Ok(Some(RawProps::File(candidate)));
                }
            }
        }

        Ok(self.extensions.get(name).cloned())
    }
}

/// Absolute names and `..` segments would resolve outside the root
fn is_relative_name(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// Parse a YAML document into a JSON value
///
/// Map keys are stringified so that `0:` or `true:` keys survive. An empty
/// document parses to `null`.
pub fn parse_yaml(source: &str, path: &Path) -> Result<Value, LoadError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| LoadError::Yaml {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(yaml_to_json(yaml))
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => String::new(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
