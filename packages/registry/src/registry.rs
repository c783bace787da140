//! # BlueprintRegistry - Named Blueprints and Presets
//!
//! The registry is the one place that holds process-wide blueprint state:
//!
//! - **loaded**: raw (pre-extension) props per blueprint name, filled on the
//!   first successful lookup and reused afterwards
//! - **presets**: named preset functions or documents, registered at start-up
//!
//! Both live behind `RwLock`s with get-or-populate semantics. Two threads
//! racing on the same name compute the same props, so the last writer wins.
//!
//! ## Lifecycle
//!
//! The registry is created once by the application and shared via `Arc`.
//! Tests call [`BlueprintRegistry::clear`] (drops the named cache) or
//! [`BlueprintRegistry::reset`] (drops the cache and every preset) instead of
//! relying on module load order.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_registry::{BlueprintRegistry, DirectoryLoader};
//!
//! let registry = BlueprintRegistry::new(DirectoryLoader::new("site/blueprints"))
//!     .with_default_presets();
//!
//! let props = registry.find("pages/article")?;
//! let props = registry.extend(props);
//! ```

use crate::loader::{parse_yaml, LoadError, RawProps, SourceLoader};
use crate::presets::Preset;
use crate::Props;
use folio_common::{FileSystem, RealFileSystem};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Upper bound for callables that return further callables
const MAX_CALLABLE_DEPTH: usize = 8;

pub struct BlueprintRegistry {
    /// Resolves blueprint names to raw props
    loader: Box<dyn SourceLoader>,

    /// Used to read `RawProps::File` sources
    fs: Arc<dyn FileSystem>,

    /// Raw props per blueprint name
    loaded: RwLock<HashMap<String, Props>>,

    /// Registered presets
    presets: RwLock<HashMap<String, Preset>>,
}

impl BlueprintRegistry {
    /// Create a registry reading files from the real file system
    pub fn new(loader: impl SourceLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            fs: Arc::new(RealFileSystem),
            loaded: RwLock::new(HashMap::new()),
            presets: RwLock::new(HashMap::new()),
        }
    }

    /// Use a custom file system for `RawProps::File` sources (for testing)
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Register the built-in `page`, `pages` and `files` presets
    pub fn with_default_presets(self) -> Self {
        for (name, preset) in crate::presets::builtin() {
            self.register_preset(name, preset);
        }
        self
    }

    /// Find the raw props of a named blueprint
    ///
    /// Results are cached per name. The returned props are not extended yet.
    pub fn find(&self, name: &str) -> Result<Props, LoadError> {
        if let Some(props) = read(&self.loaded).get(name) {
            return Ok(props.clone());
        }

        let raw = self.loader.load(name)?.ok_or_else(|| LoadError::NotFound {
            name: name.to_string(),
        })?;

        let props = self.resolve_raw(name, raw)?;
        debug!(blueprint = %name, keys = props.len(), "Loaded blueprint");

        write(&self.loaded).insert(name.to_string(), props.clone());
        Ok(props)
    }

    /// Check whether a name is resolvable without caching the result
    pub fn exists(&self, name: &str) -> bool {
        read(&self.loaded).contains_key(name)
            || matches!(self.loader.load(name), Ok(Some(_)))
    }

    /// Turn any raw props form into a props map
    pub fn resolve_raw(&self, name: &str, mut raw: RawProps) -> Result<Props, LoadError> {
        for _ in 0..MAX_CALLABLE_DEPTH {
            let value = match raw {
                RawProps::Data(value) => value,
                RawProps::File(path) => {
                    let source = self.fs.read_to_string(&path).map_err(|e| LoadError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                    parse_yaml(&source, &path)?
                }
                RawProps::Callable(callable) => {
                    raw = callable(self)?;
                    continue;
                }
            };

            return match value {
                Value::Object(props) => Ok(props),
                Value::Null => Ok(Props::new()),
                _ => Err(LoadError::InvalidProps {
                    name: name.to_string(),
                }),
            };
        }

        Err(LoadError::Callable {
            name: name.to_string(),
            message: format!("callables nested deeper than {}", MAX_CALLABLE_DEPTH),
        })
    }

    /// Number of cached blueprints
    pub fn loaded_count(&self) -> usize {
        read(&self.loaded).len()
    }

    /// Register (or replace) a preset
    pub fn register_preset(&self, name: impl Into<String>, preset: Preset) {
        write(&self.presets).insert(name.into(), preset);
    }

    /// Look up a registered preset
    pub fn preset(&self, name: &str) -> Option<Preset> {
        read(&self.presets).get(name).cloned()
    }

    /// Names of all registered presets, sorted
    pub fn preset_names(&self) -> Vec<String> {
        let mut names: Vec<_> = read(&self.presets).keys().cloned().collect();
        names.sort();
        names
    }

    /// Forget all cached blueprints
    pub fn clear(&self) {
        write(&self.loaded).clear();
    }

    /// Forget all cached blueprints and registered presets
    pub fn reset(&self) {
        self.clear();
        write(&self.presets).clear();
    }
}

impl fmt::Debug for BlueprintRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlueprintRegistry")
            .field("loaded", &format!("{} blueprints", self.loaded_count()))
            .field("presets", &self.preset_names())
            .finish()
    }
}

// Lock helpers that recover the inner map from a poisoned lock
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
