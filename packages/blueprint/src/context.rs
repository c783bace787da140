use crate::types::TypeRegistry;
use folio_common::{text::ucfirst, NoopTranslator, Translator};
use folio_registry::BlueprintRegistry;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Process-wide collaborators shared by every normalization
///
/// Cloning is cheap; all members are reference counted.
#[derive(Clone)]
pub struct NormalizeContext {
    pub registry: Arc<BlueprintRegistry>,
    pub types: Arc<TypeRegistry>,
    pub translator: Arc<dyn Translator>,
}

impl NormalizeContext {
    pub fn new(registry: Arc<BlueprintRegistry>) -> Self {
        Self {
            registry,
            types: Arc::new(TypeRegistry::new()),
            translator: Arc::new(NoopTranslator),
        }
    }

    pub fn with_types(mut self, types: TypeRegistry) -> Self {
        self.types = Arc::new(types);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Translate an authored label, falling back to `fallback`
    pub fn i18n(&self, value: Option<&Value>, fallback: &str) -> String {
        match value {
            Some(value) => self
                .translator
                .translate(value, Some(fallback))
                .unwrap_or_else(|| fallback.to_string()),
            None => fallback.to_string(),
        }
    }

    /// Translate an authored label, defaulting to the capitalized name
    pub fn label(&self, value: Option<&Value>, name: &str) -> String {
        self.i18n(value, &ucfirst(name))
    }

    /// Look up a translation key with an English fallback
    pub fn t(&self, key: &str, fallback: &str) -> String {
        self.translator
            .translate_key(key)
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Debug for NormalizeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizeContext")
            .field("registry", &self.registry)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}
