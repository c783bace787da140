/// Translation contract
///
/// Blueprint labels and titles can be authored either as plain strings or as
/// a map of locale to string. A translator picks the best string for its
/// current locale.
use serde_json::Value;
use std::collections::HashMap;

pub trait Translator: Send + Sync {
    /// Translate a string or locale map
    ///
    /// Returns the fallback when the value cannot be translated, and `None`
    /// when there is neither a translation nor a fallback.
    fn translate(&self, value: &Value, fallback: Option<&str>) -> Option<String>;

    /// Look up a translation key such as `pages.status.draft`
    fn translate_key(&self, key: &str) -> Option<String>;
}

/// Translator that only understands plain strings
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, value: &Value, fallback: Option<&str>) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => fallback.map(str::to_string),
        }
    }

    fn translate_key(&self, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory translator with a current and a fallback locale
#[derive(Debug, Clone)]
pub struct StaticTranslator {
    locale: String,
    fallback_locale: String,
    /// locale -> key -> translation
    strings: HashMap<String, HashMap<String, String>>,
}

impl StaticTranslator {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            fallback_locale: "en".to_string(),
            strings: HashMap::new(),
        }
    }

    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    /// Register a translation key for a locale
    pub fn insert(&mut self, locale: &str, key: impl Into<String>, value: impl Into<String>) {
        self.strings
            .entry(locale.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Register all keys of one locale at once
    pub fn extend_locale(&mut self, locale: &str, strings: HashMap<String, String>) {
        self.strings
            .entry(locale.to_string())
            .or_default()
            .extend(strings);
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&String> {
        self.strings.get(locale).and_then(|strings| strings.get(key))
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, value: &Value, fallback: Option<&str>) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get(&self.locale)
                .or_else(|| map.get(&self.fallback_locale))
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| fallback.map(str::to_string)),
            _ => fallback.map(str::to_string),
        }
    }

    fn translate_key(&self, key: &str) -> Option<String> {
        self.lookup(&self.locale, key)
            .or_else(|| self.lookup(&self.fallback_locale, key))
            .cloned()
    }
}
