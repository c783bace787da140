use folio_blueprint::{NormalizeContext, TypeRegistry};
use folio_common::StaticTranslator;
use folio_registry::{BlueprintRegistry, DirectoryLoader};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root directory of named blueprints
    #[serde(default = "default_blueprints_dir")]
    pub blueprints_dir: String,

    /// Locale used for labels and titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Locale used when a label has no translation for `locale`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_locale: Option<String>,

    /// locale -> key -> translation
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub translations: HashMap<String, HashMap<String, String>>,

    /// Field types accepted on top of the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_types: Vec<String>,

    /// Section types accepted on top of the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section_types: Vec<String>,

    /// Id of the model blueprints are normalized for
    #[serde(default = "default_model_id")]
    pub model_id: String,
}

fn default_blueprints_dir() -> String {
    "blueprints".to_string()
}

fn default_model_id() -> String {
    "site".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the blueprints directory
    pub fn get_blueprints_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.blueprints_dir)
    }

    pub fn types(&self) -> TypeRegistry {
        let types = self
            .field_types
            .iter()
            .fold(TypeRegistry::new(), |types, name| types.with_field_type(name.as_str()));

        self.section_types
            .iter()
            .fold(types, |types, name| types.with_section_type(name.as_str()))
    }

    pub fn translator(&self) -> StaticTranslator {
        let mut translator = StaticTranslator::new(self.locale.as_deref().unwrap_or("en"));
        if let Some(fallback) = &self.fallback_locale {
            translator = translator.with_fallback_locale(fallback.as_str());
        }
        for (locale, strings) in &self.translations {
            translator.extend_locale(locale, strings.clone());
        }
        translator
    }

    /// Build the engine context rooted at the blueprints directory
    pub fn context(&self, cwd: &str) -> NormalizeContext {
        let loader = DirectoryLoader::new(self.get_blueprints_dir(cwd));
        let registry = BlueprintRegistry::new(loader).with_default_presets();

        NormalizeContext::new(Arc::new(registry))
            .with_types(self.types())
            .with_translator(Arc::new(self.translator()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blueprints_dir: default_blueprints_dir(),
            locale: None,
            fallback_locale: None,
            translations: HashMap::new(),
            field_types: vec![],
            section_types: vec![],
            model_id: default_model_id(),
        }
    }
}
