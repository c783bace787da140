//! # Blueprint - Lazily Normalized Blueprint Façade
//!
//! A `Blueprint` owns the raw props of one blueprint together with the
//! model it describes. Normalization runs on first access and is cached for
//! the lifetime of the instance:
//!
//! ```text
//! Unnormalized ──(first accessor)──▶ Normalizing ──▶ Normalized
//! ```
//!
//! The pipeline inside the transition is
//! `extend → preset → name/title → desugar → normalize tabs`.
//!
//! The `fields()`, `sections()` and `accepted_file_templates()` projections
//! are cached independently on top of the normalized tree. Building a new
//! instance is the only way to invalidate them.

use crate::accept_rules::AcceptRules;
use crate::context::NormalizeContext;
use crate::desugar::desugar;
use crate::diagnostics::Diagnostic;
use crate::error::{BlueprintError, BlueprintResult};
use crate::node::{Field, NormalizedBlueprint, Section, Tab};
use crate::normalizer::{take_string, Normalizer};
use crate::ordered_map::OrderedMap;
use crate::visitor::{FieldCollector, SectionCollector, Visitor};
use crate::Props;
use folio_common::Model;
use folio_registry::LoadError;
use serde_json::Value;
use std::cell::{Cell, OnceCell};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info, instrument};

const DEFAULT_NAME: &str = "default";

/// Name of the tab, column and section created from shorthand props
const MAIN: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintState {
    Unnormalized,
    Normalizing,
    Normalized,
}

pub struct Blueprint {
    raw_props: Props,
    model: Arc<dyn Model>,
    ctx: NormalizeContext,
    state: Cell<BlueprintState>,
    normalized: OnceCell<NormalizedBlueprint>,
    fields: OnceCell<OrderedMap<Field>>,
    sections: OnceCell<OrderedMap<Section>>,
    accepted_file_templates: OnceCell<Vec<String>>,
}

impl Blueprint {
    pub fn new(props: Props, model: Arc<dyn Model>, ctx: NormalizeContext) -> Self {
        Self {
            raw_props: props,
            model,
            ctx,
            state: Cell::new(BlueprintState::Unnormalized),
            normalized: OnceCell::new(),
            fields: OnceCell::new(),
            sections: OnceCell::new(),
            accepted_file_templates: OnceCell::new(),
        }
    }

    /// Build a blueprint from untyped input
    ///
    /// This is the one place construction can fail: the model is required
    /// and the props must be a map.
    pub fn from_value(
        value: Value,
        model: Option<Arc<dyn Model>>,
        ctx: NormalizeContext,
    ) -> BlueprintResult<Self> {
        let model = model.ok_or(BlueprintError::MissingModel)?;

        match value {
            Value::Object(props) => Ok(Self::new(props, model, ctx)),
            other => Err(BlueprintError::InvalidProps {
                found: value_kind(&other).to_string(),
            }),
        }
    }

    /// Load a named blueprint through the registry
    ///
    /// Falls back to `fallback` when `name` cannot be loaded. Returns
    /// `Ok(None)` when no candidate exists.
    pub fn factory(
        name: &str,
        fallback: Option<&str>,
        model: Arc<dyn Model>,
        ctx: NormalizeContext,
    ) -> BlueprintResult<Option<Self>> {
        let props = match Self::load(&ctx, name) {
            Ok(props) => props,
            Err(err) => {
                let Some(fallback) = fallback else {
                    return match err {
                        LoadError::NotFound { .. } => Ok(None),
                        err => Err(err.into()),
                    };
                };

                debug!(blueprint = %name, fallback = %fallback, error = %err, "Using fallback blueprint");
                match Self::load(&ctx, fallback) {
                    Ok(props) => props,
                    Err(LoadError::NotFound { .. }) => return Ok(None),
                    Err(err) => return Err(err.into()),
                }
            }
        };

        Ok(Some(Self::new(props, model, ctx)))
    }

    fn load(ctx: &NormalizeContext, name: &str) -> Result<Props, LoadError> {
        let mut props = ctx.registry.find(name)?;
        props
            .entry("name")
            .or_insert_with(|| Value::String(name.to_string()));
        Ok(props)
    }

    pub fn state(&self) -> BlueprintState {
        self.state.get()
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    /// Props as passed in, before extension and normalization
    pub fn raw_props(&self) -> &Props {
        &self.raw_props
    }

    /// The normalized tree, computed on first access
    pub fn try_normalized(&self) -> BlueprintResult<&NormalizedBlueprint> {
        if let Some(normalized) = self.normalized.get() {
            return Ok(normalized);
        }

        if self.state.get() == BlueprintState::Normalizing {
            return Err(BlueprintError::Reentrant);
        }

        self.state.set(BlueprintState::Normalizing);
        let normalized = self.normalize();
        self.state.set(BlueprintState::Normalized);

        Ok(self.normalized.get_or_init(|| normalized))
    }

    /// The normalized tree, or an empty tree if normalization re-entered
    pub fn normalized(&self) -> &NormalizedBlueprint {
        match self.try_normalized() {
            Ok(normalized) => normalized,
            Err(err) => {
                error!(model = %self.model.id(), error = %err, "Blueprint is not available");
                empty()
            }
        }
    }

    #[instrument(skip(self), fields(model = %self.model.id()))]
    fn normalize(&self) -> NormalizedBlueprint {
        info!("Starting blueprint normalization");
        let ctx = &self.ctx;

        let props = ctx.registry.extend(self.raw_props.clone());
        let mut props = ctx.registry.apply_preset(props, ctx.translator.as_ref());

        let name = take_string(&mut props, "name").unwrap_or_else(|| DEFAULT_NAME.to_string());
        let title = ctx.label(props.remove("title").as_ref(), &name);
        let title = self.model.render(&title);

        let mut props = desugar(MAIN, props);
        let tabs = props.remove("tabs").unwrap_or(Value::Null);

        let mut normalizer = Normalizer::new(ctx).with_model(self.model.as_ref());
        let tabs = normalizer.normalize_tabs(tabs);
        let diagnostics = normalizer.into_diagnostics();

        info!(
            blueprint = %name,
            tabs = tabs.len(),
            diagnostics = diagnostics.len(),
            "Blueprint normalization complete"
        );

        NormalizedBlueprint {
            name,
            title,
            tabs,
            props,
            diagnostics,
        }
    }

    pub fn name(&self) -> &str {
        &self.normalized().name
    }

    pub fn title(&self) -> &str {
        &self.normalized().title
    }

    pub fn icon(&self) -> Option<&str> {
        self.prop_unsafe("icon").and_then(Value::as_str)
    }

    pub fn tabs(&self) -> &OrderedMap<Tab> {
        &self.normalized().tabs
    }

    pub fn tab(&self, name: &str) -> Option<&Tab> {
        self.tabs().get(name)
    }

    /// All sections of all tabs; a later section replaces an earlier one
    /// with the same name
    pub fn sections(&self) -> &OrderedMap<Section> {
        self.sections.get_or_init(|| {
            let mut collector = SectionCollector::default();
            collector.visit_blueprint(self.normalized());
            collector.sections
        })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections().get(name)
    }

    /// Top-level fields of all `fields` sections
    pub fn fields(&self) -> &OrderedMap<Field> {
        self.fields.get_or_init(|| {
            let mut collector = FieldCollector::default();
            collector.visit_blueprint(self.normalized());
            collector.fields
        })
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().get(name)
    }

    /// Raw access to a normalized top-level prop without a typed accessor
    pub fn prop_unsafe(&self, key: &str) -> Option<&Value> {
        self.normalized().prop(key)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.normalized().diagnostics
    }

    pub fn to_value(&self) -> BlueprintResult<Value> {
        Ok(self.try_normalized()?.to_value()?)
    }

    /// File templates that may be uploaded to the model
    ///
    /// With `in_section` only that section is scanned and the result is not
    /// cached.
    pub fn accepted_file_templates(&self, in_section: Option<&str>) -> Vec<String> {
        let model_id = self.model.id();

        match in_section {
            Some(name) => AcceptRules::collect(model_id, self.section(name)),
            None => self
                .accepted_file_templates
                .get_or_init(|| AcceptRules::collect(model_id, self.sections().values()))
                .clone(),
        }
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("model", &self.model.id())
            .field("state", &self.state.get())
            .field("raw_props", &self.raw_props)
            .finish_non_exhaustive()
    }
}

fn empty() -> &'static NormalizedBlueprint {
    static EMPTY: OnceLock<NormalizedBlueprint> = OnceLock::new();
    EMPTY.get_or_init(NormalizedBlueprint::default)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
