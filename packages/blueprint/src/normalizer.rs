//! # Normalizer - Tree Normalization with Per-Node Recovery
//!
//! The normalizer walks tabs → columns → sections → fields, fills defaults,
//! translates labels and validates types. It never fails: a broken node is
//! swapped for an `info` placeholder in place and recorded as a
//! [`Diagnostic`].
//!
//! The passes live in their own modules (`fields`, `sections`, `columns`,
//! `tabs`) as `impl Normalizer` blocks. This module holds the shared state:
//!
//! - **seen_fields**: top-level field names across all `fields` sections,
//!   used to detect duplicates
//! - **path**: the current location, used for diagnostics
//! - **diagnostics**: everything recovered from so far
//!
//! One normalizer is used for one blueprint. Its duplicate detection spans
//! every tab it normalizes.

use crate::context::NormalizeContext;
use crate::diagnostics::Diagnostic;
use crate::node::Field;
use crate::ordered_map::OrderedMap;
use crate::Props;
use folio_common::Model;
use serde_json::Value;
use std::collections::HashSet;

/// Result of normalizing a single field declaration
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Field(Field),
    /// A group, to be spliced into its parent at its own position
    Group {
        name: String,
        fields: OrderedMap<Field>,
    },
}

pub struct Normalizer<'a> {
    pub(crate) ctx: &'a NormalizeContext,
    pub(crate) model: Option<&'a dyn Model>,
    pub(crate) seen_fields: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
    path: Vec<String>,
}

impl<'a> Normalizer<'a> {
    pub fn new(ctx: &'a NormalizeContext) -> Self {
        Self {
            ctx,
            model: None,
            seen_fields: HashSet::new(),
            diagnostics: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Normalize on behalf of a model (tab links, `{{ }}` rendering)
    pub fn with_model(mut self, model: &'a dyn Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Dotted path of the node currently being normalized
    pub(crate) fn path(&self) -> String {
        self.path.join(".")
    }

    /// Path of a child of the current node
    pub(crate) fn path_to(&self, child: &str) -> String {
        if self.path.is_empty() {
            child.to_string()
        } else {
            format!("{}.{}", self.path(), child)
        }
    }

    pub(crate) fn enter(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Run `f` with `segments` pushed onto the path
    pub(crate) fn within<T>(&mut self, segments: &[&str], f: impl FnOnce(&mut Self) -> T) -> T {
        for segment in segments {
            self.enter(*segment);
        }
        let result = f(self);
        for _ in segments {
            self.leave();
        }
        result
    }
}

/// Take a string prop, dropping any non-string value
pub(crate) fn take_string(props: &mut Props, key: &str) -> Option<String> {
    match props.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Map entries of a list or map value, keyed by index or key
///
/// Anything else has no entries.
pub(crate) fn entries(value: Value) -> Vec<(String, Value)> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        _ => Vec::new(),
    }
}
