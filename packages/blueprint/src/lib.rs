//! # Folio Blueprint Engine
//!
//! Turns a loosely structured blueprint document into one canonical tree of
//! tabs, columns, sections and fields.
//!
//! The pipeline runs in this order:
//!
//! 1. `extends` resolution and preset injection (`folio_registry`)
//! 2. shorthand desugaring: `fields` → section → column → tab
//! 3. tab, column, section and field normalization with per-node recovery
//! 4. derived data such as accepted file templates
//!
//! Broken definitions never abort normalization. They are replaced by
//! visible `info` placeholder nodes and reported as [`Diagnostic`]s.
//!
//! ```rust,ignore
//! use folio_blueprint::{Blueprint, NormalizeContext};
//! use folio_common::StaticModel;
//! use folio_registry::{BlueprintRegistry, DirectoryLoader};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(BlueprintRegistry::new(DirectoryLoader::new("blueprints")));
//! let ctx = NormalizeContext::new(registry);
//! let model = Arc::new(StaticModel::new("blog"));
//!
//! let blueprint = Blueprint::factory("pages/blog", Some("pages/default"), model, ctx)?
//!     .expect("blueprint exists");
//! println!("{}", blueprint.title());
//! ```

pub mod accept_rules;
pub mod blueprint;
pub mod context;
pub mod declaration;
pub mod desugar;
pub mod diagnostics;
pub mod error;
pub mod node;
pub mod normalizer;
pub mod ordered_map;
pub mod types;
pub mod visitor;

mod columns;
mod fields;
mod sections;
mod tabs;

#[cfg(test)]
mod tests_accept_rules;


#[cfg(test)]
mod tests_normalization;

#[cfg(test)]
mod tests_shorthand;

pub use accept_rules::AcceptRules;
pub use blueprint::{Blueprint, BlueprintState};
pub use context::NormalizeContext;
pub use declaration::Declaration;
pub use diagnostics::{Diagnostic, DiagnosticLevel};
pub use error::{BlueprintError, FieldError};
pub use node::{
    Column, Field, Fieldset, FieldsetDefinition, FieldsetTab, NormalizedBlueprint, Section, Tab,
};
pub use normalizer::{FieldOutcome, Normalizer};
pub use ordered_map::OrderedMap;
pub use types::TypeRegistry;
pub use visitor::Visitor;

pub use folio_registry::Props;
