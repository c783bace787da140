pub mod extend;
pub mod loader;
pub mod merge;
pub mod presets;
pub mod registry;

pub use loader::*;
pub use merge::merge_replace;
pub use presets::{Preset, PresetFn};
pub use registry::*;

/// A props map as authored in a blueprint (insertion ordered)
pub type Props = serde_json::Map<String, serde_json::Value>;
