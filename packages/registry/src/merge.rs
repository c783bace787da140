use crate::Props;
use serde_json::Value;

/// Merge `overlay` on top of `base`
///
/// Nested maps are merged key by key. Every other value in the overlay
/// (lists included) replaces the base value as a whole, so a child
/// blueprint can swap out an inherited `options` list instead of appending
/// to it. Keys keep their position in `base`; new keys are appended.
pub fn merge_replace(mut base: Props, overlay: Props) -> Props {
    for (key, value) in overlay {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = base.get_mut(&key) {
                let current = std::mem::take(existing);
                *existing = merge_replace(current, incoming);
                continue;
            }
            base.insert(key, Value::Object(incoming));
        } else {
            base.insert(key, value);
        }
    }

    base
}
