//! Patch normalization applied before updates reach the store.

use serde_json::{Map, Value};

/// Replace empty-string values for the given keys with JSON null.
///
/// The admin forms submit `""` when an optional reference is cleared; stored
/// records represent "none" as an absent field, so the merge must see null
/// rather than an empty string.
pub fn blank_refs_to_null(patch: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        if patch
            .get(*key)
            .and_then(Value::as_str)
            .is_some_and(str::is_empty)
        {
            patch.insert((*key).to_string(), Value::Null);
        }
    }
}
