use serde_json::{Map, Value};

use crate::error::{FactoryError, Result};

/// Ordered mapping from field name to value.
///
/// Insertion order is preserved, so generator output order survives a merge.
pub type AttributeMap = Map<String, Value>;

/// Overlay `overrides` onto `defaults`.
///
/// The merge is shallow: an override replaces the default value for the same
/// key outright, nested objects are not combined. Keys keep their position in
/// `defaults`; override-only keys are appended in the order they were given.
pub fn merge_attributes(mut defaults: AttributeMap, overrides: AttributeMap) -> AttributeMap {
    for (key, value) in overrides {
        defaults.insert(key, value);
    }
    defaults
}

/// Convert a JSON value into an attribute map.
pub fn into_attributes(value: Value) -> Result<AttributeMap> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(AttributeMap::new()),
        other => Err(FactoryError::InvalidDefinition(format!(
            "expected an object of attributes, got {other}"
        ))),
    }
}

/// Build an [`AttributeMap`] from `"key": value` pairs.
///
/// Values go through `serde_json::json!`, so anything serializable works.
///
/// ```
/// let attrs = fixtura_core::attributes! { "id": 7, "name": "ada" };
/// assert_eq!(attrs["id"], 7);
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::AttributeMap::new()
    };
    ($($key:literal : $value:expr),+ $(,)?) => {{
        let mut map = $crate::AttributeMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::__json!($value));
        )+
        map
    }};
}
