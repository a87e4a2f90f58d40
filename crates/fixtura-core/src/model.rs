use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FactoryError, Result};

/// A model the factory can construct and populate.
///
/// Implementors are built with `Default` and filled field by field through the
/// setters returned by [`Model::setters`].
pub trait Model: Default + 'static {
    /// Identifier the model's definition is registered under.
    const MODEL_ID: &'static str;

    /// Setter table for the model's assignable fields.
    fn setters() -> SetterTable<Self>;
}

type SetterFn<M> = Box<dyn Fn(&mut M, Value) -> std::result::Result<(), serde_json::Error>>;

/// Field-name to setter mapping for a single model type.
pub struct SetterTable<M> {
    setters: HashMap<String, SetterFn<M>>,
    order: Vec<String>,
}

impl<M: 'static> SetterTable<M> {
    pub fn new() -> Self {
        Self {
            setters: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a typed setter for `name`.
    ///
    /// The incoming JSON value is deserialized into `T` before the setter
    /// runs; registering the same name twice replaces the earlier setter.
    pub fn field<T, F>(mut self, name: &str, setter: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&mut M, T) + 'static,
    {
        let wrapped: SetterFn<M> = Box::new(move |model, value| {
            let typed = serde_json::from_value::<T>(value)?;
            setter(model, typed);
            Ok(())
        });
        if self.setters.insert(name.to_string(), wrapped).is_none() {
            self.order.push(name.to_string());
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }

    /// Field names in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Assign `value` to the field `key` of `model`.
    pub fn apply(&self, model_id: &str, model: &mut M, key: &str, value: Value) -> Result<()> {
        let setter = self
            .setters
            .get(key)
            .ok_or_else(|| FactoryError::SetterNotCallable {
                model: model_id.to_string(),
                key: key.to_string(),
                setter: setter_name(key),
            })?;
        setter(model, value).map_err(|source| FactoryError::InvalidValue {
            model: model_id.to_string(),
            key: key.to_string(),
            source,
        })
    }
}

impl<M: 'static> Default for SetterTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for SetterTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetterTable")
            .field("fields", &self.order)
            .finish()
    }
}

/// Conventional setter name for an attribute key (`name` -> `set_name`).
pub fn setter_name(key: &str) -> String {
    format!("set_{key}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default)]
    struct Probe {
        count: u32,
        label: String,
    }

    fn table() -> SetterTable<Probe> {
        SetterTable::new()
            .field("count", |probe: &mut Probe, count: u32| probe.count = count)
            .field("label", |probe: &mut Probe, label: String| probe.label = label)
    }

    #[test]
    fn applies_typed_values() {
        let setters = table();
        let mut probe = Probe::default();

        setters.apply("probe", &mut probe, "count", json!(3)).expect("count");
        setters
            .apply("probe", &mut probe, "label", json!("x"))
            .expect("label");

        assert_eq!(probe.count, 3);
        assert_eq!(probe.label, "x");
        assert_eq!(setters.field_names().collect::<Vec<_>>(), ["count", "label"]);
    }

    #[test]
    fn missing_setter_names_key() {
        let mut probe = Probe::default();
        let err = table()
            .apply("probe", &mut probe, "colour", json!("red"))
            .unwrap_err();

        match err {
            FactoryError::SetterNotCallable { model, key, setter } => {
                assert_eq!(model, "probe");
                assert_eq!(key, "colour");
                assert_eq!(setter, "set_colour");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mistyped_value_is_invalid() {
        let mut probe = Probe::default();
        let err = table()
            .apply("probe", &mut probe, "count", json!("three"))
            .unwrap_err();

        assert!(matches!(err, FactoryError::InvalidValue { ref key, .. } if key == "count"));
        assert_eq!(probe.count, 0);
    }
}
