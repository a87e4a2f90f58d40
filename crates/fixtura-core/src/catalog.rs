use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;

use crate::attributes::AttributeMap;
use crate::error::{FactoryError, Result};
use crate::model::{Model, SetterTable};

/// Type-erased construction capability for a registered model.
pub trait ModelBlueprint {
    fn model_id(&self) -> &str;

    /// Rust type backing the model.
    fn model_type(&self) -> TypeId;

    fn has_field(&self, name: &str) -> bool;

    /// Build a default instance and apply `attributes` in order.
    ///
    /// The first failing key aborts the build and the instance is dropped.
    fn build(&self, attributes: AttributeMap) -> Result<Box<dyn Any>>;
}

struct TypedBlueprint<M: Model> {
    setters: SetterTable<M>,
}

impl<M: Model> ModelBlueprint for TypedBlueprint<M> {
    fn model_id(&self) -> &str {
        M::MODEL_ID
    }

    fn model_type(&self) -> TypeId {
        TypeId::of::<M>()
    }

    fn has_field(&self, name: &str) -> bool {
        self.setters.contains(name)
    }

    fn build(&self, attributes: AttributeMap) -> Result<Box<dyn Any>> {
        let mut model = M::default();
        for (key, value) in attributes {
            self.setters.apply(M::MODEL_ID, &mut model, &key, value)?;
        }
        Ok(Box::new(model))
    }
}

/// Registry of constructible models keyed by model id.
#[derive(Default)]
pub struct ModelCatalog {
    entries: BTreeMap<String, Box<dyn ModelBlueprint>>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `M` under [`Model::MODEL_ID`], building its setter table.
    ///
    /// Returns `false` when the id was already registered; the existing
    /// entry is kept.
    pub fn register<M: Model>(&mut self) -> bool {
        if self.entries.contains_key(M::MODEL_ID) {
            return false;
        }
        let blueprint = TypedBlueprint::<M> {
            setters: M::setters(),
        };
        self.entries
            .insert(M::MODEL_ID.to_string(), Box::new(blueprint));
        true
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.entries.contains_key(model_id)
    }

    pub fn blueprint(&self, model_id: &str) -> Result<&dyn ModelBlueprint> {
        self.entries
            .get(model_id)
            .map(|entry| entry.as_ref())
            .ok_or_else(|| FactoryError::ModelNotFound(model_id.to_string()))
    }

    /// Ensure the id is bound to `M`, registering it if absent.
    pub fn ensure<M: Model>(&mut self) -> Result<()> {
        self.register::<M>();
        let blueprint = self.blueprint(M::MODEL_ID)?;
        if blueprint.model_type() != TypeId::of::<M>() {
            return Err(FactoryError::ModelTypeMismatch(M::MODEL_ID.to_string()));
        }
        Ok(())
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ModelCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCatalog")
            .field("models", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
