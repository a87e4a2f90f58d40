use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use fixtura_core::{AttributeMap, FactoryError, Model, ModelCatalog, Result, merge_attributes};
use fixtura_faker::{DataProvider, FakerProvider};

use crate::generator::{FnGenerator, Generator};
use crate::loader::{DefinitionLoader, DefinitionModule};
use crate::template::TemplateGenerator;

/// Registry of model definitions and builder of populated model instances.
///
/// Holds at most one generator per model id for its whole lifetime and a
/// single shared [`DataProvider`] passed to every generator call.
pub struct Factory {
    definitions: BTreeMap<String, Box<dyn Generator>>,
    models: ModelCatalog,
    provider: Rc<dyn DataProvider>,
}

impl Factory {
    /// Empty factory with an entropy-seeded [`FakerProvider`].
    pub fn new() -> Self {
        Self::with_data_provider(Rc::new(FakerProvider::default()))
    }

    pub fn with_data_provider(provider: Rc<dyn DataProvider>) -> Self {
        Self {
            definitions: BTreeMap::new(),
            models: ModelCatalog::new(),
            provider,
        }
    }

    pub fn data_provider(&self) -> Rc<dyn DataProvider> {
        Rc::clone(&self.provider)
    }

    pub fn set_data_provider(&mut self, provider: Rc<dyn DataProvider>) -> &mut Self {
        self.provider = provider;
        self
    }

    /// Register a closure generator for `model_id`.
    ///
    /// ```
    /// use fixtura_core::attributes;
    /// use fixtura_factory::Factory;
    ///
    /// let mut factory = Factory::new();
    /// factory
    ///     .define("user", |faker, _| attributes! { "name": faker.name() })
    ///     .expect("first definition");
    /// assert!(factory.has("user"));
    /// ```
    pub fn define<F>(&mut self, model_id: impl Into<String>, generator: F) -> Result<&mut Self>
    where
        F: Fn(&dyn DataProvider, &AttributeMap) -> AttributeMap + 'static,
    {
        self.define_generator(model_id, Box::new(FnGenerator::new(generator)))
    }

    pub fn define_generator(
        &mut self,
        model_id: impl Into<String>,
        generator: Box<dyn Generator>,
    ) -> Result<&mut Self> {
        let model_id = model_id.into();
        self.ensure_undefined(&model_id)?;
        self.insert_definition(model_id, generator);
        Ok(self)
    }

    /// Register a declarative definition from an object of field specs.
    ///
    /// A value that is not an object cannot act as a generator and fails with
    /// [`FactoryError::NotCallable`]; the registry is left untouched on error.
    pub fn define_template(&mut self, model_id: impl Into<String>, fields: &Value) -> Result<&mut Self> {
        let model_id = model_id.into();
        self.ensure_undefined(&model_id)?;
        let template = TemplateGenerator::from_value(&model_id, fields)?
            .ok_or_else(|| FactoryError::NotCallable(model_id.clone()))?;
        self.insert_definition(model_id, Box::new(template));
        Ok(self)
    }

    fn ensure_undefined(&self, model_id: &str) -> Result<()> {
        if self.has(model_id) {
            return Err(FactoryError::AlreadyDefined(model_id.to_string()));
        }
        Ok(())
    }

    fn insert_definition(&mut self, model_id: String, generator: Box<dyn Generator>) {
        debug!(model = %model_id, "definition registered");
        self.definitions.insert(model_id, generator);
    }

    pub fn has(&self, model_id: &str) -> bool {
        self.definitions.contains_key(model_id)
    }

    fn definition(&self, model_id: &str) -> Result<&dyn Generator> {
        self.definitions
            .get(model_id)
            .map(|generator| generator.as_ref())
            .ok_or_else(|| FactoryError::DefinitionNotFound(model_id.to_string()))
    }

    /// Registered model ids, sorted.
    pub fn definition_ids(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Make `M` constructible under [`Model::MODEL_ID`] for [`Factory::create_model`].
    pub fn register_model<M: Model>(&mut self) -> Result<&mut Self> {
        self.models.ensure::<M>()?;
        Ok(self)
    }

    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    /// Generated defaults with `overrides` overlaid, without building a model.
    pub fn attributes_for(&self, model_id: &str, overrides: AttributeMap) -> Result<AttributeMap> {
        let generator = self.definition(model_id)?;
        self.generate(generator, overrides)
    }

    fn generate(&self, generator: &dyn Generator, overrides: AttributeMap) -> Result<AttributeMap> {
        let defaults = generator.generate(self.provider.as_ref(), &overrides)?;
        Ok(merge_attributes(defaults, overrides))
    }

    /// Build the model registered under `model_id`.
    ///
    /// The definition is resolved before the model, and the generator runs
    /// only once both exist. Keys without a setter fail the whole call.
    pub fn create_model(&self, model_id: &str, overrides: AttributeMap) -> Result<Box<dyn Any>> {
        let generator = self.definition(model_id)?;
        let blueprint = self.models.blueprint(model_id)?;
        let attributes = self.generate(generator, overrides)?;
        let fields = attributes.len();
        let instance = blueprint.build(attributes)?;
        debug!(model = %model_id, fields, "instance created");
        Ok(instance)
    }

    /// Build a typed model, registering `M` on first use.
    pub fn create<M: Model>(&mut self, overrides: AttributeMap) -> Result<M> {
        if !self.has(M::MODEL_ID) {
            return Err(FactoryError::DefinitionNotFound(M::MODEL_ID.to_string()));
        }
        self.models.ensure::<M>()?;
        let instance = self.create_model(M::MODEL_ID, overrides)?;
        instance
            .downcast::<M>()
            .map(|model| *model)
            .map_err(|_| FactoryError::ModelTypeMismatch(M::MODEL_ID.to_string()))
    }

    pub fn create_default<M: Model>(&mut self) -> Result<M> {
        self.create::<M>(AttributeMap::new())
    }

    /// Build `count` models sharing the same overrides.
    pub fn create_many<M: Model>(&mut self, count: usize, overrides: &AttributeMap) -> Result<Vec<M>> {
        (0..count)
            .map(|_| self.create::<M>(overrides.clone()))
            .collect()
    }

    /// Run a definition module against this factory.
    pub fn register_module<D: DefinitionModule + ?Sized>(&mut self, module: &D) -> Result<&mut Self> {
        debug!(module = %module.name(), "registering definition module");
        module.register(self)?;
        Ok(self)
    }

    pub fn register_modules(&mut self, modules: &[&dyn DefinitionModule]) -> Result<&mut Self> {
        for module in modules {
            self.register_module(*module)?;
        }
        Ok(self)
    }

    /// Load every definition file found under `locations`.
    ///
    /// Each location must be an existing directory. Files are registered in
    /// traversal order and a failing file aborts the load without undoing
    /// earlier registrations.
    pub fn load_definitions<P: AsRef<Path>>(&mut self, locations: &[P]) -> Result<&mut Self> {
        DefinitionLoader::new().load(self, locations)?;
        Ok(self)
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("definitions", &self.definition_ids())
            .field("models", &self.models)
            .field("locale", &self.provider.locale())
            .finish()
    }
}
