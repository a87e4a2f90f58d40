use fixtura_core::{AttributeMap, Result};
use fixtura_faker::DataProvider;

/// Produces default attributes for a model.
///
/// Called exactly once per `create`, with the factory's current provider and
/// the caller's overrides exactly as given.
pub trait Generator {
    fn generate(&self, provider: &dyn DataProvider, overrides: &AttributeMap)
    -> Result<AttributeMap>;
}

/// Adapter turning an infallible closure into a [`Generator`].
pub struct FnGenerator<F>(F);

impl<F> FnGenerator<F>
where
    F: Fn(&dyn DataProvider, &AttributeMap) -> AttributeMap,
{
    pub fn new(generator: F) -> Self {
        Self(generator)
    }
}

impl<F> Generator for FnGenerator<F>
where
    F: Fn(&dyn DataProvider, &AttributeMap) -> AttributeMap,
{
    fn generate(
        &self,
        provider: &dyn DataProvider,
        overrides: &AttributeMap,
    ) -> Result<AttributeMap> {
        Ok((self.0)(provider, overrides))
    }
}
