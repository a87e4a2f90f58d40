use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use fixtura_core::{FactoryError, Result};
use fixtura_faker::{FakerProvider, LocaleKey};

use crate::factory::Factory;
use crate::loader::{DEFAULT_DEFINITION_PATTERN, DefinitionLoader};

/// Conventional name of the factory configuration file.
pub const CONFIG_FILE_NAME: &str = "fixtura.toml";

/// Settings used to assemble a [`Factory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Locale of the default faker provider.
    pub locale: LocaleKey,
    /// Seed for reproducible fixtures; a random seed is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Directories scanned for definition files.
    pub definition_paths: Vec<PathBuf>,
    /// Regex matched against file names during discovery.
    pub definition_pattern: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            locale: LocaleKey::default(),
            seed: None,
            definition_paths: Vec::new(),
            definition_pattern: DEFAULT_DEFINITION_PATTERN.to_string(),
        }
    }
}

impl FactoryConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| FactoryError::Config(err.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| FactoryError::Config(err.to_string()))
    }

    /// Make relative definition paths relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for path in &mut self.definition_paths {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    pub fn provider(&self) -> FakerProvider {
        match self.seed {
            Some(seed) => FakerProvider::seeded(self.locale, seed),
            None => FakerProvider::new(self.locale),
        }
    }
}

/// Read a config file; relative definition paths resolve against its directory.
pub fn load_config(path: &Path) -> Result<FactoryConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config = FactoryConfig::from_toml_str(&contents)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
}

impl Factory {
    /// Factory with the configured provider and all configured definitions loaded.
    pub fn from_config(config: &FactoryConfig) -> Result<Self> {
        let mut factory = Factory::with_data_provider(Rc::new(config.provider()));
        let loader = DefinitionLoader::with_pattern(&config.definition_pattern)?;
        loader.load(&mut factory, config.definition_paths.as_slice())?;
        Ok(factory)
    }
}
