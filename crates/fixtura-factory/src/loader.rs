use std::path::{Path, PathBuf};

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use walkdir::WalkDir;

use fixtura_core::{FactoryError, Result};

use crate::factory::Factory;

/// File names treated as definition files unless configured otherwise.
pub const DEFAULT_DEFINITION_PATTERN: &str = r"(?i)^.+\.(toml|json)$";

/// A unit of definitions registered against an explicitly passed factory.
pub trait DefinitionModule {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn register(&self, factory: &mut Factory) -> Result<()>;
}

impl<F> DefinitionModule for F
where
    F: Fn(&mut Factory) -> Result<()>,
{
    fn register(&self, factory: &mut Factory) -> Result<()> {
        self(factory)
    }
}

/// Serialization format of a definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Toml,
    Json,
}

impl DefinitionFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// One model definition inside a definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DefinitionEntry {
    /// Model id the generator is registered under.
    pub model: String,
    /// Field name to field spec (directive object or literal value).
    #[serde(default)]
    pub fields: Value,
}

/// Parsed definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DefinitionFile {
    #[serde(skip)]
    name: String,
    #[serde(default)]
    pub definitions: Vec<DefinitionEntry>,
}

impl DefinitionFile {
    pub fn parse(name: impl Into<String>, contents: &str, format: DefinitionFormat) -> Result<Self> {
        let name = name.into();
        let parsed: std::result::Result<DefinitionFile, String> = match format {
            DefinitionFormat::Toml => toml::from_str(contents).map_err(|err| err.to_string()),
            DefinitionFormat::Json => serde_json::from_str(contents).map_err(|err| err.to_string()),
        };
        let mut file =
            parsed.map_err(|err| FactoryError::InvalidDefinition(format!("{name}: {err}")))?;
        file.name = name;
        Ok(file)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let format = DefinitionFormat::from_path(path).ok_or_else(|| {
            FactoryError::InvalidDefinition(format!(
                "{}: unsupported definition format",
                path.display()
            ))
        })?;
        let contents = std::fs::read_to_string(path)?;
        Self::parse(path.display().to_string(), &contents, format)
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|entry| entry.model.as_str())
    }
}

impl DefinitionModule for DefinitionFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, factory: &mut Factory) -> Result<()> {
        for entry in &self.definitions {
            factory.define_template(entry.model.as_str(), &entry.fields)?;
        }
        Ok(())
    }
}

/// Discovers definition files under directories and registers them.
#[derive(Debug, Clone)]
pub struct DefinitionLoader {
    pattern: Regex,
}

impl DefinitionLoader {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_DEFINITION_PATTERN).expect("default pattern compiles"),
        }
    }

    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|err| FactoryError::Config(format!("invalid definition pattern: {err}")))?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Definition files under `location`, recursively, sorted by path.
    pub fn discover(&self, location: &Path) -> Result<Vec<PathBuf>> {
        if !location.is_dir() {
            return Err(FactoryError::LocationNotFound(location.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(location).sort_by_file_name() {
            let entry = entry.map_err(|err| FactoryError::Io(err.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.pattern.is_match(name));
            if matches {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Register every definition file under `locations` into `factory`.
    ///
    /// Returns the number of files loaded.
    pub fn load<P: AsRef<Path>>(&self, factory: &mut Factory, locations: &[P]) -> Result<usize> {
        let mut loaded = 0;
        for location in locations {
            let location = location.as_ref();
            let files = self.discover(location)?;
            for path in &files {
                let file = DefinitionFile::read(path)?;
                factory.register_module(&file)?;
            }
            info!(
                location = %location.display(),
                files = files.len(),
                definitions = factory.len(),
                "definitions loaded"
            );
            loaded += files.len();
        }
        Ok(loaded)
    }
}

impl Default for DefinitionLoader {
    fn default() -> Self {
        Self::new()
    }
}
