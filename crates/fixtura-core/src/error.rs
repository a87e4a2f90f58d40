use std::path::PathBuf;

use thiserror::Error;

/// Error type shared across Fixtura crates.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A generator is already registered for the model.
    #[error("definition for '{0}' is already defined")]
    AlreadyDefined(String),
    /// The supplied definition cannot be invoked as a generator.
    #[error("definition for '{0}' is not callable")]
    NotCallable(String),
    /// No generator is registered for the model.
    #[error("definition for '{0}' not found")]
    DefinitionNotFound(String),
    /// The model id does not resolve to a constructible model.
    #[error("model '{0}' not found")]
    ModelNotFound(String),
    /// The model id is bound to a different Rust type.
    #[error("model '{0}' is registered with a different type")]
    ModelTypeMismatch(String),
    /// An attribute key has no setter on the model.
    #[error("setter `{setter}` is not callable on model '{model}' for key '{key}'")]
    SetterNotCallable {
        model: String,
        key: String,
        setter: String,
    },
    /// A setter rejected the value it was given.
    #[error("invalid value for '{model}.{key}': {source}")]
    InvalidValue {
        model: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// A definition location is missing or not a directory.
    #[error("definition location not found: {}", .0.display())]
    LocationNotFound(PathBuf),
    /// A definition file or field spec is malformed.
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),
    #[error("unsupported faker id '{0}'")]
    UnknownFaker(String),
    #[error("unsupported faker locale '{0}'")]
    UnsupportedLocale(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by Fixtura crates.
pub type Result<T> = std::result::Result<T, FactoryError>;
