//! Core contracts shared across Fixtura crates.
//!
//! This crate defines the shared error type, ordered attribute maps and their
//! merge rule, the [`Model`] trait with its setter tables, and the catalog of
//! constructible models.

pub mod attributes;
pub mod catalog;
pub mod error;
pub mod model;

pub use attributes::{AttributeMap, into_attributes, merge_attributes};
pub use catalog::{ModelBlueprint, ModelCatalog};
pub use error::{FactoryError, Result};
pub use model::{Model, SetterTable, setter_name};

#[doc(hidden)]
pub use serde_json::json as __json;
