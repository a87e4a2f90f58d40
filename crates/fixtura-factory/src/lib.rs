//! Test-fixture object factory.
//!
//! Register a generator per model id, then build populated models with
//! defaults from the generator and caller overrides on top:
//!
//! ```
//! use fixtura_core::{Model, SetterTable, attributes};
//! use fixtura_factory::Factory;
//!
//! #[derive(Default)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Model for User {
//!     const MODEL_ID: &'static str = "user";
//!
//!     fn setters() -> SetterTable<Self> {
//!         SetterTable::new()
//!             .field("id", |user: &mut User, id: i64| user.id = id)
//!             .field("name", |user: &mut User, name: String| user.name = name)
//!     }
//! }
//!
//! let mut factory = Factory::new();
//! factory
//!     .define("user", |faker, _| attributes! { "id": faker.int_between(1, 99), "name": faker.name() })
//!     .expect("define user");
//!
//! let user: User = factory.create(attributes! { "name": "ada" }).expect("create user");
//! assert_eq!(user.name, "ada");
//! assert!((1..=99).contains(&user.id));
//! ```
//!
//! Definitions can also live in TOML/JSON files loaded with
//! [`Factory::load_definitions`], or in Rust [`DefinitionModule`]s.

pub mod config;
pub mod factory;
pub mod generator;
pub mod loader;
pub mod logging;
pub mod schema;
pub mod template;

pub use config::{CONFIG_FILE_NAME, FactoryConfig, load_config};
pub use factory::Factory;
pub use generator::{FnGenerator, Generator};
pub use loader::{
    DEFAULT_DEFINITION_PATTERN, DefinitionEntry, DefinitionFile, DefinitionFormat,
    DefinitionLoader, DefinitionModule,
};
pub use schema::definition_file_json_schema;
pub use template::{FieldSpec, TemplateGenerator};

pub use fixtura_core::{AttributeMap, FactoryError, Model, Result, SetterTable};
pub use fixtura_faker::{DataProvider, FakerProvider, LocaleKey};
