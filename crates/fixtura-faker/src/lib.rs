//! Randomized data provider for Fixtura generators.
//!
//! Generators receive a [`DataProvider`] handle; [`FakerProvider`] is the
//! default implementation, built on the `fake` crate with a seedable
//! ChaCha RNG so fixtures can be reproduced.

pub mod catalog;
pub mod faker;
pub mod locales;
pub mod provider;

pub use faker::FakerProvider;
pub use locales::LocaleKey;
pub use provider::DataProvider;
