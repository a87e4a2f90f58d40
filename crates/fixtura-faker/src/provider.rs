use serde_json::Value;

use fixtura_core::Result;

use crate::locales::LocaleKey;

/// Source of randomized values handed to every generator invocation.
///
/// The factory treats the provider as an opaque shared handle and never
/// mutates it; implementations that need mutable state (an RNG) keep it behind
/// interior mutability.
pub trait DataProvider {
    fn locale(&self) -> LocaleKey;

    /// Generate a value for a faker id such as `name.first_name` or an alias
    /// such as `email`.
    fn fake(&self, id: &str) -> Result<Value>;

    /// Integer in `min..=max`; bounds are swapped when reversed.
    fn int_between(&self, min: i64, max: i64) -> i64;

    /// Float in `min..=max`; bounds are swapped when reversed. NaN or infinite
    /// bounds yield `0.0`.
    fn float_between(&self, min: f64, max: f64) -> f64;

    /// `true` with the given probability, clamped to `0.0..=1.0`. A NaN
    /// probability is `false`.
    fn chance(&self, probability: f64) -> bool;

    fn uuid(&self) -> String;

    /// Text for a faker id. Non-string values are rendered as JSON text and
    /// unknown ids propagate the provider's error.
    fn text(&self, id: &str) -> Result<String> {
        match self.fake(id)? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }

    // The helpers below target ids `FakerProvider` always knows; a provider
    // without them yields an empty string. Call `text` to see the error.

    /// Full name (`name.name`), empty if the provider lacks it.
    fn name(&self) -> String {
        self.text("name.name").unwrap_or_default()
    }

    /// Given name (`name.first_name`), empty if the provider lacks it.
    fn first_name(&self) -> String {
        self.text("name.first_name").unwrap_or_default()
    }

    /// Family name (`name.last_name`), empty if the provider lacks it.
    fn last_name(&self) -> String {
        self.text("name.last_name").unwrap_or_default()
    }

    /// Safe email address (`internet.email`), empty if the provider lacks it.
    fn email(&self) -> String {
        self.text("internet.email").unwrap_or_default()
    }

    /// `internet.username`, empty if the provider lacks it.
    fn username(&self) -> String {
        self.text("internet.username").unwrap_or_default()
    }

    /// `lorem.word`, empty if the provider lacks it.
    fn word(&self) -> String {
        self.text("lorem.word").unwrap_or_default()
    }

    /// Lorem sentence of three to seven words (`lorem.sentence`), empty if
    /// the provider lacks it.
    fn sentence(&self) -> String {
        self.text("lorem.sentence").unwrap_or_default()
    }

    /// `company.name`, empty if the provider lacks it.
    fn company(&self) -> String {
        self.text("company.name").unwrap_or_default()
    }

    /// `address.city`, empty if the provider lacks it.
    fn city(&self) -> String {
        self.text("address.city").unwrap_or_default()
    }

    /// `phone_number.phone`, empty if the provider lacks it.
    fn phone_number(&self) -> String {
        self.text("phone_number.phone").unwrap_or_default()
    }
}
