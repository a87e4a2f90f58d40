use std::cell::RefCell;
use std::fmt;

use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

use fixtura_core::{FactoryError, Result};

use crate::catalog;
use crate::locales::LocaleKey;
use crate::provider::DataProvider;

const DATE_SPAN_DAYS: i64 = 365;

/// [`DataProvider`] backed by the `fake` crate and a ChaCha RNG.
pub struct FakerProvider {
    locale: LocaleKey,
    seed: Option<u64>,
    base_date: NaiveDate,
    rng: RefCell<ChaCha8Rng>,
}

impl FakerProvider {
    /// Provider seeded from the thread RNG.
    pub fn new(locale: LocaleKey) -> Self {
        let rng = ChaCha8Rng::from_rng(&mut rand::rng());
        Self::with_rng(locale, None, rng)
    }

    /// Deterministic provider: the same seed yields the same sequence.
    pub fn seeded(locale: LocaleKey, seed: u64) -> Self {
        Self::with_rng(locale, Some(seed), ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(locale: LocaleKey, seed: Option<u64>, rng: ChaCha8Rng) -> Self {
        Self {
            locale,
            seed,
            base_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            rng: RefCell::new(rng),
        }
    }

    /// Anchor for the `date` id; dates fall within a year after it.
    pub fn with_base_date(mut self, base_date: NaiveDate) -> Self {
        self.base_date = base_date;
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    fn random_date(&self) -> NaiveDate {
        let offset = self.rng.borrow_mut().random_range(0..=DATE_SPAN_DAYS);
        self.base_date + Duration::days(offset)
    }
}

impl Default for FakerProvider {
    fn default() -> Self {
        Self::new(LocaleKey::default())
    }
}

impl fmt::Debug for FakerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakerProvider")
            .field("locale", &self.locale)
            .field("seed", &self.seed)
            .field("base_date", &self.base_date)
            .finish_non_exhaustive()
    }
}

impl DataProvider for FakerProvider {
    fn locale(&self) -> LocaleKey {
        self.locale
    }

    fn fake(&self, id: &str) -> Result<Value> {
        let resolved =
            catalog::resolve_id(id).ok_or_else(|| FactoryError::UnknownFaker(id.to_string()))?;
        match resolved {
            "boolean" => Ok(Value::Bool(self.chance(0.5))),
            "number" => Ok(Value::from(self.int_between(1, 100_000))),
            "uuid" => Ok(Value::String(self.uuid())),
            "date" => Ok(Value::String(
                self.random_date().format("%Y-%m-%d").to_string(),
            )),
            text_id => {
                let mut rng = self.rng.borrow_mut();
                catalog::generate_text(text_id, self.locale, &mut *rng)
                    .map(Value::String)
                    .ok_or_else(|| FactoryError::UnknownFaker(id.to_string()))
            }
        }
    }

    fn int_between(&self, min: i64, max: i64) -> i64 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.rng.borrow_mut().random_range(low..=high)
    }

    fn float_between(&self, min: f64, max: f64) -> f64 {
        if !(min.is_finite() && max.is_finite()) {
            return 0.0;
        }
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        // `random_range` rejects spans that overflow f64.
        let t: f64 = self.rng.borrow_mut().random();
        (low * (1.0 - t) + high * t).clamp(low, high)
    }

    fn chance(&self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.borrow_mut().random_bool(probability.clamp(0.0, 1.0))
    }

    fn uuid(&self) -> String {
        let bytes: [u8; 16] = self.rng.borrow_mut().random();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }
}
