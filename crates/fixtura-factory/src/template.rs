use std::cell::Cell;

use serde_json::Value;

use fixtura_core::{AttributeMap, FactoryError, Result};
use fixtura_faker::DataProvider;

use crate::generator::Generator;

/// Placeholder replaced by the sequence counter in `sequence` fields.
pub const SEQUENCE_PLACEHOLDER: &str = "{n}";

const DIRECTIVES: &[&str] = &[
    "chance",
    "faker",
    "float_between",
    "int_between",
    "literal",
    "one_of",
    "sequence",
];

/// How a single field of a declarative definition gets its value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    Literal(Value),
    Faker(String),
    IntBetween(i64, i64),
    FloatBetween(f64, f64),
    Chance(f64),
    OneOf(Vec<Value>),
    Sequence(String),
}

impl FieldSpec {
    /// Parse a field spec.
    ///
    /// An object with exactly one directive key is a directive; anything else
    /// is taken literally. Use `{ literal = ... }` to store a value that would
    /// otherwise read as a directive.
    pub fn parse(model_id: &str, field: &str, value: &Value) -> Result<Self> {
        let Some((directive, argument)) = directive_of(value) else {
            return Ok(Self::Literal(value.clone()));
        };
        let invalid = |message: &str| {
            FactoryError::InvalidDefinition(format!("{model_id}.{field}: {message}"))
        };

        match directive {
            "literal" => Ok(Self::Literal(argument.clone())),
            "faker" => argument
                .as_str()
                .map(|id| Self::Faker(id.to_string()))
                .ok_or_else(|| invalid("faker id must be a string")),
            "sequence" => argument
                .as_str()
                .map(|pattern| Self::Sequence(pattern.to_string()))
                .ok_or_else(|| invalid("sequence pattern must be a string")),
            "int_between" => {
                let bounds = pair(argument)
                    .and_then(|(min, max)| Some((min.as_i64()?, max.as_i64()?)))
                    .ok_or_else(|| invalid("int_between expects [min, max] integers"))?;
                if bounds.0 > bounds.1 {
                    return Err(invalid("int_between min must be <= max"));
                }
                Ok(Self::IntBetween(bounds.0, bounds.1))
            }
            "float_between" => {
                let bounds = pair(argument)
                    .and_then(|(min, max)| Some((min.as_f64()?, max.as_f64()?)))
                    .ok_or_else(|| invalid("float_between expects [min, max] numbers"))?;
                if bounds.0 > bounds.1 {
                    return Err(invalid("float_between min must be <= max"));
                }
                if !(bounds.1 - bounds.0).is_finite() {
                    return Err(invalid("float_between range is too wide"));
                }
                Ok(Self::FloatBetween(bounds.0, bounds.1))
            }
            "chance" => match argument.as_f64() {
                Some(probability) if (0.0..=1.0).contains(&probability) => {
                    Ok(Self::Chance(probability))
                }
                _ => Err(invalid("chance expects a probability between 0 and 1")),
            },
            "one_of" => match argument.as_array() {
                Some(choices) if !choices.is_empty() => Ok(Self::OneOf(choices.clone())),
                _ => Err(invalid("one_of expects a non-empty array")),
            },
            _ => Err(invalid("unknown directive")),
        }
    }

    fn produce(&self, provider: &dyn DataProvider, sequence: u64) -> Result<Value> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Faker(id) => provider.fake(id),
            Self::IntBetween(min, max) => Ok(Value::from(provider.int_between(*min, *max))),
            Self::FloatBetween(min, max) => Ok(Value::from(provider.float_between(*min, *max))),
            Self::Chance(probability) => Ok(Value::Bool(provider.chance(*probability))),
            Self::OneOf(choices) => {
                let last = choices.len() as i64 - 1;
                let index = provider.int_between(0, last) as usize;
                Ok(choices[index].clone())
            }
            Self::Sequence(pattern) => Ok(Value::String(
                pattern.replace(SEQUENCE_PLACEHOLDER, &sequence.to_string()),
            )),
        }
    }
}

fn directive_of(value: &Value) -> Option<(&str, &Value)> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let (key, argument) = map.iter().next()?;
    DIRECTIVES
        .contains(&key.as_str())
        .then_some((key.as_str(), argument))
}

fn pair(value: &Value) -> Option<(&Value, &Value)> {
    match value.as_array()?.as_slice() {
        [min, max] => Some((min, max)),
        _ => None,
    }
}

/// Generator built from a declarative field table.
///
/// Overrides are not consulted here; the factory overlays them after
/// generation like for any other generator.
#[derive(Debug)]
pub struct TemplateGenerator {
    model_id: String,
    fields: Vec<(String, FieldSpec)>,
    sequence: Cell<u64>,
}

impl TemplateGenerator {
    /// Build a template from an object of field specs.
    ///
    /// Returns `Ok(None)` when `value` is not an object and therefore cannot
    /// act as a generator.
    pub fn from_value(model_id: &str, value: &Value) -> Result<Option<Self>> {
        let Some(map) = value.as_object() else {
            return Ok(None);
        };
        let fields = map
            .iter()
            .map(|(field, spec)| Ok((field.clone(), FieldSpec::parse(model_id, field, spec)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Self {
            model_id: model_id.to_string(),
            fields,
            sequence: Cell::new(0),
        }))
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}

impl Generator for TemplateGenerator {
    fn generate(
        &self,
        provider: &dyn DataProvider,
        _overrides: &AttributeMap,
    ) -> Result<AttributeMap> {
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);

        let mut attributes = AttributeMap::new();
        for (field, spec) in &self.fields {
            attributes.insert(field.clone(), spec.produce(provider, sequence)?);
        }
        Ok(attributes)
    }
}
