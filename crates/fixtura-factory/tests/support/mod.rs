#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use fixtura_core::{AttributeMap, Model, Result, SetterTable};
use fixtura_faker::{DataProvider, LocaleKey};

pub const MODEL_A: &str = "tests.TestModelA";
pub const MODEL_B: &str = "tests.TestModelB";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TestModelA {
    id: i64,
    name: String,
}

impl TestModelA {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Model for TestModelA {
    const MODEL_ID: &'static str = MODEL_A;

    fn setters() -> SetterTable<Self> {
        SetterTable::new()
            .field("id", TestModelA::set_id)
            .field("name", TestModelA::set_name)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TestModelB {
    id: i64,
}

impl TestModelB {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Model for TestModelB {
    const MODEL_ID: &'static str = MODEL_B;

    fn setters() -> SetterTable<Self> {
        SetterTable::new().field("id", TestModelB::set_id)
    }
}

/// Provider returning fixed values, for asserting what generators receive.
#[derive(Debug, Default)]
pub struct StubProvider {
    pub calls: Cell<usize>,
}

impl DataProvider for StubProvider {
    fn locale(&self) -> LocaleKey {
        LocaleKey::EnUs
    }

    fn fake(&self, id: &str) -> Result<Value> {
        self.calls.set(self.calls.get() + 1);
        Ok(Value::String(format!("fake:{id}")))
    }

    fn int_between(&self, min: i64, _max: i64) -> i64 {
        min
    }

    fn float_between(&self, min: f64, _max: f64) -> f64 {
        min
    }

    fn chance(&self, probability: f64) -> bool {
        probability >= 0.5
    }

    fn uuid(&self) -> String {
        "00000000-0000-4000-8000-000000000000".to_string()
    }
}

/// What a recording generator observed on each call.
#[derive(Debug, Default)]
pub struct Recording {
    pub calls: usize,
    pub provider: Option<*const ()>,
    pub overrides: Vec<AttributeMap>,
}

pub fn provider_address(provider: &dyn DataProvider) -> *const () {
    std::ptr::from_ref(provider).cast::<()>()
}

pub fn recorder() -> Rc<RefCell<Recording>> {
    Rc::new(RefCell::new(Recording::default()))
}
