mod support;

use std::rc::Rc;

use serde_json::json;

use fixtura_core::{AttributeMap, FactoryError, attributes};
use fixtura_factory::{DataProvider, Factory, FakerProvider, LocaleKey};

use support::{
    MODEL_A, MODEL_B, StubProvider, TestModelA, TestModelB, provider_address, recorder,
};

fn factory_with_defaults() -> Factory {
    let mut factory = Factory::new();
    factory
        .define(MODEL_A, |_, _| attributes! { "id": 123, "name": "test" })
        .expect("define model a");
    factory
}

#[test]
fn create_object_with_default_generator() {
    let mut factory = factory_with_defaults();

    let object: TestModelA = factory.create(AttributeMap::new()).expect("create");

    assert_eq!(object.id(), 123);
    assert_eq!(object.name(), "test");
}

#[test]
fn create_object_with_overridden_attributes() {
    let mut factory = factory_with_defaults();

    let object: TestModelA = factory
        .create(attributes! { "id": 999, "name": "override" })
        .expect("create");

    assert_eq!(object.id(), 999);
    assert_eq!(object.name(), "override");
}

#[test]
fn partial_override_keeps_other_defaults() {
    let mut factory = factory_with_defaults();

    let object: TestModelA = factory
        .create(attributes! { "name": "only name" })
        .expect("create");

    assert_eq!(object.id(), 123);
    assert_eq!(object.name(), "only name");
}

#[test]
fn override_only_keys_are_applied() {
    let mut factory = Factory::new();
    factory
        .define(MODEL_A, |_, _| attributes! { "id": 1 })
        .expect("define");

    let object: TestModelA = factory
        .create(attributes! { "name": "from override" })
        .expect("create");

    assert_eq!(object.id(), 1);
    assert_eq!(object.name(), "from override");
}

#[test]
fn unknown_generated_key_fails_with_setter_error() {
    let mut factory = Factory::new();
    factory
        .define(MODEL_A, |_, _| attributes! { "not_existing_key": "test" })
        .expect("define");

    let err = factory
        .create::<TestModelA>(attributes! { "id": 999, "name": "override" })
        .unwrap_err();

    assert!(err.to_string().contains("not_existing_key"));
    match err {
        FactoryError::SetterNotCallable { model, key, setter } => {
            assert_eq!(model, MODEL_A);
            assert_eq!(key, "not_existing_key");
            assert_eq!(setter, "set_not_existing_key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_override_key_fails_with_setter_error() {
    let mut factory = factory_with_defaults();

    let err = factory
        .create::<TestModelA>(attributes! { "nickname": "x" })
        .unwrap_err();

    assert!(matches!(err, FactoryError::SetterNotCallable { ref key, .. } if key == "nickname"));
}

#[test]
fn mistyped_value_fails_with_invalid_value() {
    let mut factory = factory_with_defaults();

    let err = factory
        .create::<TestModelA>(attributes! { "id": "not a number" })
        .unwrap_err();

    assert!(matches!(err, FactoryError::InvalidValue { ref key, .. } if key == "id"));
}

#[test]
fn create_undefined_model_fails_before_generating() {
    let mut factory = Factory::new();

    let err = factory.create::<TestModelA>(AttributeMap::new()).unwrap_err();

    assert!(matches!(err, FactoryError::DefinitionNotFound(ref id) if id == MODEL_A));
    assert!(factory.models().is_empty());
}

#[test]
fn create_model_without_constructible_type_fails() {
    let calls = recorder();
    let seen = Rc::clone(&calls);
    let mut factory = Factory::new();
    factory
        .define("nonExistingModelclass", move |_, _| {
            seen.borrow_mut().calls += 1;
            AttributeMap::new()
        })
        .expect("define");

    let err = factory
        .create_model("nonExistingModelclass", AttributeMap::new())
        .err()
        .expect("model missing");

    assert!(matches!(err, FactoryError::ModelNotFound(ref id) if id == "nonExistingModelclass"));
    assert_eq!(calls.borrow().calls, 0);
}

#[test]
fn definition_is_checked_before_model() {
    let mut factory = Factory::new();
    factory.register_model::<TestModelB>().expect("register");

    let missing_both = factory
        .create_model("missing", AttributeMap::new())
        .err()
        .expect("missing");
    assert!(matches!(missing_both, FactoryError::DefinitionNotFound(_)));

    let missing_definition = factory
        .create_model(MODEL_B, AttributeMap::new())
        .err()
        .expect("missing definition");
    assert!(matches!(missing_definition, FactoryError::DefinitionNotFound(_)));
}

#[test]
fn dynamic_create_builds_registered_model() {
    let mut factory = Factory::new();
    factory
        .define(MODEL_B, |_, _| attributes! { "id": 77 })
        .expect("define")
        .register_model::<TestModelB>()
        .expect("register");

    let built = factory
        .create_model(MODEL_B, AttributeMap::new())
        .expect("create");

    let model = built.downcast::<TestModelB>().expect("model b");
    assert_eq!(model.id(), 77);
}

#[test]
fn generator_receives_provider_and_overrides_once() {
    let provider: Rc<dyn DataProvider> = Rc::new(StubProvider::default());
    let recording = recorder();
    let seen = Rc::clone(&recording);
    let mut factory = Factory::new();
    factory.set_data_provider(Rc::clone(&provider));
    factory
        .define(MODEL_A, move |faker, data| {
            let mut seen = seen.borrow_mut();
            seen.calls += 1;
            seen.provider = Some(provider_address(faker));
            seen.overrides.push(data.clone());
            AttributeMap::new()
        })
        .expect("define");
    let data = attributes! { "id": "123" };

    let err = factory.create::<TestModelA>(data.clone()).unwrap_err();

    // "123" is a string and TestModelA ids are integers.
    assert!(matches!(err, FactoryError::InvalidValue { .. }));
    let recording = recording.borrow();
    assert_eq!(recording.calls, 1);
    assert_eq!(recording.provider, Some(Rc::as_ptr(&provider).cast::<()>()));
    assert_eq!(recording.overrides, vec![data]);
}

#[test]
fn generator_can_draw_from_provider() {
    let mut factory = Factory::with_data_provider(Rc::new(StubProvider::default()));
    factory
        .define(MODEL_A, |faker, _| {
            attributes! { "id": faker.int_between(40, 50), "name": faker.name() }
        })
        .expect("define");

    let object: TestModelA = factory.create_default().expect("create");

    assert_eq!(object.id(), 40);
    assert_eq!(object.name(), "fake:name.name");
}

#[test]
fn round_trip_reproduces_merged_attributes() {
    let mut factory = Factory::with_data_provider(Rc::new(FakerProvider::seeded(LocaleKey::EnUs, 21)));
    factory
        .define(MODEL_A, |faker, _| {
            attributes! { "id": faker.int_between(1, 1_000), "name": faker.name() }
        })
        .expect("define");
    let overrides = attributes! { "name": "Grace Hopper" };

    let expected = factory
        .attributes_for(MODEL_A, overrides.clone())
        .expect("attributes");
    let mut replay = Factory::with_data_provider(Rc::new(FakerProvider::seeded(LocaleKey::EnUs, 21)));
    replay
        .define(MODEL_A, |faker, _| {
            attributes! { "id": faker.int_between(1, 1_000), "name": faker.name() }
        })
        .expect("define replay");
    let object: TestModelA = replay.create(overrides).expect("create");

    assert_eq!(json!(object.id()), expected["id"]);
    assert_eq!(json!(object.name()), expected["name"]);
    assert_eq!(expected.len(), 2);
}

#[test]
fn create_many_uses_template_sequences() {
    let mut factory = Factory::new();
    factory
        .define_template(
            MODEL_A,
            &json!({"id": {"int_between": [1, 1]}, "name": {"sequence": "user_{n}"}}),
        )
        .expect("define template");

    let objects: Vec<TestModelA> = factory
        .create_many(3, &attributes! { "id": 9 })
        .expect("create many");

    let names: Vec<&str> = objects.iter().map(TestModelA::name).collect();
    assert_eq!(names, ["user_1", "user_2", "user_3"]);
    assert!(objects.iter().all(|object| object.id() == 9));
}
