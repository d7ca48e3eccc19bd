use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use typeadapt::adapter::{Adapts, ErrorKind, Static, Validate};
use typeadapt::method::{BoundMethod, MethodBuilder, MethodError};
use typeadapt::schema::{
    Dialect, JsonSchema, JsonSchemaAdapter, JsonSchemaConfig, PassthroughAdapter, SchemaRegistry,
    SerdeAdapter, SerdeSchema,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AddInput {
    a: f64,
    b: f64,
}

const ADD_INPUT: &str = r#"{
    "type": "object",
    "required": ["a", "b"],
    "properties": { "a": { "type": "number" }, "b": { "type": "number" } }
}"#;

fn registry() -> SchemaRegistry {
    SchemaRegistry::from_embedded(&[
        ("add-input", ADD_INPUT),
        ("number", r#"{ "type": "number" }"#),
    ])
    .unwrap()
}

/// `add` under any adapter, counting implementation calls.
fn counted_add<A, I, O>(
    adapter: A,
    input: I,
    output: O,
) -> (BoundMethod<A, I, O>, Arc<AtomicUsize>)
where
    A: Adapts<I> + Adapts<O>,
    Static<A, I>: Into<AddInput>,
    f64: Into<Static<A, O>>,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let method = MethodBuilder::new(adapter).method(input, output, move |value: Static<A, I>| {
        seen.fetch_add(1, Ordering::SeqCst);
        let AddInput { a, b } = value.into();
        (a + b).into()
    });
    (method, calls)
}

fn accepts_and_rejects<A, I, O>(method: &BoundMethod<A, I, O>, calls: &AtomicUsize)
where
    A: Adapts<I> + Adapts<O>,
{
    let name = method.descriptor().adapter_name();

    let out = method.call_value(json!({ "a": 1, "b": 2 })).unwrap();
    assert_eq!(out, json!(3.0), "adapter {name}");
    assert_eq!(calls.load(Ordering::SeqCst), 1, "adapter {name}");

    let err = method.call_value(json!({ "a": "x", "b": 2 })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput, "adapter {name}");
    assert_eq!(calls.load(Ordering::SeqCst), 1, "adapter {name}");
}

#[test]
fn same_method_behaves_alike_under_every_adapter() {
    let registry = registry();

    let (json_schema, calls) = counted_add(
        registry.adapter(),
        registry.typed::<AddInput>("add-input").unwrap(),
        registry.typed::<f64>("number").unwrap(),
    );
    accepts_and_rejects(&json_schema, &calls);

    let strict = JsonSchemaAdapter::with_config(JsonSchemaConfig {
        dialect: Dialect::Draft202012,
        strict_mode: true,
    });
    let (strict, calls) = counted_add(
        strict,
        registry.typed::<AddInput>("add-input").unwrap(),
        registry.typed::<f64>("number").unwrap(),
    );
    accepts_and_rejects(&strict, &calls);

    let (serde, calls) = counted_add(
        SerdeAdapter,
        SerdeSchema::<AddInput>::new(),
        SerdeSchema::<f64>::new(),
    );
    accepts_and_rejects(&serde, &calls);
}

#[test]
fn strict_mode_only_changes_undeclared_properties() {
    let registry = registry();
    let lenient = MethodBuilder::new(JsonSchemaAdapter::new()).method(
        registry.typed::<AddInput>("add-input").unwrap(),
        registry.typed::<f64>("number").unwrap(),
        |input: AddInput| input.a + input.b,
    );
    let strict = MethodBuilder::new(JsonSchemaAdapter::with_config(JsonSchemaConfig {
        strict_mode: true,
        ..JsonSchemaConfig::default()
    }))
    .method(
        registry.typed::<AddInput>("add-input").unwrap(),
        registry.typed::<f64>("number").unwrap(),
        |input: AddInput| input.a + input.b,
    );

    let extra = json!({ "a": 1, "b": 2, "c": 3 });
    assert_eq!(lenient.call_value(extra.clone()).unwrap(), json!(3.0));
    assert_eq!(
        strict.call_value(extra).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn implementation_sees_the_callers_value() {
    let received = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&received);
    let echo = MethodBuilder::new(PassthroughAdapter).method((), (), move |value: Value| {
        *sink.lock().unwrap() = Some(value.clone());
        value
    });

    let original = json!({ "list": [1, "two", null], "flag": false });
    let returned = echo.call(original.clone()).unwrap();

    assert_eq!(returned, original);
    assert_eq!(received.lock().unwrap().as_ref(), Some(&original));
}

#[test]
fn output_failure_happens_after_exactly_one_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let registry = registry();
    let method = MethodBuilder::new(registry.adapter()).method(
        registry.typed::<AddInput>("add-input").unwrap(),
        JsonSchema::<Value>::new(json!({ "type": "number" })),
        move |_input: AddInput| {
            seen.fetch_add(1, Ordering::SeqCst);
            json!("three")
        },
    );

    let err = method.call(AddInput { a: 1.0, b: 2.0 }).unwrap_err();
    assert!(matches!(err, MethodError::InvalidOutput { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

proptest! {
    #[test]
    fn accepted_values_decode_to_the_projected_type(
        a in proptest::num::f64::NORMAL,
        b in proptest::num::f64::NORMAL,
        extra in proptest::option::of("x[a-z]{0,7}"),
    ) {
        let registry = registry();
        let adapter = registry.adapter();
        let schema = registry.typed::<AddInput>("add-input").unwrap();

        let mut value = json!({ "a": a, "b": b });
        if let Some(key) = extra {
            value[key.as_str()] = json!(true);
        }

        prop_assert!(adapter.validate(&schema, &value).unwrap());
        let decoded: AddInput = serde_json::from_value(value).unwrap();
        prop_assert_eq!(decoded, AddInput { a, b });
    }

    #[test]
    fn serde_adapter_accepts_exactly_what_decodes(a in any::<i64>(), text in ".{0,12}") {
        let adapter = SerdeAdapter;
        let schema = SerdeSchema::<AddInput>::new();

        for value in [json!({ "a": a, "b": 1 }), json!({ "a": text, "b": 1 })] {
            let accepted = adapter.validate(&schema, &value).unwrap();
            let decodes = serde_json::from_value::<AddInput>(value).is_ok();
            prop_assert_eq!(accepted, decodes);
        }
    }
}
