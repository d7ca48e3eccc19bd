use jsonschema::Validator;
use serde_json::{Map, Value};

use crate::config::JsonSchemaConfig;

const MAX_REPORTED_ERRORS: usize = 4;

/// Compile a document under `config`, returning the compiler's message on failure.
pub(crate) fn compile(document: &Value, config: &JsonSchemaConfig) -> Result<Validator, String> {
    let mut document = document.clone();
    if config.strict_mode {
        apply_strict_mode(&mut document);
    }

    jsonschema::options()
        .with_draft(config.dialect.draft())
        .build(&document)
        .map_err(|err| err.to_string())
}

/// Join the first few validation errors for `value` into one message.
pub(crate) fn describe_errors(validator: &Validator, value: &Value) -> Option<String> {
    let mut errors = validator.iter_errors(value);
    let first = errors.next()?;

    let mut message = first.to_string();
    for err in errors.take(MAX_REPORTED_ERRORS - 1) {
        message.push_str("; ");
        message.push_str(&err.to_string());
    }
    Some(message)
}

const OBJECT_KEYWORDS: [&str; 8] = [
    "properties",
    "patternProperties",
    "additionalProperties",
    "unevaluatedProperties",
    "required",
    "dependentRequired",
    "dependentSchemas",
    "propertyNames",
];

const SCHEMA_MAP_KEYWORDS: [&str; 5] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

const SCHEMA_KEYWORDS: [&str; 11] = [
    "propertyNames",
    "additionalProperties",
    "unevaluatedProperties",
    "items",
    "contains",
    "additionalItems",
    "unevaluatedItems",
    "not",
    "if",
    "then",
    "else",
];

const SCHEMA_LIST_KEYWORDS: [&str; 4] = ["prefixItems", "allOf", "anyOf", "oneOf"];

/// Close every object schema that does not say otherwise.
fn apply_strict_mode(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_object_schema(map) && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            for keyword in SCHEMA_MAP_KEYWORDS {
                if let Some(Value::Object(children)) = map.get_mut(keyword) {
                    children.values_mut().for_each(apply_strict_mode);
                }
            }
            for keyword in SCHEMA_KEYWORDS.into_iter().chain(SCHEMA_LIST_KEYWORDS) {
                if let Some(child) = map.get_mut(keyword) {
                    apply_strict_mode(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(apply_strict_mode),
        _ => {}
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|kind| matches!(kind, Value::String(kind) if kind == "object")),
        _ => OBJECT_KEYWORDS
            .iter()
            .any(|keyword| map.contains_key(*keyword)),
    }
}
