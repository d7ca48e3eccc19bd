use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use jsonschema::Validator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use typeadapt_adapter::{AdapterError, Infer, TypeAdapter, Validate};

use crate::config::{Dialect, JsonSchemaConfig};
use crate::validator::{compile, describe_errors};

const ADAPTER_NAME: &str = "json-schema";

/// Validates [`JsonSchema`] documents with the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonSchemaAdapter {
    config: JsonSchemaConfig,
}

impl JsonSchemaAdapter {
    /// Adapter for the default dialect (draft-7).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(dialect: Dialect) -> Self {
        Self::with_config(JsonSchemaConfig::with_dialect(dialect))
    }

    pub fn with_config(config: JsonSchemaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JsonSchemaConfig {
        &self.config
    }
}

impl TypeAdapter for JsonSchemaAdapter {
    fn name(&self) -> &'static str {
        ADAPTER_NAME
    }
}

impl<T> Validate<JsonSchema<T>> for JsonSchemaAdapter {
    fn validate(&self, schema: &JsonSchema<T>, value: &Value) -> typeadapt_adapter::Result<bool> {
        let validator = schema.validator(&self.config)?;
        Ok(validator.is_valid(value))
    }

    fn diagnose(&self, schema: &JsonSchema<T>, value: &Value) -> Option<String> {
        let validator = schema.validator(&self.config).ok()?;
        describe_errors(&validator, value)
    }
}

impl<T> Infer<JsonSchema<T>> for JsonSchemaAdapter
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    type Output = T;
}

/// A JSON Schema document tagged with the Rust type it describes.
///
/// The tag is declared where the schema is constructed, so the projected
/// type is known before any value is validated. `JsonSchema` (tag
/// [`Value`]) is the untagged form and projects to the unknown type.
///
/// Compiled validators are cached on the schema, keyed by the compile
/// settings that produced them.
pub struct JsonSchema<T = Value> {
    document: Value,
    compiled: OnceLock<Compiled>,
    _type: PhantomData<fn() -> T>,
}

#[derive(Clone)]
struct Compiled {
    config: JsonSchemaConfig,
    validator: Result<Arc<Validator>, String>,
}

impl<T> JsonSchema<T> {
    /// Wrap a document, tagging it with `T`.
    pub fn new(document: Value) -> Self {
        Self {
            document,
            compiled: OnceLock::new(),
            _type: PhantomData,
        }
    }

    /// Parse a document from JSON text.
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// The raw document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Same document, different type tag. A validator already compiled
    /// for this schema is shared with the copy.
    pub fn retag<U>(&self) -> JsonSchema<U> {
        JsonSchema {
            document: self.document.clone(),
            compiled: self.compiled.clone(),
            _type: PhantomData,
        }
    }

    /// Compile eagerly so malformed documents surface before first use.
    pub fn prepare(&self, config: &JsonSchemaConfig) -> typeadapt_adapter::Result<()> {
        self.validator(config).map(|_| ())
    }

    pub(crate) fn validator(
        &self,
        config: &JsonSchemaConfig,
    ) -> typeadapt_adapter::Result<Arc<Validator>> {
        let cached = self.compiled.get_or_init(|| Compiled {
            config: *config,
            validator: compile(&self.document, config).map(Arc::new),
        });

        let outcome = if cached.config == *config {
            cached.validator.clone()
        } else {
            debug!(dialect = %config.dialect, "compiling schema outside cache");
            compile(&self.document, config).map(Arc::new)
        };

        outcome.map_err(|message| AdapterError::MalformedSchema {
            adapter: ADAPTER_NAME,
            message,
        })
    }
}

impl JsonSchema {
    /// Untagged schema, projecting to [`Value`].
    pub fn untyped(document: Value) -> Self {
        Self::new(document)
    }
}

impl<T> Clone for JsonSchema<T> {
    fn clone(&self) -> Self {
        self.retag()
    }
}

impl<T> fmt::Debug for JsonSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("type", &std::any::type_name::<T>())
            .field("document", &self.document)
            .finish()
    }
}

impl<T> From<Value> for JsonSchema<T> {
    fn from(document: Value) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde::Deserialize;
    use serde_json::json;
    use typeadapt_adapter::{decode, Static};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Vector {
        x: f64,
        y: f64,
        z: f64,
    }

    fn vector_schema() -> JsonSchema<Vector> {
        JsonSchema::new(json!({
            "type": "object",
            "additionalProperties": false,
            "required": ["x", "y", "z"],
            "properties": {
                "x": { "type": "number" },
                "y": { "type": "number" },
                "z": { "type": "number" }
            }
        }))
    }

    #[test]
    fn validates_under_each_dialect() {
        let schema = vector_schema();
        for dialect in [Dialect::Draft7, Dialect::Draft201909, Dialect::Draft202012] {
            let adapter = JsonSchemaAdapter::with_dialect(dialect);
            assert!(adapter
                .validate(&schema, &json!({ "x": 1, "y": 2, "z": 3.5 }))
                .unwrap());
            assert!(!adapter
                .validate(&schema, &json!({ "x": "1", "y": 2, "z": 3 }))
                .unwrap());
        }
    }

    #[test]
    fn projection_follows_type_tag() {
        let adapter = JsonSchemaAdapter::new();
        let schema = vector_schema();
        let value = json!({ "x": 1.0, "y": 0.5, "z": -2.0 });

        assert!(adapter.validate(&schema, &value).unwrap());
        let vector: Static<JsonSchemaAdapter, JsonSchema<Vector>> =
            decode(&adapter, &schema, value).unwrap();
        assert_eq!(vector, Vector { x: 1.0, y: 0.5, z: -2.0 });
    }

    #[test]
    fn untyped_schema_projects_to_value() {
        let adapter = JsonSchemaAdapter::new();
        let schema = JsonSchema::untyped(json!({ "type": "array" }));
        let value = json!([1, "two"]);

        let projected: Value = decode(&adapter, &schema, value.clone()).unwrap();
        assert_eq!(projected, value);
    }

    #[test]
    fn malformed_document_faults() {
        let adapter = JsonSchemaAdapter::new();
        let schema = JsonSchema::untyped(json!({ "type": "definitely-not-a-type" }));

        assert!(matches!(
            adapter.validate(&schema, &json!(1)),
            Err(AdapterError::MalformedSchema { adapter: "json-schema", .. })
        ));
        assert!(schema.prepare(adapter.config()).is_err());
    }

    #[test]
    fn diagnose_names_the_failing_keyword() {
        let adapter = JsonSchemaAdapter::new();
        let schema = JsonSchema::untyped(json!({ "type": "number" }));
        let message = adapter.diagnose(&schema, &json!("x")).unwrap();
        assert!(message.contains("number"), "unexpected message: {message}");
    }

    #[test]
    fn strict_adapter_rejects_undeclared_properties() {
        let schema: JsonSchema = JsonSchema::new(json!({
            "type": "object",
            "properties": { "a": { "type": "number" } }
        }));
        let permissive = JsonSchemaAdapter::new();
        let strict = JsonSchemaAdapter::with_config(JsonSchemaConfig {
            strict_mode: true,
            ..JsonSchemaConfig::default()
        });
        let value = json!({ "a": 1, "b": 2 });

        assert!(permissive.validate(&schema, &value).unwrap());
        assert!(!strict.validate(&schema, &value).unwrap());
        // Cached validator for the first config must not leak into the second.
        assert!(permissive.validate(&schema, &value).unwrap());
    }

    #[test]
    fn clone_and_retag_keep_document() {
        let schema = vector_schema();
        let untyped: JsonSchema = schema.retag();
        assert_eq!(untyped.document(), schema.document());
        assert_eq!(schema.clone().document(), schema.document());
    }

    #[test]
    fn copies_share_compiled_validator() {
        let config = JsonSchemaConfig::default();
        let schema = vector_schema();
        schema.prepare(&config).unwrap();
        let compiled = schema.validator(&config).unwrap();

        let untyped: JsonSchema = schema.retag();
        assert!(Arc::ptr_eq(&compiled, &untyped.validator(&config).unwrap()));
        assert!(Arc::ptr_eq(&compiled, &schema.clone().validator(&config).unwrap()));

        let fresh = JsonSchema::<Vector>::new(schema.document().clone());
        assert!(!Arc::ptr_eq(&compiled, &fresh.validator(&config).unwrap()));
    }

    proptest! {
        #[test]
        fn accepted_vectors_decode_into_projection(
            x in -1.0e9f64..1.0e9,
            y in any::<i32>(),
            z in -1.0e9f64..1.0e9,
        ) {
            let adapter = JsonSchemaAdapter::with_dialect(Dialect::Draft202012);
            let schema = vector_schema();
            let value = json!({ "x": x, "y": y, "z": z });

            prop_assert!(adapter.validate(&schema, &value).unwrap());
            let decoded = decode(&adapter, &schema, value);
            prop_assert!(decoded.is_ok(), "projection failed: {:?}", decoded.err());
        }

        #[test]
        fn rejected_values_never_reach_projection(label in "[a-z]{1,8}") {
            let adapter = JsonSchemaAdapter::new();
            let schema = vector_schema();
            let value = json!({ "x": label, "y": 0, "z": 0 });
            prop_assert!(!adapter.validate(&schema, &value).unwrap());
        }
    }
}
