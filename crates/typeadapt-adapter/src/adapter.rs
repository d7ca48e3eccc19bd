use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A schema-library binding.
///
/// Adapters are constructed once and shared by every method that references
/// them, so they must be safe for concurrent read-only use. Any state they
/// hold is configuration needed for validation (e.g. a schema dialect).
pub trait TypeAdapter: Send + Sync + 'static {
    /// Stable identifier used in error reports and log fields.
    fn name(&self) -> &'static str;
}

/// Run-time half of the capability: does `value` conform to schema `S`?
pub trait Validate<S>: TypeAdapter {
    /// Pure predicate over `(schema, value)`.
    ///
    /// Rejection is `Ok(false)`, never an error. `Err` is reserved for a
    /// schema the adapter cannot evaluate at all, which is a programmer
    /// error rather than a data problem.
    fn validate(&self, schema: &S, value: &Value) -> Result<bool>;

    /// Adapter-specific explanation of why `value` was rejected.
    ///
    /// Only consulted after `validate` returned `false`.
    fn diagnose(&self, schema: &S, value: &Value) -> Option<String> {
        let _ = (schema, value);
        None
    }
}

/// Compile-time half of the capability: the type schema `S` denotes.
///
/// Every value accepted by [`Validate::validate`] for the same schema must
/// decode into `Output`. Adapters that cannot refine a schema project to
/// [`Unknown`](crate::Unknown).
pub trait Infer<S>: TypeAdapter {
    type Output: Serialize + DeserializeOwned + Send + 'static;
}

/// Adapters that both validate and project schema `S`.
pub trait Adapts<S>: Validate<S> + Infer<S> {}

impl<A, S> Adapts<S> for A where A: Validate<S> + Infer<S> {}
