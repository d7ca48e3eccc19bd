use serde_json::Value;
use typeadapt_adapter::{Infer, Result, TypeAdapter, Unknown, Validate};

/// Accepts every value for every schema and projects to [`Unknown`].
///
/// Useful as a router default when procedures pick their own adapters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassthroughAdapter;

impl TypeAdapter for PassthroughAdapter {
    fn name(&self) -> &'static str {
        "passthrough"
    }
}

impl<S> Validate<S> for PassthroughAdapter {
    fn validate(&self, _schema: &S, _value: &Value) -> Result<bool> {
        Ok(true)
    }
}

impl<S> Infer<S> for PassthroughAdapter {
    type Output = Unknown;
}
