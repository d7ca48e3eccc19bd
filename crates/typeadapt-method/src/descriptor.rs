use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};
use typeadapt_adapter::{decode, encode, Adapts, Static, TypeAdapter, Validate};

use crate::error::{MethodError, Result};

/// Adapter plus the schema pair that fixes a method's signature.
pub struct MethodDescriptor<A, I, O> {
    adapter: Arc<A>,
    input: I,
    output: O,
}

impl<A: TypeAdapter, I, O> MethodDescriptor<A, I, O> {
    pub fn new(adapter: Arc<A>, input: I, output: O) -> Self {
        Self {
            adapter,
            input,
            output,
        }
    }

    pub fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    pub fn input_schema(&self) -> &I {
        &self.input
    }

    pub fn output_schema(&self) -> &O {
        &self.output
    }

    pub fn adapter_name(&self) -> &'static str {
        self.adapter.name()
    }
}

impl<A, I, O> MethodDescriptor<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
{
    /// Validate an argument against the input schema.
    pub fn check_input(&self, value: &Value) -> Result<()> {
        let adapter = self.adapter.as_ref();
        if <A as Validate<I>>::validate(adapter, &self.input, value)? {
            trace!(adapter = adapter.name(), "input accepted");
            return Ok(());
        }

        let detail = <A as Validate<I>>::diagnose(adapter, &self.input, value)
            .unwrap_or_else(|| "value does not match input schema".to_string());
        debug!(adapter = adapter.name(), %detail, "input rejected");
        Err(MethodError::InvalidInput {
            adapter: adapter.name(),
            detail,
        })
    }

    /// Validate a result against the output schema.
    pub fn check_output(&self, value: &Value) -> Result<()> {
        let adapter = self.adapter.as_ref();
        if <A as Validate<O>>::validate(adapter, &self.output, value)? {
            trace!(adapter = adapter.name(), "output accepted");
            return Ok(());
        }

        let detail = <A as Validate<O>>::diagnose(adapter, &self.output, value)
            .unwrap_or_else(|| "value does not match output schema".to_string());
        debug!(adapter = adapter.name(), %detail, "output rejected");
        Err(MethodError::InvalidOutput {
            adapter: adapter.name(),
            detail,
        })
    }

    /// Decode a validated argument into the projected input type.
    pub fn decode_input(&self, value: Value) -> Result<Static<A, I>> {
        Ok(decode(self.adapter.as_ref(), &self.input, value)?)
    }

    /// An argument that cannot be represented as a value fails the input boundary.
    pub(crate) fn encode_input(&self, input: &Static<A, I>) -> Result<Value> {
        encode(input).map_err(|err| MethodError::InvalidInput {
            adapter: self.adapter.name(),
            detail: format!("input cannot be represented: {err}"),
        })
    }

    pub(crate) fn encode_output(&self, output: &Static<A, O>) -> Result<Value> {
        encode(output).map_err(|err| MethodError::InvalidOutput {
            adapter: self.adapter.name(),
            detail: format!("output cannot be represented: {err}"),
        })
    }
}
