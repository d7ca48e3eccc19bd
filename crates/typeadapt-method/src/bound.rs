use futures_core::future::BoxFuture;
use serde_json::Value;
use typeadapt_adapter::{Adapts, Static};

use crate::descriptor::MethodDescriptor;
use crate::error::{BoxError, MethodError, Result};

pub(crate) type Implementation<In, Out> =
    Box<dyn Fn(In) -> std::result::Result<Out, BoxError> + Send + Sync>;

pub(crate) type AsyncImplementation<In, Out> =
    Box<dyn Fn(In) -> BoxFuture<'static, std::result::Result<Out, BoxError>> + Send + Sync>;

/// A synchronous implementation behind input and output validation.
pub struct BoundMethod<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
{
    descriptor: MethodDescriptor<A, I, O>,
    implementation: Implementation<Static<A, I>, Static<A, O>>,
}

impl<A, I, O> BoundMethod<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
{
    pub(crate) fn new(
        descriptor: MethodDescriptor<A, I, O>,
        implementation: Implementation<Static<A, I>, Static<A, O>>,
    ) -> Self {
        Self {
            descriptor,
            implementation,
        }
    }

    /// Invoke with a typed argument.
    ///
    /// The implementation receives `input` itself and the caller receives
    /// the implementation's result itself; the boundaries only inspect
    /// their encoded form.
    pub fn call(&self, input: Static<A, I>) -> Result<Static<A, O>> {
        let encoded = self.descriptor.encode_input(&input)?;
        self.descriptor.check_input(&encoded)?;

        let output = (self.implementation)(input).map_err(MethodError::Handler)?;

        let encoded = self.descriptor.encode_output(&output)?;
        self.descriptor.check_output(&encoded)?;
        Ok(output)
    }

    /// Invoke with an untyped argument, returning the validated result as a value.
    pub fn call_value(&self, input: Value) -> Result<Value> {
        self.descriptor.check_input(&input)?;
        let input = self.descriptor.decode_input(input)?;

        let output = (self.implementation)(input).map_err(MethodError::Handler)?;

        let encoded = self.descriptor.encode_output(&output)?;
        self.descriptor.check_output(&encoded)?;
        Ok(encoded)
    }

    pub fn descriptor(&self) -> &MethodDescriptor<A, I, O> {
        &self.descriptor
    }
}

/// An implementation that completes later, behind the same boundaries.
///
/// Each call awaits exactly one implementation future; nothing else is
/// scheduled.
pub struct AsyncBoundMethod<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
{
    descriptor: MethodDescriptor<A, I, O>,
    implementation: AsyncImplementation<Static<A, I>, Static<A, O>>,
}

impl<A, I, O> AsyncBoundMethod<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
{
    pub(crate) fn new(
        descriptor: MethodDescriptor<A, I, O>,
        implementation: AsyncImplementation<Static<A, I>, Static<A, O>>,
    ) -> Self {
        Self {
            descriptor,
            implementation,
        }
    }

    /// Invoke with a typed argument.
    pub async fn call(&self, input: Static<A, I>) -> Result<Static<A, O>> {
        let encoded = self.descriptor.encode_input(&input)?;
        self.descriptor.check_input(&encoded)?;

        let output = (self.implementation)(input)
            .await
            .map_err(MethodError::Handler)?;

        let encoded = self.descriptor.encode_output(&output)?;
        self.descriptor.check_output(&encoded)?;
        Ok(output)
    }

    /// Invoke with an untyped argument, returning the validated result as a value.
    pub async fn call_value(&self, input: Value) -> Result<Value> {
        self.descriptor.check_input(&input)?;
        let input = self.descriptor.decode_input(input)?;

        let output = (self.implementation)(input)
            .await
            .map_err(MethodError::Handler)?;

        let encoded = self.descriptor.encode_output(&output)?;
        self.descriptor.check_output(&encoded)?;
        Ok(encoded)
    }

    pub fn descriptor(&self) -> &MethodDescriptor<A, I, O> {
        &self.descriptor
    }
}
