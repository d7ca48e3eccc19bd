use std::fmt;
use std::marker::PhantomData;

use futures_core::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typeadapt_adapter::{Adapts, Static};
use typeadapt_method::{AsyncBoundMethod, MethodDescriptor};

/// Advisory intent of a procedure. Both kinds are invoked the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureKind {
    Query,
    Mutation,
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcedureKind::Query => f.write_str("query"),
            ProcedureKind::Mutation => f.write_str("mutation"),
        }
    }
}

/// Zero-sized token naming a procedure's projected input and output types.
///
/// Client code binds stubs with it to get the same static types the server
/// enforces.
pub struct Signature<In, Out>(PhantomData<fn(In) -> Out>);

impl<In, Out> Signature<In, Out> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<In, Out> Default for Signature<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In, Out> Clone for Signature<In, Out> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<In, Out> Copy for Signature<In, Out> {}

impl<In, Out> fmt::Debug for Signature<In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature<{} -> {}>",
            std::any::type_name::<In>(),
            std::any::type_name::<Out>()
        )
    }
}

/// A fully formed procedure.
pub struct Procedure<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
{
    kind: ProcedureKind,
    method: AsyncBoundMethod<A, I, O>,
}

impl<A, I, O> Procedure<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    pub(crate) fn new(kind: ProcedureKind, method: AsyncBoundMethod<A, I, O>) -> Self {
        Self { kind, method }
    }

    pub fn kind(&self) -> ProcedureKind {
        self.kind
    }

    pub fn signature(&self) -> Signature<Static<A, I>, Static<A, O>> {
        Signature::new()
    }

    pub fn descriptor(&self) -> &MethodDescriptor<A, I, O> {
        self.method.descriptor()
    }

    /// Invoke with a typed argument.
    pub async fn call(&self, input: Static<A, I>) -> typeadapt_method::Result<Static<A, O>> {
        self.method.call(input).await
    }
}

/// Object-safe view of a procedure, as stored in routers.
pub trait ErasedProcedure: Send + Sync {
    fn kind(&self) -> ProcedureKind;

    fn adapter_name(&self) -> &'static str;

    /// Invoke with an untyped argument.
    fn invoke(&self, input: Value) -> BoxFuture<'_, typeadapt_method::Result<Value>>;
}

impl<A, I, O> ErasedProcedure for Procedure<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    fn kind(&self) -> ProcedureKind {
        self.kind
    }

    fn adapter_name(&self) -> &'static str {
        self.method.descriptor().adapter_name()
    }

    fn invoke(&self, input: Value) -> BoxFuture<'_, typeadapt_method::Result<Value>> {
        Box::pin(self.method.call_value(input))
    }
}

impl<A, I, O> fmt::Debug for Procedure<A, I, O>
where
    A: Adapts<I> + Adapts<O>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("kind", &self.kind)
            .field("adapter", &self.method.descriptor().adapter_name())
            .finish()
    }
}
