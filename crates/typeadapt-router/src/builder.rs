use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use typeadapt_adapter::{Adapts, Static, TypeAdapter};
use typeadapt_method::{AsyncBoundMethod, BoxError, MethodBuilder};

use crate::procedure::{Procedure, ProcedureKind};

/// Builder stage marker: schema not supplied yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Missing;

/// Builder stage marker: schema supplied.
#[derive(Debug, Clone)]
pub struct Set<S>(S);

/// Staged procedure definition.
///
/// `input` and `output` can each be given once. The terminal operations
/// only exist once both are [`Set`], so a partially formed procedure cannot
/// be turned into something callable.
pub struct ProcedureBuilder<A, I = Missing, O = Missing> {
    adapter: Arc<A>,
    input: I,
    output: O,
}

impl<A: TypeAdapter> ProcedureBuilder<A> {
    pub(crate) fn new(adapter: Arc<A>) -> Self {
        Self {
            adapter,
            input: Missing,
            output: Missing,
        }
    }
}

impl<A: TypeAdapter, I, O> ProcedureBuilder<A, I, O> {
    /// Replace the inherited adapter for this procedure only.
    pub fn adapter<B: TypeAdapter>(self, adapter: B) -> ProcedureBuilder<B, I, O> {
        self.shared_adapter(Arc::new(adapter))
    }

    pub fn shared_adapter<B: TypeAdapter>(self, adapter: Arc<B>) -> ProcedureBuilder<B, I, O> {
        ProcedureBuilder {
            adapter,
            input: self.input,
            output: self.output,
        }
    }

    pub fn adapter_name(&self) -> &'static str {
        self.adapter.name()
    }
}

impl<A: TypeAdapter, O> ProcedureBuilder<A, Missing, O> {
    pub fn input<S>(self, schema: S) -> ProcedureBuilder<A, Set<S>, O> {
        ProcedureBuilder {
            adapter: self.adapter,
            input: Set(schema),
            output: self.output,
        }
    }
}

impl<A: TypeAdapter, I> ProcedureBuilder<A, I, Missing> {
    pub fn output<S>(self, schema: S) -> ProcedureBuilder<A, I, Set<S>> {
        ProcedureBuilder {
            adapter: self.adapter,
            input: self.input,
            output: Set(schema),
        }
    }
}

impl<A, I, O> ProcedureBuilder<A, Set<I>, Set<O>>
where
    A: Adapts<I> + Adapts<O>,
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    /// Read-style procedure with an infallible implementation.
    pub fn query<F>(self, implementation: F) -> Procedure<A, I, O>
    where
        F: Fn(Static<A, I>) -> Static<A, O> + Send + Sync + 'static,
    {
        self.try_query(move |input| Ok::<_, Infallible>(implementation(input)))
    }

    /// Read-style procedure with a fallible implementation.
    pub fn try_query<F, E>(self, implementation: F) -> Procedure<A, I, O>
    where
        F: Fn(Static<A, I>) -> Result<Static<A, O>, E> + Send + Sync + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.query_async(move |input| std::future::ready(implementation(input)))
    }

    /// Read-style procedure whose implementation completes later.
    pub fn query_async<F, Fut, E>(self, implementation: F) -> Procedure<A, I, O>
    where
        F: Fn(Static<A, I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Static<A, O>, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let method = self.bind(implementation);
        Procedure::new(ProcedureKind::Query, method)
    }

    /// Write-style procedure with an infallible implementation.
    pub fn mutation<F>(self, implementation: F) -> Procedure<A, I, O>
    where
        F: Fn(Static<A, I>) -> Static<A, O> + Send + Sync + 'static,
    {
        self.try_mutation(move |input| Ok::<_, Infallible>(implementation(input)))
    }

    /// Write-style procedure with a fallible implementation.
    pub fn try_mutation<F, E>(self, implementation: F) -> Procedure<A, I, O>
    where
        F: Fn(Static<A, I>) -> Result<Static<A, O>, E> + Send + Sync + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.mutation_async(move |input| std::future::ready(implementation(input)))
    }

    /// Write-style procedure whose implementation completes later.
    pub fn mutation_async<F, Fut, E>(self, implementation: F) -> Procedure<A, I, O>
    where
        F: Fn(Static<A, I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Static<A, O>, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let method = self.bind(implementation);
        Procedure::new(ProcedureKind::Mutation, method)
    }

    fn bind<F, Fut, E>(self, implementation: F) -> AsyncBoundMethod<A, I, O>
    where
        F: Fn(Static<A, I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Static<A, O>, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let Set(input) = self.input;
        let Set(output) = self.output;
        MethodBuilder::shared(self.adapter).method_async(input, output, implementation)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use typeadapt_adapter::ErrorKind;
    use typeadapt_schema::{JsonSchema, JsonSchemaAdapter, PassthroughAdapter, SerdeAdapter, SerdeSchema};

    use super::*;

    #[tokio::test]
    async fn adapter_override_replaces_inherited_adapter() {
        let builder = ProcedureBuilder::new(Arc::new(PassthroughAdapter));
        assert_eq!(builder.adapter_name(), "passthrough");

        let procedure = builder
            .adapter(SerdeAdapter)
            .input(SerdeSchema::<(i32, i32)>::new())
            .output(SerdeSchema::<i32>::new())
            .query(|(a, b): (i32, i32)| a * b);

        assert_eq!(procedure.descriptor().adapter_name(), "serde");
        assert_eq!(procedure.call((6, 7)).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn output_may_be_declared_before_input() {
        let procedure = ProcedureBuilder::new(Arc::new(JsonSchemaAdapter::new()))
            .output(JsonSchema::<String>::new(json!({ "type": "string" })))
            .input(JsonSchema::<u32>::new(json!({ "type": "integer", "minimum": 0 })))
            .mutation(|n: u32| "x".repeat(n as usize));

        assert_eq!(procedure.kind(), ProcedureKind::Mutation);
        assert_eq!(procedure.call(3).await.unwrap(), "xxx");
    }

    #[tokio::test]
    async fn try_query_surfaces_handler_errors() {
        let procedure = ProcedureBuilder::new(Arc::new(SerdeAdapter))
            .input(SerdeSchema::<String>::new())
            .output(SerdeSchema::<u16>::new())
            .try_query(|text: String| text.parse::<u16>());

        assert_eq!(procedure.call("8080".to_string()).await.unwrap(), 8080);
        let err = procedure.call("port".to_string()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Handler);
    }
}
