use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use typeadapt_adapter::{Adapts, Static, TypeAdapter};

use crate::bound::{AsyncBoundMethod, BoundMethod};
use crate::descriptor::MethodDescriptor;
use crate::error::BoxError;

/// Builds validated methods that all share one adapter.
pub struct MethodBuilder<A> {
    adapter: Arc<A>,
}

impl<A: TypeAdapter> MethodBuilder<A> {
    pub fn new(adapter: A) -> Self {
        Self::shared(Arc::new(adapter))
    }

    /// Builder over an adapter that is already shared elsewhere.
    pub fn shared(adapter: Arc<A>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    /// Wrap an infallible implementation.
    pub fn method<I, O, F>(&self, input: I, output: O, implementation: F) -> BoundMethod<A, I, O>
    where
        A: Adapts<I> + Adapts<O>,
        F: Fn(Static<A, I>) -> Static<A, O> + Send + Sync + 'static,
    {
        self.try_method(input, output, move |value| {
            Ok::<_, Infallible>(implementation(value))
        })
    }

    /// Wrap a fallible implementation; its errors reach the caller as
    /// [`MethodError::Handler`](crate::MethodError::Handler).
    pub fn try_method<I, O, F, E>(
        &self,
        input: I,
        output: O,
        implementation: F,
    ) -> BoundMethod<A, I, O>
    where
        A: Adapts<I> + Adapts<O>,
        F: Fn(Static<A, I>) -> Result<Static<A, O>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let descriptor = MethodDescriptor::new(Arc::clone(&self.adapter), input, output);
        BoundMethod::new(
            descriptor,
            Box::new(move |value| implementation(value).map_err(Into::into)),
        )
    }

    /// Wrap an implementation that returns a future.
    pub fn method_async<I, O, F, Fut, E>(
        &self,
        input: I,
        output: O,
        implementation: F,
    ) -> AsyncBoundMethod<A, I, O>
    where
        A: Adapts<I> + Adapts<O>,
        F: Fn(Static<A, I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Static<A, O>, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let descriptor = MethodDescriptor::new(Arc::clone(&self.adapter), input, output);
        AsyncBoundMethod::new(
            descriptor,
            Box::new(move |value| -> BoxFuture<'static, Result<Static<A, O>, BoxError>> {
                let pending = implementation(value);
                Box::pin(async move { pending.await.map_err(Into::into) })
            }),
        )
    }
}

impl<A> Clone for MethodBuilder<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
        }
    }
}
