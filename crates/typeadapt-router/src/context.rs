use std::sync::Arc;

use typeadapt_adapter::TypeAdapter;

use crate::builder::ProcedureBuilder;
use crate::error::Result;
use crate::router::{Router, RouterEntry};

/// Entry point for defining procedures and routers around one default adapter.
///
/// Procedures started from a context inherit its adapter unless they
/// override it. Routers built here record the context's adapter as their
/// default; a nested router built from a different context keeps its own.
pub struct RpcContext<A> {
    adapter: Arc<A>,
}

impl<A: TypeAdapter> RpcContext<A> {
    pub fn new(adapter: A) -> Self {
        Self::shared(Arc::new(adapter))
    }

    pub fn shared(adapter: Arc<A>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    /// Start a procedure definition with the default adapter.
    pub fn procedure(&self) -> ProcedureBuilder<A> {
        ProcedureBuilder::new(Arc::clone(&self.adapter))
    }

    /// Freeze `entries` into a router.
    ///
    /// Fails without building anything if a name repeats or cannot be
    /// addressed by a path.
    pub fn router<I, N, E>(&self, entries: I) -> Result<Router>
    where
        I: IntoIterator<Item = (N, E)>,
        N: Into<String>,
        E: Into<RouterEntry>,
    {
        Router::build(
            self.adapter.name(),
            entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry.into())),
        )
    }
}

impl<A> Clone for RpcContext<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use typeadapt_schema::{JsonSchema, JsonSchemaAdapter, SerdeAdapter, SerdeSchema};

    use super::*;

    #[test]
    fn procedures_inherit_context_adapter() {
        let rpc = RpcContext::new(JsonSchemaAdapter::new());
        let builder = rpc.procedure();
        assert_eq!(builder.adapter_name(), "json-schema");
    }

    #[tokio::test]
    async fn nested_router_keeps_its_own_default() {
        let outer = RpcContext::new(JsonSchemaAdapter::new());
        let inner = RpcContext::new(SerdeAdapter);

        let math = inner
            .router([(
                "double",
                inner
                    .procedure()
                    .input(SerdeSchema::<i64>::new())
                    .output(SerdeSchema::<i64>::new())
                    .query(|n: i64| n * 2),
            )])
            .unwrap();

        let root = outer
            .router([
                (
                    "ping",
                    RouterEntry::from(
                        outer
                            .procedure()
                            .input(JsonSchema::untyped(json!({})))
                            .output(JsonSchema::<String>::new(json!({ "type": "string" })))
                            .query(|_| "pong".to_string()),
                    ),
                ),
                ("math", RouterEntry::from(math)),
            ])
            .unwrap();

        assert_eq!(root.default_adapter(), "json-schema");
        let shape = root.shape();
        assert_eq!(shape.default_adapter, "json-schema");
        match shape.entries.get("math") {
            Some(crate::ShapeNode::Router(nested)) => {
                assert_eq!(nested.default_adapter, "serde")
            }
            other => panic!("unexpected shape: {other:?}"),
        }

        assert_eq!(root.call("math.double", json!(21)).await.unwrap(), json!(42));
        assert_eq!(root.call("ping", json!(null)).await.unwrap(), json!("pong"));
    }
}
