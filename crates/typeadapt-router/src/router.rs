use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};
use typeadapt_adapter::Adapts;

use crate::error::{Result, RouterError};
use crate::procedure::{ErasedProcedure, Procedure};
use crate::shape::{RouterShape, ShapeNode};

/// Separator between router levels in a procedure path (`"math.add"`).
pub const PATH_SEPARATOR: char = '.';

const MAX_NAME_LEN: usize = 128;

/// One named slot in a router.
#[derive(Clone)]
pub enum RouterEntry {
    Procedure(Arc<dyn ErasedProcedure>),
    Router(Router),
}

impl<A, I, O> From<Procedure<A, I, O>> for RouterEntry
where
    A: Adapts<I> + Adapts<O>,
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    fn from(procedure: Procedure<A, I, O>) -> Self {
        RouterEntry::Procedure(Arc::new(procedure))
    }
}

impl From<Router> for RouterEntry {
    fn from(router: Router) -> Self {
        RouterEntry::Router(router)
    }
}

impl fmt::Debug for RouterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterEntry::Procedure(procedure) => f
                .debug_struct("Procedure")
                .field("kind", &procedure.kind())
                .field("adapter", &procedure.adapter_name())
                .finish(),
            RouterEntry::Router(router) => router.fmt(f),
        }
    }
}

/// Immutable mapping from names to procedures and nested routers.
///
/// Cloning is cheap; procedures are shared, not copied.
#[derive(Clone)]
pub struct Router {
    default_adapter: &'static str,
    entries: BTreeMap<String, RouterEntry>,
}

impl Router {
    pub(crate) fn build(
        default_adapter: &'static str,
        entries: impl IntoIterator<Item = (String, RouterEntry)>,
    ) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (name, entry) in entries {
            validate_name(&name)?;
            match map.entry(name) {
                Entry::Occupied(occupied) => {
                    return Err(RouterError::DuplicateName(occupied.key().clone()));
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(entry);
                }
            }
        }

        debug!(default_adapter, entries = map.len(), "router built");
        Ok(Self {
            default_adapter,
            entries: map,
        })
    }

    /// Name of the adapter procedures in this router inherit by default.
    pub fn default_adapter(&self) -> &'static str {
        self.default_adapter
    }

    pub fn get(&self, name: &str) -> Option<&RouterEntry> {
        self.entries.get(name)
    }

    /// Entry names at this level, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the procedure at a dotted path.
    pub fn resolve(&self, path: &str) -> Result<&Arc<dyn ErasedProcedure>> {
        let not_found = || RouterError::NotFound(path.to_string());

        let mut router = self;
        let mut segments = path.split(PATH_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            let last = segments.peek().is_none();
            match (router.entries.get(segment), last) {
                (Some(RouterEntry::Procedure(procedure)), true) => return Ok(procedure),
                (Some(RouterEntry::Router(nested)), false) => router = nested,
                _ => return Err(not_found()),
            }
        }
        Err(not_found())
    }

    /// Invoke the procedure at `path` with an untyped argument.
    pub async fn call(&self, path: &str, input: Value) -> Result<Value> {
        let procedure = self.resolve(path)?;
        trace!(path, kind = %procedure.kind(), "calling procedure");

        procedure.invoke(input).await.map_err(|source| {
            debug!(path, kind = %source.kind(), error = %source, "procedure failed");
            RouterError::Procedure {
                path: path.to_string(),
                source,
            }
        })
    }

    /// Every procedure path reachable from this router, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, entry) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}{PATH_SEPARATOR}{name}")
            };
            match entry {
                RouterEntry::Procedure(_) => out.push(path),
                RouterEntry::Router(nested) => nested.collect_paths(&path, out),
            }
        }
    }

    /// Serializable description of this router's structure.
    pub fn shape(&self) -> RouterShape {
        let entries = self
            .entries
            .iter()
            .map(|(name, entry)| {
                let node = match entry {
                    RouterEntry::Procedure(procedure) => ShapeNode::Procedure {
                        kind: procedure.kind(),
                        adapter: procedure.adapter_name().to_string(),
                    },
                    RouterEntry::Router(nested) => ShapeNode::Router(nested.shape()),
                };
                (name.clone(), node)
            })
            .collect();

        RouterShape {
            default_adapter: self.default_adapter.to_string(),
            entries,
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("default_adapter", &self.default_adapter)
            .field("entries", &self.entries)
            .finish()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(RouterError::InvalidName(name.to_string()));
    }
    if name
        .chars()
        .any(|c| c == PATH_SEPARATOR || c.is_whitespace() || c.is_control())
    {
        return Err(RouterError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use typeadapt_adapter::ErrorKind;
    use typeadapt_schema::{JsonSchema, JsonSchemaAdapter};

    use super::*;
    use crate::context::RpcContext;
    use crate::procedure::ProcedureKind;

    fn number() -> JsonSchema<f64> {
        JsonSchema::new(json!({ "type": "number" }))
    }

    fn pair() -> JsonSchema<(f64, f64)> {
        JsonSchema::new(json!({
            "type": "array",
            "items": { "type": "number" },
            "minItems": 2,
            "maxItems": 2
        }))
    }

    fn math(rpc: &RpcContext<JsonSchemaAdapter>) -> Router {
        rpc.router([
            (
                "add",
                rpc.procedure()
                    .input(pair())
                    .output(number())
                    .query(|(a, b)| a + b),
            ),
            (
                "sub",
                rpc.procedure()
                    .input(pair())
                    .output(number())
                    .query(|(a, b)| a - b),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let rpc = RpcContext::new(JsonSchemaAdapter::new());
        let err = rpc
            .router([
                ("same", rpc.procedure().input(number()).output(number()).query(|n| n)),
                ("same", rpc.procedure().input(number()).output(number()).query(|n| -n)),
            ])
            .unwrap_err();

        assert!(matches!(err, RouterError::DuplicateName(ref name) if name == "same"));
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
    }

    #[test]
    fn unaddressable_names_are_rejected() {
        let rpc = RpcContext::new(JsonSchemaAdapter::new());
        let long = "x".repeat(129);
        for bad in ["", "math.add", "with space", "tab\t", long.as_str()] {
            let err = rpc
                .router([(
                    bad.to_string(),
                    rpc.procedure().input(number()).output(number()).query(|n| n),
                )])
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidName, "name {bad:?}");
        }
    }

    #[tokio::test]
    async fn nested_paths_resolve_and_invoke() {
        let rpc = RpcContext::new(JsonSchemaAdapter::new());
        let root = rpc
            .router([("math", RouterEntry::from(math(&rpc)))])
            .unwrap();

        assert_eq!(root.paths(), vec!["math.add", "math.sub"]);
        assert_eq!(root.call("math.add", json!([1, 2])).await.unwrap(), json!(3.0));
        assert_eq!(root.call("math.sub", json!([5, 2])).await.unwrap(), json!(3.0));
        assert_eq!(
            root.resolve("math.add").unwrap().kind(),
            ProcedureKind::Query
        );
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let rpc = RpcContext::new(JsonSchemaAdapter::new());
        let root = rpc
            .router([("math", RouterEntry::from(math(&rpc)))])
            .unwrap();

        for path in ["", "math", "math.mul", "math.add.extra", "add"] {
            let err = root.call(path, json!([1, 2])).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "path {path:?}");
        }
    }

    #[tokio::test]
    async fn procedure_errors_carry_path_and_kind() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let rpc = RpcContext::new(JsonSchemaAdapter::new());
        let root = rpc
            .router([(
                "inc",
                rpc.procedure()
                    .input(number())
                    .output(number())
                    .mutation(move |n| {
                        seen.fetch_add(1, Ordering::SeqCst);
                        n + 1.0
                    }),
            )])
            .unwrap();

        let err = root.call("inc", json!("one")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(matches!(err, RouterError::Procedure { ref path, .. } if path == "inc"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn routers_are_shared_on_clone() {
        let rpc = RpcContext::new(JsonSchemaAdapter::new());
        let original = math(&rpc);
        let copy = original.clone();

        match (original.get("add"), copy.get("add")) {
            (Some(RouterEntry::Procedure(a)), Some(RouterEntry::Procedure(b))) => {
                assert!(Arc::ptr_eq(a, b))
            }
            other => panic!("unexpected entries: {other:?}"),
        }
        assert_eq!(original.names(), vec!["add", "sub"]);
        assert_eq!(copy.len(), 2);
        assert!(!copy.is_empty());
    }
}
