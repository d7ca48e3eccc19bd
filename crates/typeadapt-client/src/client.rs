use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use typeadapt_router::{ProcedureKind, RouterShape, ShapeNode, Signature, PATH_SEPARATOR};

use crate::error::{ClientError, Result};
use crate::transport::Transport;

/// A client mirroring one router: a stub per procedure, a namespace per
/// nested router.
#[derive(Clone)]
pub struct Client {
    root: Namespace,
}

impl Client {
    /// Build stubs for every procedure in `shape`.
    pub fn project(shape: &RouterShape, transport: Arc<dyn Transport>) -> Self {
        let root = Namespace::project(shape, "", &transport);
        debug!(
            procedures = root.count_stubs(),
            default_adapter = %shape.default_adapter,
            "client projected"
        );
        Self { root }
    }

    pub fn root(&self) -> &Namespace {
        &self.root
    }

    /// Stub at a dotted path.
    pub fn stub(&self, path: &str) -> Result<&ClientStub> {
        self.root.stub(path)
    }

    /// Top-level nested router by name.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.root.namespace(name)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("root", &self.root).finish()
    }
}

/// Client counterpart of a router entry.
#[derive(Debug, Clone)]
pub enum ClientNode {
    Stub(ClientStub),
    Namespace(Namespace),
}

/// Client counterpart of a router level.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: BTreeMap<String, ClientNode>,
}

impl Namespace {
    fn project(shape: &RouterShape, prefix: &str, transport: &Arc<dyn Transport>) -> Self {
        let entries = shape
            .entries
            .iter()
            .map(|(name, node)| {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}{PATH_SEPARATOR}{name}")
                };
                let node = match node {
                    ShapeNode::Procedure { kind, .. } => ClientNode::Stub(ClientStub {
                        path,
                        kind: *kind,
                        transport: Arc::clone(transport),
                    }),
                    ShapeNode::Router(nested) => {
                        ClientNode::Namespace(Namespace::project(nested, &path, transport))
                    }
                };
                (name.clone(), node)
            })
            .collect();
        Self { entries }
    }

    fn count_stubs(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                ClientNode::Stub(_) => 1,
                ClientNode::Namespace(nested) => nested.count_stubs(),
            })
            .sum()
    }

    pub fn get(&self, name: &str) -> Option<&ClientNode> {
        self.entries.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        match self.entries.get(name)? {
            ClientNode::Namespace(nested) => Some(nested),
            ClientNode::Stub(_) => None,
        }
    }

    /// Stub at a dotted path relative to this namespace.
    pub fn stub(&self, path: &str) -> Result<&ClientStub> {
        let unknown = || ClientError::UnknownProcedure(path.to_string());
        let mut namespace = self;
        let mut segments = path.split(PATH_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            let last = segments.peek().is_none();
            match (namespace.entries.get(segment), last) {
                (Some(ClientNode::Stub(stub)), true) => return Ok(stub),
                (Some(ClientNode::Namespace(nested)), false) => namespace = nested,
                _ => return Err(unknown()),
            }
        }
        Err(unknown())
    }
}

/// Untyped handle to one remote procedure.
#[derive(Clone)]
pub struct ClientStub {
    path: String,
    kind: ProcedureKind,
    transport: Arc<dyn Transport>,
}

impl ClientStub {
    /// Full dotted path of the procedure on the server.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> ProcedureKind {
        self.kind
    }

    /// Send `input` as-is and return the server's result.
    pub async fn call(&self, input: Value) -> Result<Value> {
        self.transport.call(&self.path, input).await.map_err(|err| {
            debug!(path = %self.path, kind = %err.kind(), "remote call failed");
            err
        })
    }

    /// Attach the server procedure's projected types.
    ///
    /// `signature` must come from the procedure served at [`path`](Self::path)
    /// (`Procedure::signature`). Nothing checks this: a signature taken from a
    /// different procedure compiles, and mismatches only show up as remote
    /// `InvalidInput` or local decode errors.
    pub fn bind<In, Out>(&self, _signature: Signature<In, Out>) -> TypedStub<In, Out> {
        TypedStub {
            stub: self.clone(),
            _signature: PhantomData,
        }
    }
}

impl fmt::Debug for ClientStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientStub")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A stub with the argument and result types of its server procedure.
pub struct TypedStub<In, Out> {
    stub: ClientStub,
    _signature: PhantomData<fn(In) -> Out>,
}

impl<In, Out> TypedStub<In, Out>
where
    In: Serialize,
    Out: DeserializeOwned,
{
    pub async fn call(&self, input: In) -> Result<Out> {
        let input = serde_json::to_value(&input)?;
        let output = self.stub.call(input).await?;
        Ok(serde_json::from_value(output)?)
    }

    pub fn untyped(&self) -> &ClientStub {
        &self.stub
    }
}

impl<In, Out> Clone for TypedStub<In, Out> {
    fn clone(&self) -> Self {
        Self {
            stub: self.stub.clone(),
            _signature: PhantomData,
        }
    }
}

impl<In, Out> fmt::Debug for TypedStub<In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedStub")
            .field("path", &self.stub.path)
            .field("signature", &Signature::<In, Out>::new())
            .finish()
    }
}
