use std::sync::Arc;

use futures_core::future::BoxFuture;
use serde_json::Value;
use tracing::trace;
use typeadapt_router::Router;

use crate::envelope::{serve, Reply};
use crate::error::{ClientError, Result};

/// Delivers a call to a router and brings back its reply.
///
/// Implementations carry the argument to the server unchanged, invoke the
/// procedure at `path`, and return either its result or the server's
/// error with its kind intact.
pub trait Transport: Send + Sync {
    fn call<'a>(&'a self, path: &'a str, input: Value) -> BoxFuture<'a, Result<Value>>;
}

/// In-process loopback to a router.
///
/// Arguments and replies go through their serialized form, as they would
/// on a wire.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    router: Arc<Router>,
}

impl LocalTransport {
    pub fn new(router: Router) -> Self {
        Self::shared(Arc::new(router))
    }

    pub fn shared(router: Arc<Router>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }
}

impl Transport for LocalTransport {
    fn call<'a>(&'a self, path: &'a str, input: Value) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            let request = serde_json::to_vec(&input)?;
            trace!(path, bytes = request.len(), "loopback request");

            let response = serve(&self.router, path, &request)
                .await
                .map_err(|err| ClientError::Transport(format!("reply encoding failed: {err}")))?;
            trace!(path, bytes = response.len(), "loopback reply");

            serde_json::from_slice::<Reply>(&response)?.into_result()
        })
    }
}
