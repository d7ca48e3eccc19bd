//! Static type projection.
//!
//! `Static<A, S>` reads the output slot of adapter `A`'s extraction rule for
//! schema `S`. The same `(A, S)` pair always names the same type, so shape
//! mismatches between an implementation and its schemas are compile errors.

use serde::Serialize;
use serde_json::Value;

use crate::adapter::Infer;
use crate::error::{AdapterError, Result};

/// The type a schema denotes under an adapter.
pub type Static<A, S> = <A as Infer<S>>::Output;

/// Top type for schemas an adapter cannot refine.
pub type Unknown = Value;

/// Encode a projected value into the untyped representation validators see.
pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}

/// Decode an already-validated value into `Static<A, S>`.
///
/// A failure here means the adapter accepted a value its own extraction
/// rule cannot represent, which is reported as an adapter fault.
pub fn decode<A, S>(adapter: &A, _schema: &S, value: Value) -> Result<Static<A, S>>
where
    A: Infer<S>,
{
    serde_json::from_value(value).map_err(|err| AdapterError::Projection {
        adapter: adapter.name(),
        message: err.to_string(),
    })
}
