//! Client side of a router.
//!
//! [`Client::project`] walks a [`RouterShape`](typeadapt_router::RouterShape)
//! and produces one stub per procedure, nested the same way as the router.
//! Stubs hand arguments to a [`Transport`]; they do not validate, the
//! server does.
//!
//! [`LocalTransport`] is an in-process loopback that still serializes both
//! directions, so it behaves like a real wire.

pub mod client;
pub mod envelope;
pub mod error;
pub mod transport;

pub use client::{Client, ClientNode, ClientStub, Namespace, TypedStub};
pub use envelope::{serve, RemoteError, Reply};
pub use error::{ClientError, Result};
pub use transport::{LocalTransport, Transport};
