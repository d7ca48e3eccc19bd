//! Typed methods and RPC routers over pluggable schema adapters.
//!
//! A schema library plugs in by implementing the adapter capability: a
//! run-time `validate` and a compile-time projection from schema to Rust
//! type. Everything above it (methods, procedures, routers, clients) is
//! written once against that capability.
//!
//! # Crate Structure
//!
//! - [`adapter`]: the capability traits and the shared error taxonomy
//! - [`schema`]: passthrough, serde and JSON Schema adapters (behind `schema` feature)
//! - [`method`]: validated methods and the method builder
//! - [`router`]: staged procedures and nested routers (behind `router` feature)
//! - [`client`]: stubs projected from router shapes (behind `client` feature)
//! - [`logging`]: stderr log setup for binaries and demos (behind `logging` feature)

/// Re-export adapter types.
pub mod adapter {
    pub use typeadapt_adapter::*;
}

/// Re-export schema adapters (requires `schema` feature).
#[cfg(feature = "schema")]
pub mod schema {
    pub use typeadapt_schema::*;
}

/// Re-export method types.
pub mod method {
    pub use typeadapt_method::*;
}

/// Re-export router types (requires `router` feature).
#[cfg(feature = "router")]
pub mod router {
    pub use typeadapt_router::*;
}

/// Re-export client types (requires `client` feature).
#[cfg(feature = "client")]
pub mod client {
    pub use typeadapt_client::*;
}

#[cfg(feature = "logging")]
pub mod logging;
