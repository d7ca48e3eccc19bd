//! Concrete type adapters.
//!
//! Each adapter binds one way of describing data to the capability in
//! `typeadapt-adapter`:
//! - [`PassthroughAdapter`] accepts everything and projects to the unknown type
//! - [`SerdeAdapter`] treats a Rust type as its own schema
//! - [`JsonSchemaAdapter`] validates JSON Schema documents (draft-7, 2019-09,
//!   2020-12) with an explicit type tag carried by [`JsonSchema`]
//!
//! [`SchemaRegistry`] loads named JSON Schema documents from disk or from
//! embedded strings.

pub mod config;
pub mod error;
pub mod json_schema;
pub mod passthrough;
pub mod registry;
pub mod serde_schema;
pub(crate) mod validator;

pub use config::{Dialect, JsonSchemaConfig, RegistryConfig};
pub use error::{Result, SchemaError};
pub use json_schema::{JsonSchema, JsonSchemaAdapter};
pub use passthrough::PassthroughAdapter;
pub use registry::SchemaRegistry;
pub use serde_schema::{SerdeAdapter, SerdeSchema};
