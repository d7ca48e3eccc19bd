//! Validated methods.
//!
//! A method is a triple (adapter, input schema, output schema) closed over
//! an implementation. Every invocation:
//! 1. validates the argument against the input schema
//! 2. runs the implementation exactly once, only if the argument passed
//! 3. validates the result against the output schema
//!
//! Both checks use the same adapter instance. Implementation failures are
//! passed through untouched.

pub mod bound;
pub mod builder;
pub mod descriptor;
pub mod error;

pub use bound::{AsyncBoundMethod, BoundMethod};
pub use builder::MethodBuilder;
pub use descriptor::MethodDescriptor;
pub use error::{BoxError, MethodError, Result};
