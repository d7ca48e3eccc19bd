//! Type-adapter capability for typeadapt.
//!
//! This is the lowest layer of typeadapt. A type adapter binds one schema
//! library to the rest of the framework through two declarations:
//! - an extraction rule ([`Infer`]) mapping a schema type to the concrete
//!   data type it describes, resolved at compile time
//! - a run-time check ([`Validate`]) deciding whether a candidate value
//!   conforms to a schema
//!
//! Everything above this crate is written against these traits and never
//! against a concrete schema library.

pub mod adapter;
pub mod error;
pub mod kind;
pub mod projection;

pub use adapter::{Adapts, Infer, TypeAdapter, Validate};
pub use error::{AdapterError, Result};
pub use kind::ErrorKind;
pub use projection::{decode, encode, Static, Unknown};
