//! Procedures and routers.
//!
//! A procedure is a validated method assembled in stages: adapter, input
//! schema, output schema, then a terminal query or mutation that supplies
//! the implementation. Routers group procedures and nested routers under
//! unique names and are frozen once built.

pub mod builder;
pub mod context;
pub mod error;
pub mod procedure;
pub mod router;
pub mod shape;

pub use builder::{Missing, ProcedureBuilder, Set};
pub use context::RpcContext;
pub use error::{Result, RouterError};
pub use procedure::{ErasedProcedure, Procedure, ProcedureKind, Signature};
pub use router::{Router, RouterEntry, PATH_SEPARATOR};
pub use shape::{RouterShape, ShapeNode};
