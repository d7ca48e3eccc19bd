use std::fmt;

use serde::{Deserialize, Serialize};

/// Failure taxonomy shared by every layer and relayed across transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The argument did not satisfy the input schema.
    InvalidInput,
    /// The implementation's result did not satisfy the output schema.
    InvalidOutput,
    /// Two router entries share a name at one level.
    DuplicateName,
    /// The adapter could not evaluate a schema or project a value.
    AdapterFault,
    /// The wrapped implementation failed.
    Handler,
    /// A router entry name is not addressable.
    InvalidName,
    /// No procedure exists at the requested path.
    NotFound,
    /// The transport could not carry the call.
    Transport,
}

impl ErrorKind {
    /// Stable wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::InvalidOutput => "invalid_output",
            ErrorKind::DuplicateName => "duplicate_name",
            ErrorKind::AdapterFault => "adapter_fault",
            ErrorKind::Handler => "handler",
            ErrorKind::InvalidName => "invalid_name",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Transport => "transport",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
