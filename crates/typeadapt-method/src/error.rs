use typeadapt_adapter::{AdapterError, ErrorKind};

/// Boxed implementation failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while invoking a method.
#[derive(Debug, thiserror::Error)]
pub enum MethodError {
    /// The argument did not satisfy the input schema.
    #[error("invalid input ({adapter}): {detail}")]
    InvalidInput {
        adapter: &'static str,
        detail: String,
    },

    /// The implementation returned a value that fails the output schema.
    #[error("invalid output ({adapter}): {detail}")]
    InvalidOutput {
        adapter: &'static str,
        detail: String,
    },

    /// The adapter itself faulted.
    #[error(transparent)]
    AdapterFault(#[from] AdapterError),

    /// The implementation failed; the original error is kept as-is.
    #[error(transparent)]
    Handler(BoxError),
}

impl MethodError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MethodError::InvalidInput { .. } => ErrorKind::InvalidInput,
            MethodError::InvalidOutput { .. } => ErrorKind::InvalidOutput,
            MethodError::AdapterFault(_) => ErrorKind::AdapterFault,
            MethodError::Handler(_) => ErrorKind::Handler,
        }
    }
}

pub type Result<T> = std::result::Result<T, MethodError>;
