use crate::kind::ErrorKind;

/// Faults raised by an adapter itself.
///
/// These are programmer errors (a schema the adapter cannot evaluate, or an
/// extraction rule that disagrees with validation), never data rejections.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The schema value is malformed for this adapter.
    #[error("{adapter} adapter: malformed schema: {message}")]
    MalformedSchema {
        adapter: &'static str,
        message: String,
    },

    /// A validated value did not decode into the projected type.
    #[error("{adapter} adapter: validated value does not fit projected type: {message}")]
    Projection {
        adapter: &'static str,
        message: String,
    },
}

impl AdapterError {
    /// Taxonomy kind for this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::AdapterFault
    }

    /// Name of the adapter that faulted.
    pub fn adapter(&self) -> &'static str {
        match self {
            AdapterError::MalformedSchema { adapter, .. }
            | AdapterError::Projection { adapter, .. } => adapter,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
