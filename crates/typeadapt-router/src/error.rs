use typeadapt_adapter::ErrorKind;
use typeadapt_method::MethodError;

/// Errors that can occur while building or calling a router.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Two entries at one level share a name.
    #[error("duplicate router entry name: {0}")]
    DuplicateName(String),

    /// The entry name cannot be addressed by a path.
    #[error("invalid router entry name: {0:?}")]
    InvalidName(String),

    /// No procedure at the given path.
    #[error("no procedure at path {0}")]
    NotFound(String),

    /// The procedure at `path` failed.
    #[error("procedure {path} failed: {source}")]
    Procedure {
        path: String,
        #[source]
        source: MethodError,
    },
}

impl RouterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouterError::DuplicateName(_) => ErrorKind::DuplicateName,
            RouterError::InvalidName(_) => ErrorKind::InvalidName,
            RouterError::NotFound(_) => ErrorKind::NotFound,
            RouterError::Procedure { source, .. } => source.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;
