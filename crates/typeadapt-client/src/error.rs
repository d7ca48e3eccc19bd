use typeadapt_adapter::ErrorKind;

/// Errors that can occur on the client side of a call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server reported a failure; `kind` is the server's classification.
    #[error("remote {kind}: {message}")]
    Remote { kind: ErrorKind, message: String },

    /// The transport could not deliver the call or its reply.
    #[error("transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The projected client has no procedure at this path.
    #[error("no procedure at path {0}")]
    UnknownProcedure(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Remote { kind, .. } => *kind,
            ClientError::Transport(_) | ClientError::Json(_) => ErrorKind::Transport,
            ClientError::UnknownProcedure(_) => ErrorKind::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
