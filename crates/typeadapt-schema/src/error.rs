/// Errors that can occur while loading or registering schema documents.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// The schema could not be compiled.
    #[error("failed to compile schema {name}: {message}")]
    CompileFailed { name: String, message: String },

    /// The schema document is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A schema with the same name is already registered.
    #[error("schema {0} is already registered")]
    DuplicateSchema(String),

    /// The schema name cannot be used as a registry key.
    #[error("invalid schema name: {0:?}")]
    InvalidName(String),

    /// No schema registered under the given name.
    #[error("no schema registered as {0}")]
    NoSchema(String),

    /// The dialect name is not supported.
    #[error("unknown JSON Schema dialect: {0}")]
    UnknownDialect(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
