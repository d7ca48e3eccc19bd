use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// JSON Schema dialect used to compile documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    #[serde(rename = "draft-7")]
    Draft7,
    #[serde(rename = "2019-09")]
    Draft201909,
    #[serde(rename = "2020-12")]
    Draft202012,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Draft7 => "draft-7",
            Dialect::Draft201909 => "2019-09",
            Dialect::Draft202012 => "2020-12",
        }
    }

    pub(crate) fn draft(self) -> jsonschema::Draft {
        match self {
            Dialect::Draft7 => jsonschema::Draft::Draft7,
            Dialect::Draft201909 => jsonschema::Draft::Draft201909,
            Dialect::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft-7" | "draft7" => Ok(Dialect::Draft7),
            "2019-09" | "draft2019-09" => Ok(Dialect::Draft201909),
            "2020-12" | "draft2020-12" => Ok(Dialect::Draft202012),
            other => Err(SchemaError::UnknownDialect(other.to_string())),
        }
    }
}

/// Controls how [`JsonSchemaAdapter`](crate::JsonSchemaAdapter) compiles documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonSchemaConfig {
    /// Dialect documents are interpreted under.
    pub dialect: Dialect,
    /// When true, object schemas reject properties they do not declare.
    pub strict_mode: bool,
}

impl JsonSchemaConfig {
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }
}

/// Controls schema registry loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Compile settings used to check documents as they are registered.
    pub schema: JsonSchemaConfig,
    /// Maximum number of schemas loaded from a directory.
    pub max_schemas_from_directory: usize,
    /// Maximum bytes allowed per schema file loaded from a directory.
    pub max_schema_file_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            schema: JsonSchemaConfig::default(),
            max_schemas_from_directory: 256,
            max_schema_file_size: 256 * 1024,
        }
    }
}
