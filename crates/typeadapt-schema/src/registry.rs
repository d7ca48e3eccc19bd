use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{Result, SchemaError};
use crate::json_schema::{JsonSchema, JsonSchemaAdapter};

const SCHEMA_SUFFIX: &str = ".schema.json";
const MAX_NAME_LEN: usize = 128;

/// Named JSON Schema documents, checked against one compile config.
pub struct SchemaRegistry {
    schemas: BTreeMap<String, JsonSchema>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            schemas: BTreeMap::new(),
            config,
        }
    }

    /// Register a schema from JSON text.
    pub fn register(&mut self, name: &str, schema_json: &str) -> Result<()> {
        let document: Value = serde_json::from_str(schema_json)?;
        self.register_value(name, document)
    }

    /// Register a schema document.
    ///
    /// The document is compiled immediately so malformed schemas are
    /// reported at load time rather than on first validation.
    pub fn register_value(&mut self, name: &str, document: Value) -> Result<()> {
        validate_name(name)?;
        if self.schemas.contains_key(name) {
            return Err(SchemaError::DuplicateSchema(name.to_string()));
        }

        let schema = JsonSchema::untyped(document);
        schema
            .prepare(&self.config.schema)
            .map_err(|err| SchemaError::CompileFailed {
                name: name.to_string(),
                message: err.to_string(),
            })?;

        debug!(name, dialect = %self.config.schema.dialect, "registered schema");
        self.schemas.insert(name.to_string(), schema);
        Ok(())
    }

    /// Load `<name>.schema.json` files from a directory.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load `<name>.schema.json` files from a directory with explicit config.
    pub fn from_directory_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let mut loaded = 0usize;

        let entries = std::fs::read_dir(path)
            .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;

        for entry in entries {
            let entry = entry.map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some(name) = file_name.strip_suffix(SCHEMA_SUFFIX) else {
                continue;
            };

            let entry_path = entry.path();
            let metadata = std::fs::symlink_metadata(&entry_path)
                .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            if metadata.file_type().is_symlink() {
                return Err(SchemaError::LoadFailed(format!(
                    "refusing to load schema symlink: {file_name}"
                )));
            }
            if !metadata.is_file() {
                continue;
            }

            loaded = loaded.saturating_add(1);
            if loaded > registry.config.max_schemas_from_directory {
                return Err(SchemaError::LoadFailed(format!(
                    "schema count exceeds configured max ({})",
                    registry.config.max_schemas_from_directory
                )));
            }

            let content = read_limited(
                &entry_path,
                &metadata,
                registry.config.max_schema_file_size,
            )?;
            registry.register(name, &content)?;
        }

        Ok(registry)
    }

    /// Load from embedded `(name, json)` pairs.
    pub fn from_embedded(schemas: &[(&str, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (name, schema) in schemas {
            registry.register(name, schema)?;
        }
        Ok(registry)
    }

    /// Untagged schema registered under `name`.
    pub fn get(&self, name: &str) -> Option<&JsonSchema> {
        self.schemas.get(name)
    }

    /// Schema registered under `name`, tagged with `T`.
    pub fn typed<T>(&self, name: &str) -> Result<JsonSchema<T>> {
        self.get(name)
            .map(|schema| schema.retag())
            .ok_or_else(|| SchemaError::NoSchema(name.to_string()))
    }

    /// Adapter compiled with the same settings the registry checked against.
    pub fn adapter(&self) -> JsonSchemaAdapter {
        JsonSchemaAdapter::with_config(self.config.schema)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidName(name.to_string()))
    }
}

/// Read a schema file that was already checked via `listed` (its
/// `symlink_metadata`), refusing it if the opened file is a different one.
fn read_limited(path: &Path, listed: &std::fs::Metadata, max_bytes: usize) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|err| {
        SchemaError::LoadFailed(format!("failed opening schema {}: {err}", path.display()))
    })?;
    let opened = file
        .metadata()
        .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;

    #[cfg(unix)]
    {
        if !same_file_identity(listed, &opened) {
            return Err(SchemaError::LoadFailed(format!(
                "schema file changed during load: {}",
                path.display()
            )));
        }
    }
    #[cfg(not(unix))]
    let _ = listed;

    let len = opened.len();
    if len > max_bytes as u64 {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large ({len} bytes): {}",
            path.display()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            SchemaError::LoadFailed(format!("failed reading schema {}: {err}", path.display()))
        })?;
    if content.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "schema file too large while reading: {}",
            path.display()
        )));
    }
    Ok(content)
}

#[cfg(unix)]
fn same_file_identity(listed: &std::fs::Metadata, opened: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    listed.dev() == opened.dev() && listed.ino() == opened.ino()
}
