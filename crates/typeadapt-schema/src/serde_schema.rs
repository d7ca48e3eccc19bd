use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typeadapt_adapter::{Infer, Result, TypeAdapter, Validate};

/// Uses a Rust type's `Deserialize` impl as the schema.
///
/// A value conforms when it deserializes into `T`, so the projected type and
/// the validator can never disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerdeAdapter;

/// Schema naming the Rust type `T`.
pub struct SerdeSchema<T>(PhantomData<fn() -> T>);

impl<T> SerdeSchema<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for SerdeSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeSchema<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SerdeSchema<T> {}

impl<T> fmt::Debug for SerdeSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeSchema<{}>", std::any::type_name::<T>())
    }
}

impl TypeAdapter for SerdeAdapter {
    fn name(&self) -> &'static str {
        "serde"
    }
}

impl<T: DeserializeOwned> Validate<SerdeSchema<T>> for SerdeAdapter {
    fn validate(&self, _schema: &SerdeSchema<T>, value: &Value) -> Result<bool> {
        Ok(T::deserialize(value).is_ok())
    }

    fn diagnose(&self, _schema: &SerdeSchema<T>, value: &Value) -> Option<String> {
        T::deserialize(value).err().map(|err| err.to_string())
    }
}

impl<T> Infer<SerdeSchema<T>> for SerdeAdapter
where
    T: Serialize + for<'de> Deserialize<'de> + Send + 'static,
{
    type Output = T;
}
