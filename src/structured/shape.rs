use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Schema validation failed for {shape}: {reason}")]
pub struct ShapeError {
    pub shape: &'static str,
    pub reason: String,
}

/// Expected-shape descriptor for a stage's output.
///
/// The check deserialises the object into the stage's payload type, so a
/// shape is only as deep as that type (one level of nested objects at most).
#[derive(Clone, Copy)]
pub struct Shape {
    name: &'static str,
    check: fn(&Value) -> Result<(), serde_json::Error>,
}

impl Shape {
    pub fn of<T>(name: &'static str) -> Self
    where
        T: DeserializeOwned,
    {
        Self {
            name,
            check: conforms::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn validate(&self, value: &Value) -> Result<(), ShapeError> {
        if !value.is_object() {
            return Err(ShapeError {
                shape: self.name,
                reason: "expected a JSON object".to_string(),
            });
        }

        (self.check)(value).map_err(|err| ShapeError {
            shape: self.name,
            reason: err.to_string(),
        })
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shape").field(&self.name).finish()
    }
}

fn conforms<T>(value: &Value) -> Result<(), serde_json::Error>
where
    T: DeserializeOwned,
{
    T::deserialize(value).map(|_| ())
}
