// ABOUTME: IntoToolOutput - interprets a function's return value as a tool
// ABOUTME: result: nothing, a plain value, or a value-or-error pair.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;

/// Conversion from a function's return value into a tool result.
pub trait IntoToolOutput {
    fn into_output(self) -> Result<Value, ToolError>;
}

/// Wraps any serializable value as a tool result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoToolOutput for Json<T> {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(serde_json::to_value(self.0)?)
    }
}

impl IntoToolOutput for () {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(Value::Null)
    }
}

impl IntoToolOutput for Value {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(self)
    }
}

impl IntoToolOutput for &'static str {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(Value::from(self))
    }
}

macro_rules! plain_outputs {
    ($($t:ty),*) => {
        $(impl IntoToolOutput for $t {
            fn into_output(self) -> Result<Value, ToolError> {
                Ok(serde_json::to_value(self)?)
            }
        })*
    };
}

plain_outputs!(
    bool, String, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

impl<T: Serialize> IntoToolOutput for Vec<T> {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T: Serialize> IntoToolOutput for Option<T> {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<V: Serialize> IntoToolOutput for HashMap<String, V> {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<V: Serialize> IntoToolOutput for BTreeMap<String, V> {
    fn into_output(self) -> Result<Value, ToolError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A returned `ToolError` propagates unchanged; anything else is an
/// invocation failure.
impl<T, E> IntoToolOutput for Result<T, E>
where
    T: IntoToolOutput,
    E: Into<anyhow::Error>,
{
    fn into_output(self) -> Result<Value, ToolError> {
        match self {
            Ok(value) => value.into_output(),
            Err(err) => Err(match err.into().downcast::<ToolError>() {
                Ok(tool_error) => tool_error,
                Err(other) => ToolError::Execution(other),
            }),
        }
    }
}
