// ABOUTME: Argument binder - turns an untyped input map into call-ready
// ABOUTME: arguments for a ParameterShape, under a configurable missing-field policy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::Coercer;
use crate::error::{ConversionError, ToolError};
use crate::shape::{ParameterShape, VALUE_KEY};

/// What to do when a required field is absent from the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Fill the field with its type's zero value. Required-ness stays advisory.
    #[default]
    ZeroFill,
    /// Fail the bind with `ToolError::MissingRequired`.
    Reject,
}

/// Binder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    pub missing_fields: MissingFieldPolicy,
}

/// Binds untyped input to a parameter shape.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    config: BindConfig,
}

impl Binder {
    /// Create a binder with the permissive default policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BindConfig) -> Self {
        Self { config }
    }

    /// A binder that rejects absent required fields.
    pub fn strict() -> Self {
        Self::with_config(BindConfig {
            missing_fields: MissingFieldPolicy::Reject,
        })
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// Produce the canonical argument value for `shape` from `input`.
    ///
    /// The result deserializes into the function's parameter type: `null` for
    /// `Empty`, the input itself for `OpaqueMap`, an object with every wire field
    /// for `Record`, and the coerced `value` entry for `Single`.
    pub fn bind(
        &self,
        shape: &ParameterShape,
        input: &Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let coercer = Coercer::new(self.config.missing_fields);
        let bound = match shape {
            ParameterShape::Empty => Value::Null,
            ParameterShape::OpaqueMap => Value::Object(input.clone()),
            ParameterShape::Record(record) => {
                let fields = coercer.record(record, input).map_err(field_error)?;
                Value::Object(fields)
            }
            ParameterShape::Single(inner) => match input.get(VALUE_KEY) {
                Some(raw) => coercer
                    .coerce(raw, inner)
                    .map_err(|source| ToolError::Conversion {
                        field: VALUE_KEY.to_string(),
                        source,
                    })?,
                None if self.config.missing_fields == MissingFieldPolicy::Reject => {
                    return Err(ToolError::missing(VALUE_KEY));
                }
                None => super::zero_value(inner),
            },
        };
        debug!(target: "fntool", keys = input.len(), "bound arguments");
        Ok(bound)
    }
}

fn field_error((field, source): (String, ConversionError)) -> ToolError {
    match source {
        ConversionError::MissingField(name) if name == field => ToolError::MissingRequired(name),
        source => ToolError::Conversion { field, source },
    }
}
