// ABOUTME: Defines all error types for fntool using thiserror.
// ABOUTME: ConversionError comes from coercion, ToolError from binding and calls.

/// Errors from binding, invoking, or encoding a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("failed to convert parameter {field}: {source}")]
    Conversion {
        field: String,
        #[source]
        source: ConversionError,
    },

    /// Reserved for functions that need to signal a required-but-absent value.
    /// The binder only raises it under `MissingFieldPolicy::Reject`.
    #[error("Required: {0}")]
    MissingRequired(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

impl ToolError {
    /// Create a missing-required error for a named value.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingRequired(name.into())
    }

    /// Whether this error reports a required-but-absent value.
    pub fn is_missing_required(&self) -> bool {
        matches!(self, Self::MissingRequired(_))
    }
}

/// Errors from coercing an untyped value into a target shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("cannot convert {value} to {target}")]
    Mismatch { value: String, target: String },

    #[error("cannot convert {value} to {target}: {reason}")]
    Parse {
        value: String,
        target: String,
        reason: String,
    },

    #[error("cannot convert {value} to {target}: value is not representable")]
    NotRepresentable { value: String, target: String },

    #[error("cannot convert {value} to {target}: expected {expected} elements, got {found}")]
    Length {
        value: String,
        target: String,
        expected: usize,
        found: usize,
    },

    #[error("cannot convert slice element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },

    #[error("cannot convert map element {key}: {source}")]
    Entry {
        key: String,
        #[source]
        source: Box<ConversionError>,
    },

    #[error("cannot convert field {field}: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<ConversionError>,
    },

    #[error("missing required field {0}")]
    MissingField(String),
}

impl ConversionError {
    pub(crate) fn mismatch(value: &serde_json::Value, target: impl Into<String>) -> Self {
        Self::Mismatch {
            value: value.to_string(),
            target: target.into(),
        }
    }

    pub(crate) fn parse(
        value: &str,
        target: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::Parse {
            value: value.to_string(),
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}
