// ABOUTME: Defines the ToolResult type - the outbound envelope of a call,
// ABOUTME: carrying JSON-encoded result text or an error message.

use serde_json::Value;

/// Result of a tool call as seen by the caller.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// JSON text of the result, or the error message.
    pub content: String,

    /// Whether this result represents an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create a successful result holding the JSON encoding of `value`.
    pub fn json(value: &Value) -> Self {
        Self::text(value.to_string())
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
        }
    }

    /// Decode the content back into a JSON value. Only meaningful on success.
    pub fn value(&self) -> Option<Value> {
        if self.is_error {
            return None;
        }
        serde_json::from_str(&self.content).ok()
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::json(&Value::Null)
    }
}
