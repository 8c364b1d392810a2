// ABOUTME: Defines the Tool trait and the protocol adapter that maps an
// ABOUTME: inbound call to execute() and its outcome to a ToolResult.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{CallContext, ToolResult};
use crate::error::ToolError;
use crate::mcp::McpToolInfo;
use crate::schema::Schema;

/// A named, independently invocable unit with an input schema.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for callers.
    fn description(&self) -> &str;

    /// Returns the input schema, or `None` when no structured input is expected.
    fn schema(&self) -> Option<&Schema>;

    /// Bind `input`, invoke the tool, and return its result.
    async fn execute(
        &self,
        ctx: CallContext,
        input: Map<String, Value>,
    ) -> Result<Value, ToolError>;

    /// Schema export used to advertise the tool before any call.
    fn info(&self) -> McpToolInfo {
        let schema = self.schema().cloned().unwrap_or_default();
        McpToolInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: schema.to_value(),
        }
    }

    /// Handle an inbound call. Every failure becomes an error result.
    async fn call(&self, ctx: CallContext, arguments: Option<Value>) -> ToolResult {
        let outcome = match decode_arguments(arguments) {
            Ok(input) => self.execute(ctx, input).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(value) => {
                debug!(target: "fntool", tool = self.name(), "tool call succeeded");
                ToolResult::json(&value)
            }
            Err(err) => {
                warn!(target: "fntool", tool = self.name(), error = %err, "tool call failed");
                ToolResult::error(error_message(self.name(), self.schema(), &err))
            }
        }
    }
}

/// Decode the inbound argument payload into an untyped map.
pub fn decode_arguments(arguments: Option<Value>) -> Result<Map<String, Value>, ToolError> {
    match arguments {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ToolError::InvalidArguments(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Message for an error result. A missing required value on a tool with a
/// schema tells the caller which schema to follow.
fn error_message(name: &str, schema: Option<&Schema>, err: &ToolError) -> String {
    match schema {
        Some(schema) if err.is_missing_required() => format!(
            "The {} schema is required to execute {}.",
            schema.to_value(),
            name
        ),
        _ => err.to_string(),
    }
}
