// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use fntool::prelude::*;` to get started quickly.

pub use crate::bind::{BindConfig, Binder, MissingFieldPolicy, coerce, zero_value};
pub use crate::error::{ConversionError, ToolError};
pub use crate::mcp::{
    McpContentBlock, McpToolCallParams, McpToolInfo, McpToolResult, McpToolsListResult,
};
pub use crate::schema::{Schema, synthesize, type_schema};
pub use crate::shape::{
    FieldShape, FloatKind, IntKind, ParameterShape, RecordShape, Shaped, TypeShape,
};
pub use crate::tool::{
    CallContext, FunctionTool, IntoToolOutput, Json, Registry, RegistryBuilder, Tool, ToolResult,
};
