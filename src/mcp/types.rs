// ABOUTME: Defines MCP wire types for tools - call parameters, tool info,
// ABOUTME: and call results, matching the Model Context Protocol JSON shape.

use serde::{Deserialize, Serialize};

use crate::tool::ToolResult;

/// Information about a tool, as advertised in `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Result of listing tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolsListResult {
    pub tools: Vec<McpToolInfo>,
}

/// Parameters for calling a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolCallParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

/// Content block in a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum McpContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Result of calling a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolResult {
    pub content: Vec<McpContentBlock>,
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl McpToolResult {
    /// Concatenated text of all content blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                McpContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<ToolResult> for McpToolResult {
    fn from(result: ToolResult) -> Self {
        Self {
            content: vec![McpContentBlock::Text {
                text: result.content,
            }],
            is_error: result.is_error,
        }
    }
}
