// ABOUTME: Implements the Registry - an explicitly constructed set of tools
// ABOUTME: that routes inbound call envelopes to the tool they name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{CallContext, Tool, ToolResult};
use crate::error::ToolError;
use crate::mcp::{McpToolCallParams, McpToolInfo, McpToolResult, McpToolsListResult};

/// A fixed set of tools, read-only once built.
///
/// Cloning is cheap and every clone sees the same tools.
#[derive(Clone, Default)]
pub struct Registry {
    tools: Arc<HashMap<String, Arc<dyn Tool>>>,
}

impl Registry {
    /// Build a registry from tools. A later tool replaces an earlier one with
    /// the same name.
    pub fn new(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let mut map = HashMap::new();
        for tool in tools {
            if let Some(previous) = map.insert(tool.name().to_string(), tool) {
                debug!(target: "fntool", tool = previous.name(), "replaced tool");
            }
        }
        Self {
            tools: Arc::new(map),
        }
    }

    /// Start collecting tools.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool names, sorted alphabetically.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered tools.
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Schema export for every tool, sorted by name.
    pub fn definitions(&self) -> McpToolsListResult {
        let mut infos: Vec<McpToolInfo> = self.tools.values().map(|t| t.info()).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        McpToolsListResult { tools: infos }
    }

    /// Route an inbound call to the named tool.
    pub async fn call(&self, ctx: CallContext, params: McpToolCallParams) -> McpToolResult {
        let Some(tool) = self.get(&params.name) else {
            let err = ToolError::NotFound(params.name);
            warn!(target: "fntool", error = %err, "unknown tool");
            return ToolResult::error(err.to_string()).into();
        };
        tool.call(ctx, params.arguments).await.into()
    }

    /// Decode a raw `tools/call` payload and route it.
    pub async fn call_json(&self, ctx: CallContext, payload: &str) -> McpToolResult {
        match serde_json::from_str::<McpToolCallParams>(payload) {
            Ok(params) => self.call(ctx, params).await,
            Err(err) => {
                let err = ToolError::Encoding(err);
                warn!(target: "fntool", error = %err, "undecodable tool call");
                ToolResult::error(err.to_string()).into()
            }
        }
    }
}

impl FromIterator<Arc<dyn Tool>> for Registry {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Tool>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Collects tools at startup and is consumed into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    tools: Vec<Arc<dyn Tool>>,
}

impl RegistryBuilder {
    /// Add a tool.
    pub fn register<T: Tool + 'static>(self, tool: T) -> Self {
        self.register_arc(Arc::new(tool))
    }

    /// Add a tool from an Arc.
    pub fn register_arc(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Freeze the collected tools.
    pub fn build(self) -> Registry {
        Registry::new(self.tools)
    }
}
