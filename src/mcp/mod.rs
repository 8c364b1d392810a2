// ABOUTME: MCP module - wire types for tool listing and tool calls.
// ABOUTME: The transport that carries them lives outside this crate.

mod types;

pub use types::*;
