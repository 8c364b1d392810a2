// ABOUTME: Root module for fntool - typed functions as schema-validated tools.
// ABOUTME: Re-exports the shape, schema, bind, tool and MCP wire types.

pub mod bind;
pub mod error;
pub mod mcp;
pub mod prelude;
pub mod schema;
pub mod shape;
pub mod tool;

pub use error::{ConversionError, ToolError};
