// ABOUTME: Tool module - the Tool trait, function-backed tools, and routing.
// ABOUTME: Composes shape, schema and bind into callable units.

mod context;
mod function;
mod output;
mod registry;
mod result;
mod traits;

pub use context::*;
pub use function::*;
pub use output::*;
pub use registry::*;
pub use result::*;
pub use traits::*;

#[cfg(test)]
mod function_test;
