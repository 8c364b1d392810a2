// ABOUTME: Shape module - structural descriptions of parameter types.
// ABOUTME: Shared by the schema synthesizer and the argument binder.

mod shaped;
mod types;

pub use shaped::*;
pub use types::*;
