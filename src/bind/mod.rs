// ABOUTME: Bind module - the argument binder and coercion engine.
// ABOUTME: Converts untyped inputs into values matching a parameter shape.

mod binder;
mod coerce;

pub use binder::*;
pub use coerce::{coerce, zero_value};

pub(crate) use coerce::Coercer;
