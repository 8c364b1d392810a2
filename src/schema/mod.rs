// ABOUTME: Schema module - input schema synthesis from parameter shapes.
// ABOUTME: Runs once per tool; the resulting Schema is immutable.

mod synthesize;

pub use synthesize::*;
