//! Symbol aliasing and rewrite engine for macroveil.
//!
//! The engine consumes a stream of token occurrences produced by an external
//! locator, groups them under canonical symbol keys, assigns each distinct key
//! a pseudorandom alias, and rewrites the original buffer so every occurrence
//! is replaced by its alias. A macro-definition header maps each alias back to
//! the original token text, so the output expands to a semantically identical
//! translation unit.

pub mod alias;
pub mod classify;
pub mod pipeline;
pub mod record;
pub mod rewrite;
pub mod token;
