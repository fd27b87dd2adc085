//! Heuristic Parser/Locator for C/C++-style translation units.
//!
//! Turns raw source text into the flat stream of [`TokenOccurrence`]s the
//! aliasing engine consumes: declaration- and reference-sites for variables
//! and functions plus all integer and string literal sites, each with a byte
//! span into the original buffer and a primary-file flag.
//!
//! This is a single-pass scanner, not a real front end. Declarations are told
//! apart from references with a type-position heuristic, qualifier and
//! member-access names are skipped, and "included text" is recognized via
//! GCC-style linemarkers in preprocessed input. That is deliberately the
//! weakest locator that satisfies the engine's interface; the engine itself
//! never depends on this crate.

mod scanner;

pub use scanner::scan;
