use thiserror::Error;

/// Error type for the source scanner (the Parser/Locator collaborator).
///
/// Any of these aborts the run before aliasing starts; the engine never
/// operates on a partially tokenized unit.
#[derive(Debug, Error)]
pub enum LocateError {
    /// A string literal was opened but the buffer ended before the closing quote.
    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),
    /// A character literal was opened but never closed.
    #[error("unterminated character literal starting at byte {0}")]
    UnterminatedChar(usize),
    /// A block comment was opened but never closed.
    #[error("unterminated block comment starting at byte {0}")]
    UnterminatedComment(usize),
    /// A numeric literal could not be read in its stated radix.
    #[error("malformed integer literal `{raw}` at byte {offset}")]
    MalformedInteger {
        /// Byte offset of the literal's first character.
        offset: usize,
        /// The literal text as it appears in the source.
        raw: String,
    },
    /// A linemarker directive did not carry a quoted file name.
    #[error("malformed linemarker at byte {0}")]
    MalformedLinemarker(usize),
}

/// Error type for rewrite-buffer composition.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// An edit extends past the end of the original buffer.
    #[error("edit out of bounds at offset {0}")]
    OutOfBounds(usize),
    /// Two edits claim overlapping byte ranges of the original buffer.
    #[error("overlapping edits detected at offset {0}")]
    Overlap(usize),
}

/// Errors that can occur while obfuscating a translation unit.
#[derive(Debug, Error)]
pub enum ObfuscateError {
    /// File read/write error.
    #[error("file error: {0}")]
    File(#[from] std::io::Error),
    /// The scanner could not tokenize the input.
    #[error("locate error: {0}")]
    Locate(#[from] LocateError),
    /// Span invariants were violated during rewriting.
    #[error("rewrite error: {0}")]
    Rewrite(#[from] RewriteError),
    /// JSON serialization error for the report artifact.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
