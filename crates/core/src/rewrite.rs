//! Offset-stable buffer rewriting and macro-definition emission.
//!
//! All edits are addressed in original-buffer coordinates and composed in a
//! single pass, so the order edits were queued in never affects the result.

use crate::record::SymbolTable;
use crate::token::SourceSpan;
use macroveil_utils::errors::RewriteError;
use tracing::debug;

/// A queued replacement addressed in original-buffer coordinates.
#[derive(Debug, Clone)]
struct Edit {
    span: SourceSpan,
    replacement: String,
}

/// Owns a copy of the original buffer plus a set of pending edits.
///
/// `render` is a pure function of (original, edit set): edits are sorted by
/// original offset and spliced between untouched runs, independent of the
/// lengths of their replacements.
#[derive(Debug)]
pub struct RewriteBuffer {
    original: String,
    edits: Vec<Edit>,
}

impl RewriteBuffer {
    /// Creates a buffer over a copy of `original` with no pending edits.
    pub fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            edits: Vec::new(),
        }
    }

    /// Queues a replacement of the original bytes at `span` with
    /// `replacement`. Nothing is mutated until [`render`](Self::render).
    pub fn replace(&mut self, span: SourceSpan, replacement: &str) {
        self.edits.push(Edit {
            span,
            replacement: replacement.to_string(),
        });
    }

    /// The untouched original buffer.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Number of pending edits.
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Composes all pending edits into a fresh buffer.
    ///
    /// Edits must lie inside the original buffer and be pairwise disjoint;
    /// violations surface as [`RewriteError`] rather than corrupting offsets.
    pub fn render(&self) -> Result<String, RewriteError> {
        let mut ordered: Vec<&Edit> = self.edits.iter().collect();
        ordered.sort_by_key(|edit| edit.span.offset);

        let mut out = String::with_capacity(self.original.len());
        let mut cursor = 0usize;
        for edit in ordered {
            if edit.span.end() > self.original.len() {
                return Err(RewriteError::OutOfBounds(edit.span.offset));
            }
            if edit.span.offset < cursor {
                return Err(RewriteError::Overlap(edit.span.offset));
            }
            out.push_str(&self.original[cursor..edit.span.offset]);
            out.push_str(&edit.replacement);
            cursor = edit.span.end();
        }
        out.push_str(&self.original[cursor..]);
        Ok(out)
    }
}

/// Queues one edit per recorded span, replacing the span with its key's alias.
pub fn apply_replacements(table: &SymbolTable, buffer: &mut RewriteBuffer) {
    for (key, spans) in table.occurrences() {
        if let Some(alias) = table.alias_of(key) {
            for span in spans {
                buffer.replace(*span, alias);
            }
        }
    }
    debug!(edits = buffer.edit_count(), "queued replacements");
}

/// Serializes the macro-definition header: one `#define <alias> <key>` line
/// per distinct symbol, in table-iteration order. The key text is written
/// verbatim, with no escaping beyond what classification already normalized.
pub fn emit_definitions(table: &SymbolTable) -> String {
    let mut block = String::new();
    for (key, entry) in table.entries() {
        block.push_str("#define ");
        block.push_str(&entry.alias);
        block.push(' ');
        block.push_str(key);
        block.push('\n');
    }
    block
}
