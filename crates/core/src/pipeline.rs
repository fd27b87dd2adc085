//! Pipeline driver: strict two-phase Collect → Emit over one translation
//! unit.

use crate::alias::AliasGenerator;
use crate::classify::classify;
use crate::record::SymbolTable;
use crate::rewrite::{apply_replacements, emit_definitions, RewriteBuffer};
use crate::token::TokenOccurrence;
use macroveil_utils::errors::ObfuscateError;
use tracing::debug;

/// Configuration for one obfuscation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObfuscationConfig {
    /// Fixed seed for the alias generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Result of obfuscating one translation unit.
#[derive(Debug)]
pub struct Obfuscation {
    /// Macro-definition header followed by the rewritten source.
    pub output: String,
    /// The populated symbol tables, read-only after Emit.
    pub symbols: SymbolTable,
}

/// Runs the aliasing engine over `source` and the token-occurrence stream the
/// locator produced for it.
///
/// The stream is consumed exactly once (Collect); afterwards every recorded
/// span is replaced by its key's alias and the definition header is emitted
/// (Emit). No occurrence is accepted once Emit has begun.
///
/// # Arguments
/// * `source` - The original buffer the spans refer to.
/// * `tokens` - Finite stream of token occurrences for the unit.
/// * `config` - Seed selection for the alias generator.
///
/// # Returns
/// The output artifact plus the populated symbol tables, or an error if a
/// span invariant was violated.
pub fn obfuscate_source<I>(
    source: &str,
    tokens: I,
    config: &ObfuscationConfig,
) -> Result<Obfuscation, ObfuscateError>
where
    I: IntoIterator<Item = TokenOccurrence>,
{
    let generator = match config.seed {
        Some(seed) => AliasGenerator::from_seed(seed),
        None => AliasGenerator::from_entropy(),
    };
    let mut table = SymbolTable::new(generator);

    // Collect phase: classify and record every eligible occurrence.
    let mut total = 0usize;
    let mut eligible = 0usize;
    for occurrence in tokens {
        total += 1;
        if let Some(classified) = classify(&occurrence) {
            eligible += 1;
            table.record(classified, occurrence.span);
        }
    }
    debug!(
        total,
        eligible,
        symbols = table.symbol_count(),
        "collect phase complete"
    );

    // Emit phase: one rewrite pass over the original buffer, then the
    // definition header.
    let mut buffer = RewriteBuffer::new(source);
    apply_replacements(&table, &mut buffer);
    let rewritten = buffer.render()?;

    let mut output = emit_definitions(&table);
    output.push_str(&rewritten);
    debug!(
        input_bytes = source.len(),
        output_bytes = output.len(),
        "emit phase complete"
    );

    Ok(Obfuscation {
        output,
        symbols: table,
    })
}
