//! Summary statistics for one obfuscation run.
//!
//! The report quantifies how much of the unit was renamed: distinct symbols
//! split by category, occurrences rewritten, and the size cost of the
//! definition header. Serializable so the CLI can emit it as JSON.

use macroveil_core::classify::SymbolCategory;
use macroveil_core::record::SymbolTable;
use serde::{Deserialize, Serialize};

/// Aggregated statistics for a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObfuscationReport {
    /// Number of distinct symbol keys that received an alias.
    pub distinct_symbols: usize,
    /// Distinct keys categorized as identifiers.
    pub identifier_symbols: usize,
    /// Distinct keys categorized as literals.
    pub literal_symbols: usize,
    /// Total occurrences rewritten across all keys.
    pub occurrences_rewritten: usize,
    /// Size of the original buffer in bytes.
    pub input_bytes: usize,
    /// Size of the output artifact (definitions + rewritten source) in bytes.
    pub output_bytes: usize,
    /// Output size relative to the input, as a percentage delta.
    pub size_increase_percentage: f64,
    /// Seed the alias generator ran with, if one was fixed.
    pub seed: Option<u64>,
}

/// Collects a report from the populated symbol tables and artifact sizes.
///
/// # Arguments
/// * `symbols` - The tables after the Emit phase.
/// * `input_bytes` - Length of the original buffer.
/// * `output_bytes` - Length of the written artifact.
/// * `seed` - The fixed seed, when one was supplied.
pub fn collect_report(
    symbols: &SymbolTable,
    input_bytes: usize,
    output_bytes: usize,
    seed: Option<u64>,
) -> ObfuscationReport {
    let identifier_symbols = symbols
        .entries()
        .filter(|(_, entry)| entry.category == SymbolCategory::Identifier)
        .count();
    let literal_symbols = symbols.symbol_count() - identifier_symbols;

    let size_increase_percentage = if input_bytes > 0 {
        (output_bytes as f64 - input_bytes as f64) / input_bytes as f64 * 100.0
    } else {
        0.0
    };

    ObfuscationReport {
        distinct_symbols: symbols.symbol_count(),
        identifier_symbols,
        literal_symbols,
        occurrences_rewritten: symbols.occurrence_count(),
        input_bytes,
        output_bytes,
        size_increase_percentage,
        seed,
    }
}
