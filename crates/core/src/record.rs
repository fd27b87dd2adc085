//! Alias and occurrence tables for one translation unit.

use crate::alias::AliasGenerator;
use crate::classify::{Classified, SymbolCategory};
use crate::token::SourceSpan;
use indexmap::IndexMap;
use tracing::debug;

/// The alias assigned to a symbol key. Created exactly once, the first time a
/// key is observed, and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// The replacement name substituted at every occurrence of the key.
    pub alias: String,
    /// Category of the key (identifier or literal).
    pub category: SymbolCategory,
}

/// Owned alias table and occurrence set, passed by reference through the
/// pipeline.
///
/// Both maps preserve insertion order, so iteration follows traversal order of
/// the translation unit (first-seen-wins for aliases, span order per key).
/// The tables grow monotonically during the Collect phase and are read-only
/// during Emit.
#[derive(Debug)]
pub struct SymbolTable {
    aliases: IndexMap<String, AliasEntry>,
    occurrences: IndexMap<String, Vec<SourceSpan>>,
    generator: AliasGenerator,
}

impl SymbolTable {
    /// Creates an empty table drawing aliases from `generator`.
    pub fn new(generator: AliasGenerator) -> Self {
        Self {
            aliases: IndexMap::new(),
            occurrences: IndexMap::new(),
            generator,
        }
    }

    /// Records one occurrence of a classified token: allocates an alias if the
    /// key is new, then appends the span to the key's occurrence list.
    pub fn record(&mut self, classified: Classified, span: SourceSpan) {
        if !self.aliases.contains_key(&classified.key) {
            let alias = self.generator.next_alias();
            debug!(key = %classified.key, %alias, "new symbol");
            self.aliases.insert(
                classified.key.clone(),
                AliasEntry {
                    alias,
                    category: classified.category,
                },
            );
        }
        self.occurrences
            .entry(classified.key)
            .or_default()
            .push(span);
    }

    /// The alias assigned to `key`, if the key has been recorded.
    pub fn alias_of(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(|entry| entry.alias.as_str())
    }

    /// Iterates alias entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &AliasEntry)> {
        self.aliases.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Iterates recorded spans per key, in first-seen key order.
    pub fn occurrences(&self) -> impl Iterator<Item = (&str, &[SourceSpan])> {
        self.occurrences
            .iter()
            .map(|(key, spans)| (key.as_str(), spans.as_slice()))
    }

    /// Number of distinct symbol keys.
    pub fn symbol_count(&self) -> usize {
        self.aliases.len()
    }

    /// Total number of recorded occurrences across all keys.
    pub fn occurrence_count(&self) -> usize {
        self.occurrences.values().map(Vec::len).sum()
    }

    /// True when no occurrence has been recorded.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
