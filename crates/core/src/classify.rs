//! Classification of token occurrences into canonical symbol keys.
//!
//! Two occurrences with equal keys are treated as the same symbol regardless
//! of their actual scope, type, or declaration identity. Keying is purely
//! textual; this is a deliberate simplification of the engine, not a
//! scoping-aware rename.

use crate::token::{TokenKind, TokenOccurrence};

/// Library-provided identifiers that are eligible even when their occurrence
/// is attributed to included text. Configuration constant, not derived.
pub const PREDEFINED_IDENTIFIERS: &[&str] = &["cout", "cin", "cerr", "clog"];

const OPERATOR_PREFIX: &str = "operator";

/// Category a classified occurrence falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolCategory {
    /// Variable, function, or operator name.
    Identifier,
    /// Integer or string literal value.
    Literal,
}

/// A canonical symbol key plus its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Canonical key the occurrence files under.
    pub key: String,
    /// Whether the key names an identifier or a literal.
    pub category: SymbolCategory,
}

/// Maps a token occurrence to its canonical key, or `None` when the
/// occurrence is ineligible for aliasing.
///
/// Eligibility requires a primary-file span, except that references whose
/// verbatim name is on [`PREDEFINED_IDENTIFIERS`] are always eligible.
/// Classification is deterministic: equal occurrences always produce equal
/// keys.
pub fn classify(occurrence: &TokenOccurrence) -> Option<Classified> {
    match occurrence.kind {
        TokenKind::Declaration => {
            if !occurrence.primary {
                return None;
            }
            Some(Classified {
                key: occurrence.lexeme.clone(),
                category: SymbolCategory::Identifier,
            })
        }
        TokenKind::Reference => {
            // The allow-list is consulted with the verbatim name, before any
            // operator-prefix stripping.
            if !occurrence.primary && !is_predefined(&occurrence.lexeme) {
                return None;
            }
            // References to `operatorX` file under the bare `X`. Declarations
            // keep the verbatim name, so a declaration and its references land
            // in different keys. Specified behavior; do not "fix".
            let key = occurrence
                .lexeme
                .strip_prefix(OPERATOR_PREFIX)
                .unwrap_or(&occurrence.lexeme)
                .to_string();
            Some(Classified {
                key,
                category: SymbolCategory::Identifier,
            })
        }
        TokenKind::Integer => {
            if !occurrence.primary {
                return None;
            }
            Some(Classified {
                key: decimal_value(&occurrence.lexeme),
                category: SymbolCategory::Literal,
            })
        }
        TokenKind::Str => {
            if !occurrence.primary {
                return None;
            }
            Some(Classified {
                key: format!("\"{}\"", occurrence.lexeme),
                category: SymbolCategory::Literal,
            })
        }
    }
}

fn is_predefined(name: &str) -> bool {
    PREDEFINED_IDENTIFIERS.contains(&name)
}

/// Normalizes an integer literal to its unsigned decimal magnitude: radix
/// prefixes are resolved, digit separators and suffixes dropped.
///
/// A literal the locator let through but that still fails to parse keeps its
/// digit text verbatim rather than aborting the run.
fn decimal_value(lexeme: &str) -> String {
    let cleaned: String = lexeme.chars().filter(|&c| c != '\'').collect();
    let trimmed = cleaned.trim_end_matches(['u', 'U', 'l', 'L', 'z', 'Z']);

    let (radix, digits) = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
        (2, bin)
    } else if trimmed.len() > 1 && trimmed.starts_with('0') {
        (8, &trimmed[1..])
    } else {
        (10, trimmed)
    };

    u128::from_str_radix(digits, radix)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| digits.to_string())
}
