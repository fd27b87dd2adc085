//! Macro-expansion round trips: substituting every alias with its
//! definition's right-hand side must reproduce the original buffer.

use macroveil_core::pipeline::{obfuscate_source, ObfuscationConfig};

const FIXTURE: &str = concat!(
    "int total = 0;\n",
    "\n",
    "int add(int lhs, int rhs) {\n",
    "    return lhs + rhs;\n",
    "}\n",
    "\n",
    "int main() {\n",
    "    int count = 10;\n",
    "    total = add(count, 5);\n",
    "    std::cout << \"total: \" << total;\n",
    "    return 0;\n",
    "}\n",
);

fn obfuscate(source: &str, seed: u64) -> macroveil_core::pipeline::Obfuscation {
    let tokens = macroveil_locator::scan(source).expect("scan failed");
    obfuscate_source(source, tokens, &ObfuscationConfig { seed: Some(seed) })
        .expect("obfuscation failed")
}

/// Splits the artifact into its definition lines and the rewritten source,
/// then textually expands every alias, as the preprocessor would.
fn expand(artifact: &str) -> String {
    let mut definitions = Vec::new();
    let mut rest = artifact;
    while let Some(line) = rest.strip_prefix("#define ") {
        let end = line.find('\n').expect("unterminated definition line");
        let (alias, original) = line[..end]
            .split_once(' ')
            .expect("malformed definition line");
        definitions.push((alias.to_string(), original.to_string()));
        rest = &line[end + 1..];
    }
    let mut body = rest.to_string();
    for (alias, original) in &definitions {
        body = body.replace(alias.as_str(), original);
    }
    body
}

#[test]
fn expansion_reproduces_the_original_unit() {
    let result = obfuscate(FIXTURE, 42);
    assert_eq!(expand(&result.output), FIXTURE);
}

#[test]
fn rewritten_body_keeps_structure_but_hides_names() {
    let result = obfuscate(FIXTURE, 42);
    let body = {
        let defs_end = result.output.rfind("#define ").expect("no definitions");
        let line_end = result.output[defs_end..]
            .find('\n')
            .expect("unterminated definition line");
        &result.output[defs_end + line_end + 1..]
    };

    // Keywords, operators and punctuation survive verbatim.
    assert!(body.contains("int "));
    assert!(body.contains("return"));
    assert!(body.contains("<<"));
    assert!(body.contains("std::"));
    // The nameable tokens do not.
    assert!(!body.contains("total"));
    assert!(!body.contains("count"));
    assert!(!body.contains("add("));
    assert!(!body.contains("\"total: \""));
}

#[test]
fn definition_count_matches_distinct_symbols() {
    let result = obfuscate(FIXTURE, 42);
    assert_eq!(
        result.output.matches("#define ").count(),
        result.symbols.symbol_count()
    );
}

#[test]
fn seeded_runs_produce_identical_artifacts() {
    let first = obfuscate(FIXTURE, 1234);
    let second = obfuscate(FIXTURE, 1234);
    assert_eq!(first.output, second.output);
}

#[test]
fn different_seeds_produce_different_aliases() {
    let first = obfuscate(FIXTURE, 1);
    let second = obfuscate(FIXTURE, 2);
    assert_ne!(first.output, second.output);
    // Both still expand back to the same unit.
    assert_eq!(expand(&first.output), expand(&second.output));
}

#[test]
fn included_text_round_trips_untouched() {
    let source = concat!(
        "# 1 \"unit.cpp\"\n",
        "int shown = 1;\n",
        "# 1 \"lib.h\"\n",
        "int hidden = 2;\n",
        "# 3 \"unit.cpp\"\n",
        "int back = shown;\n",
    );
    let result = obfuscate(source, 42);

    // Tokens attributed to lib.h are ineligible and keep their names.
    assert!(result.output.contains("int hidden = 2;"));
    assert!(result.symbols.alias_of("hidden").is_none());
    assert!(result.symbols.alias_of("2").is_none());
    assert!(result.symbols.alias_of("shown").is_some());

    assert_eq!(expand(&result.output), source);
}

#[test]
fn operator_call_sites_expand_back() {
    let source = "Vec r = operator+(a, b);\n";
    let result = obfuscate(source, 42);

    // Only the symbol bytes are rewritten; the keyword text stays put, so
    // expansion restores the exact call.
    let plus_alias = result.symbols.alias_of("+").expect("+ not recorded");
    assert!(result
        .output
        .contains(&format!("operator{plus_alias}(")));
    assert_eq!(expand(&result.output), source);
}
