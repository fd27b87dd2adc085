//! Pseudorandom alias generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of every generated alias.
pub const ALIAS_LEN: usize = 8;

/// Produces fixed-shape pseudorandom alias strings: a Latin letter followed by
/// seven alphanumerics.
///
/// No uniqueness check is made against previously generated aliases or against
/// identifiers already present in the source; collisions are an accepted
/// limitation. The generator owns its RNG so a fixed seed reproduces the whole
/// alias sequence.
#[derive(Debug)]
pub struct AliasGenerator {
    rng: StdRng,
}

impl AliasGenerator {
    /// Creates a generator with a fixed seed for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Returns a fresh alias.
    pub fn next_alias(&mut self) -> String {
        let mut alias = String::with_capacity(ALIAS_LEN);
        alias.push(LETTERS[self.rng.random_range(0..LETTERS.len())] as char);
        for _ in 1..ALIAS_LEN {
            alias.push(ALPHANUMERIC[self.rng.random_range(0..ALPHANUMERIC.len())] as char);
        }
        alias
    }
}
