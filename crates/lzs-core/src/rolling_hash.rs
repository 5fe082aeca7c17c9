//! 32-bit incremental rolling hash over a symbol sequence.
//!
//! A plain polynomial hash: `h <- h.wrapping_mul(POLY).wrapping_add(b)`,
//! starting from a seed. `recalculate` is defined as `reset` followed by
//! folding every symbol of a buffer through `update`, so it is always
//! exactly equal to replaying `update` from a fresh instance — the
//! associativity a rolling hash needs falls out of the definition rather
//! than needing to be proven separately.
//!
//! Collisions are expected and tolerated: the frequency memory is
//! advisory, so correctness never depends on fingerprint injectivity.

/// Default seed. A published constant so two independently constructed
/// hashers reproduce the same fingerprints for the same candidate.
pub const DEFAULT_SEED: u32 = 0;

/// Multiplier for the polynomial hash (FNV-1a's 32-bit prime; chosen for
/// good avalanche behavior on byte input, not for any cryptographic
/// property — this is an advisory fingerprint, not a MAC).
pub const DEFAULT_POLY: u32 = 0x0100_0193;

/// Contract every rolling-hash implementation (built-in or caller-supplied
/// via `Config::key_generator`) must satisfy.
pub trait RollingHash {
    /// Current fingerprint of the sequence folded in so far.
    fn value(&self) -> u32;

    /// Append `b`, update internal state, and return the new fingerprint.
    fn update(&mut self, b: u8) -> u32;

    /// Restore the seed value.
    fn reset(&mut self);

    /// Reset then fold every symbol of `buffer` in order. Returns the
    /// final fingerprint, equal to `value()` after folding.
    fn recalculate(&mut self, buffer: &[u8]) -> u32 {
        self.reset();
        let mut last = self.value();
        for &b in buffer {
            last = self.update(b);
        }
        last
    }
}

/// The default polynomial rolling hash.
#[derive(Debug, Clone, Copy)]
pub struct DefaultRollingHash {
    seed: u32,
    poly: u32,
    state: u32,
}

impl DefaultRollingHash {
    /// Construct with the published default seed and multiplier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed_and_poly(DEFAULT_SEED, DEFAULT_POLY)
    }

    /// Construct with an explicit seed and multiplier. The pair is part of
    /// the configuration identity: two instances must agree on both to
    /// reproduce each other's fingerprints.
    #[must_use]
    pub fn with_seed_and_poly(seed: u32, poly: u32) -> Self {
        Self {
            seed,
            poly,
            state: seed,
        }
    }
}

impl Default for DefaultRollingHash {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingHash for DefaultRollingHash {
    fn value(&self) -> u32 {
        self.state
    }

    fn update(&mut self, b: u8) -> u32 {
        self.state = self.state.wrapping_mul(self.poly).wrapping_add(b as u32);
        self.state
    }

    fn reset(&mut self) {
        self.state = self.seed;
    }
}
