//! The per-symbol tokenizer state machine.
//!
//! Owns the candidate buffer and drives the rolling hash, frequency
//! memory, trie, and MDL gate on every symbol. A value type whose
//! sub-components are embedded by value or boxed trait object, exposing
//! exactly `process`/`flush`/`clear`/`set_trust_threshold`.

use crate::config::{CacheOverride, Config, KeyGeneratorOverride, TrieOverride};
use crate::error::{ConfigError, SymbolError};
use crate::frequency_memory::{LruFrequencyMemory, Memory};
use crate::mdl_gate::MdlGate;
use crate::monitor::{Counter, Monitor};
use crate::rolling_hash::{DefaultRollingHash, RollingHash};
use crate::trie::{ByteTrie, NoopTrie, Trie};

/// Diagnostic snapshot of internal structural state, exposed as the
/// `stats` read-only property. Deliberately does not compute rates or
/// averages — that remains the external monitor's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerStats {
    pub candidate_len: usize,
    pub memory_size: usize,
    pub has_prev_key: bool,
}

/// The result of [`TokenizerCore::flush`]: a pure read of current state.
#[derive(Debug, Clone)]
pub struct FlushResult {
    pub memory_size: usize,
    pub memory_snapshot: Vec<(u32, u32)>,
    pub current: Option<Vec<u8>>,
}

/// The tokenizer core.
pub struct TokenizerCore {
    hash: Box<dyn RollingHash>,
    memory: Box<dyn Memory>,
    trie: Box<dyn Trie>,
    mdl: MdlGate,
    monitor: Box<dyn Monitor>,
    trust_threshold: u32,
    alphabet_size: u32,
    buffer: Vec<u8>,
    prev_key: Option<u32>,
}

impl TokenizerCore {
    /// Construct from validated configuration. Returns
    /// `Err(ConfigError)` without constructing anything if a field is
    /// out of range.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let Config {
            cache_size,
            cache_impl,
            key_generator,
            trust_threshold,
            trie_enabled,
            trie_impl,
            mdl,
            monitor,
            alphabet_size,
        } = config;

        let memory: Box<dyn Memory> = match cache_impl {
            CacheOverride::BuiltIn => Box::new(LruFrequencyMemory::new(cache_size)),
            CacheOverride::Custom(m) => m,
        };
        let hash: Box<dyn RollingHash> = match key_generator {
            KeyGeneratorOverride::BuiltIn => Box::new(DefaultRollingHash::new()),
            KeyGeneratorOverride::Custom(h) => h,
        };
        let trie: Box<dyn Trie> = if !trie_enabled {
            Box::new(NoopTrie)
        } else {
            match trie_impl {
                TrieOverride::BuiltIn => Box::new(ByteTrie::new()),
                TrieOverride::Custom(t) => t,
            }
        };

        Ok(Self {
            hash,
            memory,
            trie,
            mdl: MdlGate::new(&mdl),
            monitor,
            trust_threshold: trust_threshold.max(1),
            alphabet_size,
            buffer: Vec::new(),
            prev_key: None,
        })
    }

    /// Clamp `n` to `>= 1`, store it, and return the clamped value.
    pub fn set_trust_threshold(&mut self, n: u32) -> u32 {
        self.trust_threshold = n.max(1);
        self.trust_threshold
    }

    /// Current fingerprint of the candidate buffer (the `key_generator`
    /// read-only property).
    #[must_use]
    pub fn key_generator_value(&self) -> u32 {
        self.hash.value()
    }

    /// Diagnostic structural snapshot (the `stats` read-only property).
    #[must_use]
    pub fn stats(&self) -> TokenizerStats {
        TokenizerStats {
            candidate_len: self.buffer.len(),
            memory_size: self.memory.size(),
            has_prev_key: self.prev_key.is_some(),
        }
    }

    /// Consume one symbol. Returns `Ok(Some(token))` on emission,
    /// `Ok(None)` otherwise, or `Err(SymbolError)` if `symbol as u32 >=
    /// Config::alphabet_size` (unreachable with the default alphabet
    /// size of 256, since no `u8` value reaches that).
    pub fn process(&mut self, symbol: u8) -> Result<Option<Vec<u8>>, SymbolError> {
        if symbol as u32 >= self.alphabet_size {
            return Err(SymbolError {
                symbol: symbol as u32,
                alphabet_size: self.alphabet_size,
            });
        }

        self.monitor.record(Counter::BytesIn, 1.0);

        let cand_key = self.hash.update(symbol);
        let strength = self.memory.get(cand_key).unwrap_or(0);

        if self.buffer.is_empty() {
            self.buffer.push(symbol);
            self.memory.set(cand_key, strength + 1);
            self.trie.cursor_init_first(symbol);
            self.prev_key = Some(cand_key);
            self.monitor.record(Counter::CandidatesStarted, 1.0);
            return Ok(None);
        }

        self.buffer.push(symbol);
        self.trie.cursor_advance(symbol, false);
        self.memory.set(cand_key, strength + 1);

        // Gate 1: MDL.
        let count_prev = self
            .prev_key
            .map(|k| self.memory.get(k).unwrap_or(0))
            .unwrap_or(0);
        let child_degree_at_parent = self.trie.child_degree_at_parent();

        self.monitor.record(Counter::MdlGateChecked, 1.0);
        let mdl_admit = self.mdl.check(count_prev, strength + 1, child_degree_at_parent);
        self.monitor
            .record(Counter::MdlSumSurprisal, -self.mdl.last_p().ln());
        self.monitor
            .record(Counter::MdlSumBaselineMean, self.mdl.mean());
        self.monitor
            .record(Counter::MdlSumBaselineStd, self.mdl.variance().sqrt());
        if mdl_admit {
            self.monitor.record(Counter::MdlGatePassed, 1.0);
            self.prev_key = Some(cand_key);
            return Ok(None);
        }
        self.monitor.record(Counter::MdlGateFailed, 1.0);

        // Gate 2: frequency trust. Uses the pre-increment `strength`
        // (how many times this fingerprint had already been observed
        // before this occurrence) against `trust_threshold + 1`, so
        // `set_trust_threshold` stays load-bearing rather than dead
        // configuration (see DESIGN.md).
        self.monitor.record(Counter::CacheGateChecked, 1.0);
        if strength >= self.trust_threshold + 1 {
            self.monitor.record(Counter::CacheGatePassed, 1.0);
            self.prev_key = Some(cand_key);
            return Ok(None);
        }
        self.monitor.record(Counter::CacheGateFailed, 1.0);

        // Gate 3: trie prefix.
        self.monitor.record(Counter::TrieGateChecked, 1.0);
        if self.trie.cursor_valid() {
            self.monitor.record(Counter::TrieGatePassed, 1.0);
            self.prev_key = Some(cand_key);
            return Ok(None);
        }
        self.monitor.record(Counter::TrieGateFailed, 1.0);

        // Emission: every gate failed.
        self.monitor
            .record(Counter::EmissionSumChildDegree, child_degree_at_parent as f64);
        if child_degree_at_parent > 1 {
            self.monitor.record(Counter::EmissionHadLongerOptions, 1.0);
        }

        let last = *self
            .buffer
            .last()
            .expect("buffer is non-empty on the emission path");
        let prev: Vec<u8> = self.buffer[..self.buffer.len() - 1].to_vec();

        self.buffer.clear();
        self.buffer.push(last);
        self.hash.recalculate(&self.buffer);
        self.trie.insert_previous_or_mark(&prev, 1);
        self.trie.reset_to_single(last);
        self.prev_key = None;

        let emitted = if prev.is_empty() { vec![last] } else { prev };
        self.monitor.record(Counter::TokensEmitted, 1.0);
        self.monitor
            .record(Counter::BytesOut, emitted.len() as f64);
        Ok(Some(emitted))
    }

    /// Pure read of the current candidate and Frequency Memory. Does not
    /// mutate state; two consecutive calls with no intervening `process`
    /// return equal results.
    #[must_use]
    pub fn flush(&self) -> FlushResult {
        FlushResult {
            memory_size: self.memory.size(),
            memory_snapshot: self.memory.snapshot(),
            current: if self.buffer.is_empty() {
                None
            } else {
                Some(self.buffer.clone())
            },
        }
    }

    /// Restore the constructed state: empty candidate, empty memory,
    /// hash reset to seed, trie cursor reset, MDL state cleared.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.memory.clear();
        self.hash.reset();
        self.trie.cursor_reset();
        self.mdl.clear();
        self.prev_key = None;
    }
}
