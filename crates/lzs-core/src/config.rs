//! Construction-time configuration.
//!
//! `Config` is a single struct enumerating every tunable knob up front.
//! Override seams (`cache.impl`, `key_generator`, `trie.impl`) are plain
//! enums with a `BuiltIn` and a `Custom(Box<dyn Trait>)` variant — a
//! runtime choice made once at construction, not a hot-path dispatch
//! decision. No environment variable or file is ever read here: this
//! crate's config is a plain data type, constructed and validated
//! entirely in-process by the caller.

use crate::error::ConfigError;
use crate::frequency_memory::Memory;
use crate::mdl_gate::MAX_Z_TABLE;
use crate::monitor::{Monitor, NoopMonitor};
use crate::rolling_hash::RollingHash;
use crate::trie::Trie;

/// Source of the branching factor `Z` used by the MDL gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZMode {
    /// Use the trie's observed out-degree at the candidate's parent node.
    ChildDegree,
    /// Use a fixed configured branching factor for every check.
    Fixed,
}

impl Default for ZMode {
    fn default() -> Self {
        Self::ChildDegree
    }
}

/// MDL gate parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MdlConfig {
    pub alpha: f64,
    pub z_mode: ZMode,
    pub z_fixed: u32,
    pub beta: f64,
    pub c: f64,
    pub tau: f64,
}

impl Default for MdlConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            z_mode: ZMode::ChildDegree,
            z_fixed: 256,
            beta: 0.02,
            c: 0.7,
            tau: 0.8,
        }
    }
}

impl MdlConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(ConfigError::InvalidBeta(self.beta));
        }
        if self.z_fixed < 1 || self.z_fixed as usize > MAX_Z_TABLE {
            return Err(ConfigError::InvalidZFixed(self.z_fixed));
        }
        if !(self.c >= 0.0) {
            return Err(ConfigError::InvalidC(self.c));
        }
        if !(self.tau >= 0.0) {
            return Err(ConfigError::InvalidTau(self.tau));
        }
        Ok(())
    }
}

/// Caller-supplied override for the Frequency Memory, or the built-in
/// LRU implementation.
pub enum CacheOverride {
    BuiltIn,
    Custom(Box<dyn Memory>),
}

impl Default for CacheOverride {
    fn default() -> Self {
        Self::BuiltIn
    }
}

/// Caller-supplied override for the rolling hash, or the built-in
/// polynomial hash.
pub enum KeyGeneratorOverride {
    BuiltIn,
    Custom(Box<dyn RollingHash>),
}

impl Default for KeyGeneratorOverride {
    fn default() -> Self {
        Self::BuiltIn
    }
}

/// Caller-supplied override for the trie, or the built-in byte trie.
/// `trie_enabled = false` takes priority over this and installs the
/// no-op trie regardless of what is set here.
pub enum TrieOverride {
    BuiltIn,
    Custom(Box<dyn Trie>),
}

impl Default for TrieOverride {
    fn default() -> Self {
        Self::BuiltIn
    }
}

/// Constructor configuration for [`crate::tokenizer::TokenizerCore`].
///
/// Fields that accept a caller-supplied override are plain enums rather than
/// `Option<Box<dyn Trait>>` so that "use the built-in" is the explicit,
/// named default variant rather than an `Option::None` a reader has to
/// cross-reference against documentation.
pub struct Config {
    /// Max entries in Frequency Memory. Default 10,000.
    pub cache_size: usize,
    /// Overrides the built-in Frequency Memory.
    pub cache_impl: CacheOverride,
    /// Overrides the built-in rolling hash.
    pub key_generator: KeyGeneratorOverride,
    /// Frequency-gate cut-off. Default 1 (hot path trusts at
    /// `strength >= trust_threshold + 1`, i.e. `>= 2` by default — see
    /// `DESIGN.md` for why `+ 1` rather than the literal spec text).
    pub trust_threshold: u32,
    /// If false, installs the no-op trie; gate 3 then never admits.
    pub trie_enabled: bool,
    /// Overrides the built-in byte trie. Ignored if `trie_enabled` is
    /// false.
    pub trie_impl: TrieOverride,
    pub mdl: MdlConfig,
    /// External counter sink. Defaults to a no-op monitor.
    pub monitor: Box<dyn Monitor>,
    /// Number of distinct symbol values the tokenizer accepts. Default
    /// 256 (every `u8` value). `process` rejects any symbol `>= this`
    /// with `SymbolError` instead of admitting it.
    pub alphabet_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: 10_000,
            cache_impl: CacheOverride::default(),
            key_generator: KeyGeneratorOverride::default(),
            trust_threshold: 1,
            trie_enabled: true,
            trie_impl: TrieOverride::default(),
            mdl: MdlConfig::default(),
            monitor: Box::new(NoopMonitor),
            alphabet_size: 256,
        }
    }
}

impl Config {
    /// Validate every field, returning the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_size == 0 {
            return Err(ConfigError::InvalidCacheSize(self.cache_size));
        }
        if self.trust_threshold < 1 {
            return Err(ConfigError::InvalidTrustThreshold(self.trust_threshold));
        }
        if self.alphabet_size < 1 || self.alphabet_size > 256 {
            return Err(ConfigError::InvalidAlphabetSize(self.alphabet_size));
        }
        self.mdl.validate()
    }
}
