//! Error taxonomy for configuration and alphabet violations.
//!
//! Both error kinds are total and synchronous: a `ConfigError` is only
//! possible at construction time, a `SymbolError` is only possible from
//! [`crate::tokenizer::TokenizerCore::process`]. Neither ever leaves the
//! tokenizer's internal state mutated.

use thiserror::Error;

/// Raised from [`crate::config::Config::validate`] / `TokenizerCore::new`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cache.size must be positive, got {0}")]
    InvalidCacheSize(usize),
    #[error("mdl.alpha must be > 0, got {0}")]
    InvalidAlpha(f64),
    #[error("mdl.beta must be in (0, 1], got {0}")]
    InvalidBeta(f64),
    #[error("mdl.z_fixed must be in 1..=512, got {0}")]
    InvalidZFixed(u32),
    #[error("mdl.c must be >= 0, got {0}")]
    InvalidC(f64),
    #[error("mdl.tau must be >= 0, got {0}")]
    InvalidTau(f64),
    #[error("trust_threshold must be >= 1, got {0}")]
    InvalidTrustThreshold(u32),
    #[error("alphabet_size must be in 1..=256 for a byte-backed tokenizer, got {0}")]
    InvalidAlphabetSize(u32),
}

/// Raised from [`crate::tokenizer::TokenizerCore::process`] when a
/// symbol's numeric value is `>= Config::alphabet_size`. With the
/// default `alphabet_size` of 256 this can never fire for `Symbol =
/// u8`, since no byte reaches 256; it becomes reachable the moment a
/// caller configures a smaller alphabet.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("symbol {symbol} is outside the configured alphabet of size {alphabet_size}")]
pub struct SymbolError {
    pub symbol: u32,
    pub alphabet_size: u32,
}
