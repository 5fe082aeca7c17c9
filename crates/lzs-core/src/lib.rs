//! # lzs-core
//!
//! Online greedy longest-known-prefix tokenizer over byte streams.
//!
//! Feed bytes one at a time to [`tokenizer::TokenizerCore::process`]; it
//! emits a token (a contiguous run of the input) whenever the current
//! candidate stops being worth extending, judged by three independent
//! admission gates run in a fixed order: an adaptive statistical (MDL)
//! gate, a frequency-trust gate backed by a bounded LRU memory, and a
//! trie-prefix gate. [`tokenizer::TokenizerCore::flush`] returns whatever
//! candidate bytes have not yet been emitted, without consuming them.
//!
//! No `unsafe` is permitted anywhere in this crate.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod frequency_memory;
pub mod mdl_gate;
pub mod monitor;
pub mod rolling_hash;
pub mod tokenizer;
pub mod trie;

pub use config::{CacheOverride, Config, KeyGeneratorOverride, MdlConfig, TrieOverride, ZMode};
pub use error::{ConfigError, SymbolError};
pub use frequency_memory::{LruFrequencyMemory, Memory};
pub use mdl_gate::MdlGate;
pub use monitor::{Counter, Monitor, NoopMonitor};
pub use rolling_hash::{DefaultRollingHash, RollingHash};
pub use tokenizer::{FlushResult, TokenizerCore, TokenizerStats};
pub use trie::{ByteTrie, NoopTrie, Trie};
