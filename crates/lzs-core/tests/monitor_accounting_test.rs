//! Integration test: monitor accounting
//!
//! Confirms the counters `TokenizerCore::process` reports through a
//! caller-supplied `Monitor` are internally consistent: every gate check
//! is followed by exactly one pass-or-fail, emitted bytes equal `BytesOut`,
//! and `BytesIn` equals the number of symbols fed in regardless of how
//! many tokens that produced.
//!
//! Run: cargo test -p lzs-core --test monitor_accounting_test

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lzs_core::{Config, Counter, Monitor, TokenizerCore};

#[derive(Default)]
struct SharedCounts(RefCell<HashMap<Counter, f64>>);

impl SharedCounts {
    fn total(&self, counter: Counter) -> f64 {
        self.0.borrow().get(&counter).copied().unwrap_or(0.0)
    }
}

struct SharedMonitor(Rc<SharedCounts>);

impl Monitor for SharedMonitor {
    fn record(&self, counter: Counter, amount: f64) {
        *self.0 .0.borrow_mut().entry(counter).or_insert(0.0) += amount;
    }
}

fn tokenizer_with_shared_monitor(cache_size: usize) -> (TokenizerCore, Rc<SharedCounts>) {
    let counts = Rc::new(SharedCounts::default());
    let cfg = Config {
        cache_size,
        monitor: Box::new(SharedMonitor(counts.clone())),
        ..Config::default()
    };
    (TokenizerCore::new(cfg).unwrap(), counts)
}

#[test]
fn bytes_in_equals_total_symbols_fed() {
    let (mut t, counts) = tokenizer_with_shared_monitor(256);
    let input = b"mississippi mississippi mississippi";
    for &b in input {
        t.process(b).unwrap();
    }
    assert_eq!(counts.total(Counter::BytesIn), input.len() as f64);
}

#[test]
fn every_gate_check_has_a_matching_pass_or_fail() {
    let (mut t, counts) = tokenizer_with_shared_monitor(256);
    for &b in b"abcabcabcabcabcxyzxyzxyz" {
        t.process(b).unwrap();
    }
    assert_eq!(
        counts.total(Counter::MdlGateChecked),
        counts.total(Counter::MdlGatePassed) + counts.total(Counter::MdlGateFailed)
    );
    assert_eq!(
        counts.total(Counter::CacheGateChecked),
        counts.total(Counter::CacheGatePassed) + counts.total(Counter::CacheGateFailed)
    );
    assert_eq!(
        counts.total(Counter::TrieGateChecked),
        counts.total(Counter::TrieGatePassed) + counts.total(Counter::TrieGateFailed)
    );
}

#[test]
fn cache_gate_is_only_checked_when_mdl_gate_failed() {
    let (mut t, counts) = tokenizer_with_shared_monitor(256);
    for &b in b"abcabcabcabcxyzxyzxyzxyz" {
        t.process(b).unwrap();
    }
    assert_eq!(
        counts.total(Counter::MdlGateFailed),
        counts.total(Counter::CacheGateChecked)
    );
}

#[test]
fn trie_gate_is_only_checked_when_cache_gate_also_failed() {
    let (mut t, counts) = tokenizer_with_shared_monitor(256);
    for &b in b"abcabcabcabcxyzxyzxyzxyz" {
        t.process(b).unwrap();
    }
    assert_eq!(
        counts.total(Counter::CacheGateFailed),
        counts.total(Counter::TrieGateChecked)
    );
}

#[test]
fn bytes_out_equals_sum_of_emitted_token_lengths() {
    let (mut t, counts) = tokenizer_with_shared_monitor(256);
    let mut emitted_len = 0usize;
    for &b in b"the quick brown fox the quick brown fox the quick brown fox" {
        if let Some(tok) = t.process(b).unwrap() {
            emitted_len += tok.len();
        }
    }
    assert_eq!(counts.total(Counter::BytesOut), emitted_len as f64);
}

#[test]
fn tokens_emitted_counter_matches_number_of_some_results() {
    let (mut t, counts) = tokenizer_with_shared_monitor(256);
    let mut emitted = 0u32;
    for &b in b"the quick brown fox the quick brown fox the quick brown fox" {
        if t.process(b).unwrap().is_some() {
            emitted += 1;
        }
    }
    assert_eq!(counts.total(Counter::TokensEmitted), emitted as f64);
}
