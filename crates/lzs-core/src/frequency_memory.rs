//! Bounded associative memory from fingerprint to observation count, with
//! strict LRU eviction.
//!
//! Built as an intrusive doubly-linked list threaded through a dense
//! `Vec<Slot>`, with a `HashMap<u32, usize>` from fingerprint to slot
//! index — a slot vector plus a free list of reusable indices, rather
//! than reaching for an external LRU crate. Both `get` and `set` count
//! as an access and move the touched slot to the most-recently-used end.

use std::collections::HashMap;

/// Contract every frequency-memory implementation (built-in or
/// caller-supplied via `Config::cache_impl`) must satisfy.
pub trait Memory {
    /// Current count for `fingerprint`, or `None` if absent. Touches
    /// recency.
    fn get(&mut self, fingerprint: u32) -> Option<u32>;

    /// Insert or overwrite the count for `fingerprint`. Touches recency;
    /// the written entry becomes most-recently-used. May evict the
    /// least-recently-used entry if capacity would otherwise be
    /// exceeded.
    fn set(&mut self, fingerprint: u32, count: u32);

    /// Remove every entry.
    fn clear(&mut self);

    /// Number of entries currently stored.
    fn size(&self) -> usize;

    /// Snapshot of every `(fingerprint, count)` pair currently stored, in
    /// no particular order.
    fn snapshot(&self) -> Vec<(u32, u32)>;
}

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Slot {
    fingerprint: u32,
    count: u32,
    prev: usize,
    next: usize,
}

/// The default bounded, strictly-LRU frequency memory.
#[derive(Debug)]
pub struct LruFrequencyMemory {
    capacity: usize,
    slots: Vec<Slot>,
    free: Vec<usize>,
    index: HashMap<u32, usize>,
    /// Most-recently-used slot index, or `NIL` if empty.
    head: usize,
    /// Least-recently-used slot index, or `NIL` if empty.
    tail: usize,
}

impl LruFrequencyMemory {
    /// Construct with a positive capacity. Callers validate `capacity >
    /// 0` at the configuration boundary (`ConfigError::InvalidCacheSize`);
    /// this constructor trusts that invariant.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: NIL,
            tail: NIL,
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let s = &self.slots[idx];
            (s.prev, s.next)
        };
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
    }

    fn push_front(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn touch(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn evict_lru(&mut self) {
        let victim = self.tail;
        if victim == NIL {
            return;
        }
        self.unlink(victim);
        let fp = self.slots[victim].fingerprint;
        self.index.remove(&fp);
        self.free.push(victim);
    }
}

impl Memory for LruFrequencyMemory {
    fn get(&mut self, fingerprint: u32) -> Option<u32> {
        let idx = *self.index.get(&fingerprint)?;
        self.touch(idx);
        Some(self.slots[idx].count)
    }

    fn set(&mut self, fingerprint: u32, count: u32) {
        if let Some(&idx) = self.index.get(&fingerprint) {
            self.slots[idx].count = count;
            self.touch(idx);
            return;
        }

        let idx = if let Some(idx) = self.free.pop() {
            self.slots[idx] = Slot {
                fingerprint,
                count,
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                fingerprint,
                count,
                prev: NIL,
                next: NIL,
            });
            idx
        };
        self.index.insert(fingerprint, idx);
        self.push_front(idx);

        if self.index.len() > self.capacity {
            self.evict_lru();
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    fn size(&self) -> usize {
        self.index.len()
    }

    fn snapshot(&self) -> Vec<(u32, u32)> {
        self.index
            .values()
            .map(|&idx| (self.slots[idx].fingerprint, self.slots[idx].count))
            .collect()
    }
}
