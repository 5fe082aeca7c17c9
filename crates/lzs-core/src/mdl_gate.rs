//! Adaptive statistical extension-admission gate.
//!
//! Tracks an EWMA mean/variance over conditional extension probabilities
//! and compares each new observation against both a relative
//! (surprise-drop) test and an absolute entropy floor: a small struct of
//! `f64` accumulators, a `new()`/`check()`-shaped update method, and a
//! precomputed lookup table built once at construction instead of
//! recomputed per call.
//!
//! ## Entropy-floor table indexing
//!
//! `Z` for the *probability* calculation is `max(1, ...)` — never zero,
//! since it is a Laplace-smoothing denominator. The floor table, though,
//! needs an entry at `Z = 0` ("no branching observed yet, auto-pass"),
//! which is unreachable if it were indexed by that same clamped `Z`. The
//! floor is therefore indexed by the *unclamped* observed branching
//! factor (`child_degree_at_parent`, capped at 512): a genuinely
//! unbranched, never-before-seen context yields floor `0.0` and
//! auto-admits. This is what gives the conservative cold-start behavior —
//! early in a stream, before any branching has been observed, the floor
//! does not force emissions.

use crate::config::{MdlConfig, ZMode};

/// Entropy-floor table size. `MdlConfig::validate` rejects any
/// `z_fixed` above this so `ZMode::Fixed`'s probability calculation
/// (which uses the configured `z_fixed` uncapped) and its floor lookup
/// (which must index into this table) never disagree on `Z`.
pub(crate) const MAX_Z_TABLE: usize = 512;
const PROB_EPS_LOW: f64 = 1e-12;
const PROB_EPS_HIGH: f64 = 1.0 - 1e-12;
const VARIANCE_FLOOR: f64 = 1e-12;

/// The adaptive MDL admission gate.
#[derive(Debug, Clone)]
pub struct MdlGate {
    alpha: f64,
    z_mode: ZMode,
    z_fixed: u32,
    beta: f64,
    c: f64,
    /// `entropy_floor[z]` = `z.powf(-tau)` for `z` in `1..=512`, and `0.0`
    /// at index 0 (auto-pass, no branching observed).
    entropy_floor: Vec<f64>,
    mean: f64,
    mean2: f64,
    /// Probability computed by the most recent `check()` call. Exposed
    /// only so the tokenizer can feed the monitor's nominally
    /// "surprisal-like" counters; not used internally.
    last_p: f64,
}

impl MdlGate {
    /// Construct from validated configuration, precomputing the entropy
    /// floor table for the configured `tau`.
    #[must_use]
    pub fn new(config: &MdlConfig) -> Self {
        let mut entropy_floor = Vec::with_capacity(MAX_Z_TABLE + 1);
        entropy_floor.push(0.0);
        for z in 1..=MAX_Z_TABLE {
            entropy_floor.push((z as f64).powf(-config.tau));
        }
        Self {
            alpha: config.alpha,
            z_mode: config.z_mode,
            z_fixed: config.z_fixed,
            beta: config.beta,
            c: config.c,
            entropy_floor,
            mean: 0.0,
            mean2: 0.0,
            last_p: 0.0,
        }
    }

    /// Reset the EWMA accumulators to their constructed state.
    pub fn clear(&mut self) {
        self.mean = 0.0;
        self.mean2 = 0.0;
    }

    /// Current EWMA mean, for diagnostics/tests.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Current EWMA variance, for diagnostics/tests.
    #[must_use]
    pub fn variance(&self) -> f64 {
        (self.mean2 - self.mean * self.mean).max(VARIANCE_FLOOR)
    }

    /// The conditional probability computed by the most recent `check()`.
    #[must_use]
    pub fn last_p(&self) -> f64 {
        self.last_p
    }

    fn z_for_probability(&self, child_degree_at_parent: u32) -> f64 {
        let raw = match self.z_mode {
            ZMode::ChildDegree => child_degree_at_parent.min(MAX_Z_TABLE as u32),
            ZMode::Fixed => self.z_fixed,
        };
        raw.max(1) as f64
    }

    fn entropy_floor_value(&self, child_degree_at_parent: u32) -> f64 {
        let idx = match self.z_mode {
            ZMode::ChildDegree => child_degree_at_parent.min(MAX_Z_TABLE as u32) as usize,
            ZMode::Fixed => self.z_fixed.min(MAX_Z_TABLE as u32) as usize,
        };
        self.entropy_floor[idx]
    }

    /// Evaluate the gate for one extension step.
    ///
    /// `count_prev`/`count_cand` are the Frequency Memory counts for the
    /// previous and current candidate keys (0 if absent). `child_degree_at_parent`
    /// is the trie's observed branching factor at the candidate's parent
    /// node (0 if the parent is off-trie). Returns `true` to admit the
    /// extension (continue), `false` to signal rejection (caller emits).
    /// The EWMA state updates unconditionally, regardless of outcome.
    pub fn check(&mut self, count_prev: u32, count_cand: u32, child_degree_at_parent: u32) -> bool {
        let z = self.z_for_probability(child_degree_at_parent);
        let numerator = count_cand as f64 + self.alpha;
        let denominator = count_prev as f64 + self.alpha * z;
        let p = (numerator / denominator).clamp(PROB_EPS_LOW, PROB_EPS_HIGH);
        self.last_p = p;

        let mean_prev = self.mean;
        self.mean = (1.0 - self.beta) * self.mean + self.beta * p;
        self.mean2 = (1.0 - self.beta) * self.mean2 + self.beta * p * p;
        let var = (self.mean2 - self.mean * self.mean).max(VARIANCE_FLOOR);

        let diff = mean_prev - p;
        let dropped_too_much = diff > 0.0 && diff * diff >= self.c * self.c * var;

        let floor = self.entropy_floor_value(child_degree_at_parent);
        let above_floor = p >= floor;

        !dropped_too_much && above_floor
    }
}
