//! Result memoization keyed by input fingerprints.
//!
//! Interactive callers re-evaluate on every keystroke; the cache turns the
//! second identical call into a lookup. Instances are explicit objects owned
//! by the composition root, never module globals, so tests can run
//! independent caches side by side.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::hash::Hash;

use crate::engine::{self, VoltageDropResult};
use crate::error::CalcResult;
use crate::inputs::VoltageDropInputs;

/// Deterministic fingerprint over exactly the fields that affect
/// `evaluate`. Adding a new relevant field to `VoltageDropInputs` requires
/// deliberately extending this function.
pub fn fingerprint(inputs: &VoltageDropInputs) -> String {
    let mut hasher = Sha256::new();

    let push_f64 = |hasher: &mut Sha256, v: f64| {
        hasher.update(v.to_bits().to_le_bytes());
    };
    let push_opt_f64 = |hasher: &mut Sha256, v: Option<f64>| match v {
        Some(v) => {
            hasher.update([1u8]);
            hasher.update(v.to_bits().to_le_bytes());
        }
        None => hasher.update([0u8]),
    };

    push_f64(&mut hasher, inputs.system_voltage_v);
    push_f64(&mut hasher, inputs.load_current_a);
    push_f64(&mut hasher, inputs.conductor_length_ft);
    hasher.update(inputs.conductor_size.label().as_bytes());
    hasher.update(inputs.conductor_material.label().as_bytes());
    hasher.update(inputs.conduit_material.label().as_bytes());
    hasher.update(inputs.phase.label().as_bytes());
    push_f64(&mut hasher, inputs.ambient_temperature_c);
    push_f64(&mut hasher, inputs.power_factor);
    hasher.update(inputs.circuit.circuit_type.label().as_bytes());
    push_opt_f64(&mut hasher, inputs.circuit.furthest_outlet_distance_ft);
    push_opt_f64(&mut hasher, inputs.circuit.starting_current_multiplier);
    push_opt_f64(&mut hasher, inputs.circuit.service_factor);
    hasher.update([inputs.circuit.vfd_driven as u8]);
    match inputs.circuit.wireway {
        Some(kind) => {
            hasher.update([1u8]);
            hasher.update(kind.label().as_bytes());
        }
        None => hasher.update([0u8]),
    }

    format!("{:x}", hasher.finalize())
}

/// Generic memoization for a pure function, parameterized by an injectable
/// key function. One utility covers both the fixed-shape and the
/// caller-keyed use cases.
pub struct Memo<A, K, V> {
    key_fn: Box<dyn Fn(&A) -> K>,
    entries: HashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<A, K: Eq + Hash, V: Clone> Memo<A, K, V> {
    pub fn new(key_fn: impl Fn(&A) -> K + 'static) -> Self {
        Self {
            key_fn: Box::new(key_fn),
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&self, arg: &A) -> Option<&V> {
        self.entries.get(&(self.key_fn)(arg))
    }

    pub fn contains(&self, arg: &A) -> bool {
        self.entries.contains_key(&(self.key_fn)(arg))
    }

    pub fn insert(&mut self, arg: &A, value: V) {
        self.entries.insert((self.key_fn)(arg), value);
    }

    /// Serve from the cache, or compute and remember. Errors are not cached.
    pub fn get_or_compute<E>(
        &mut self,
        arg: &A,
        compute: impl FnOnce(&A) -> Result<V, E>,
    ) -> Result<V, E> {
        let key = (self.key_fn)(arg);
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(value.clone());
        }
        let value = compute(arg)?;
        self.misses += 1;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Memoized wrapper around [`engine::evaluate`], keyed by [`fingerprint`].
/// Unbounded for the process lifetime; `clear` is the only eviction.
pub struct CachedEngine {
    memo: Memo<VoltageDropInputs, String, VoltageDropResult>,
}

impl CachedEngine {
    pub fn new() -> Self {
        Self {
            memo: Memo::new(fingerprint),
        }
    }

    pub fn evaluate(&mut self, inputs: &VoltageDropInputs) -> CalcResult<VoltageDropResult> {
        self.memo.get_or_compute(inputs, engine::evaluate)
    }

    pub fn clear(&mut self) {
        self.memo.clear();
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.memo.hits()
    }

    pub fn misses(&self) -> u64 {
        self.memo.misses()
    }
}

impl Default for CachedEngine {
    fn default() -> Self {
        Self::new()
    }
}
