//! Bounded LRU cache of propagation results.
//!
//! Keys quantize the continuous context fields so that near-duplicate
//! queries collapse onto one entry: positions and antenna heights to
//! 0.1 m, power and gains to 0.1 dB, frequency to 1 MHz. The model's
//! [`cache_fingerprint`](raypath_model::PropagationModel::cache_fingerprint)
//! is part of the key, so retuning a model never serves stale results.
//!
//! Entries do not expire. Callers clear the cache when the scene
//! changes.

use indexmap::IndexMap;
use raypath_core::{quantize, quantize_vec3, PropagationContext};

/// Grid step for positions and antenna heights, meters.
pub const POSITION_STEP_M: f32 = 0.1;
/// Grid step for power and gain values, dB.
pub const LEVEL_STEP_DB: f32 = 0.1;
/// Grid step for the carrier frequency, MHz.
pub const FREQUENCY_STEP_MHZ: f32 = 1.0;

// ── CacheKey ───────────────────────────────────────────────────────

/// Quantized identity of a propagation query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    transmitter: [i32; 3],
    receiver: [i32; 3],
    power: i32,
    antenna_gain: i32,
    receiver_gain: i32,
    frequency: i32,
    transmitter_height: i32,
    receiver_height: i32,
    line_of_sight: bool,
    model: u8,
    layers: Option<u32>,
    fingerprint: u64,
}

impl CacheKey {
    /// Key for `ctx` evaluated by a model with the given fingerprint.
    pub fn new(ctx: &PropagationContext, fingerprint: u64) -> Self {
        Self {
            transmitter: quantize_vec3(ctx.transmitter_position, POSITION_STEP_M),
            receiver: quantize_vec3(ctx.receiver_position, POSITION_STEP_M),
            power: quantize(ctx.transmitter_power_dbm, LEVEL_STEP_DB),
            antenna_gain: quantize(ctx.antenna_gain_dbi, LEVEL_STEP_DB),
            receiver_gain: quantize(ctx.receiver_gain_dbi, LEVEL_STEP_DB),
            frequency: quantize(ctx.frequency_mhz, FREQUENCY_STEP_MHZ),
            transmitter_height: quantize(ctx.transmitter_height, POSITION_STEP_M),
            receiver_height: quantize(ctx.receiver_height, POSITION_STEP_M),
            line_of_sight: ctx.is_line_of_sight,
            model: ctx.model.id(),
            layers: ctx.obstacle_layers.map(|m| m.0),
            fingerprint,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    value: f32,
    last_access: u64,
}

// ── ResultCache ────────────────────────────────────────────────────

/// Least-recently-used result cache with a fixed capacity.
///
/// Recency is tracked with a logical clock that advances on every
/// lookup hit and store, so ordering is exact and independent of wall
/// time. Eviction scans for the oldest entry; capacities are small
/// enough that the linear scan is cheaper than maintaining an order
/// list on every hit.
#[derive(Debug)]
pub struct ResultCache {
    entries: IndexMap<CacheKey, CacheEntry>,
    capacity: usize,
    clock: u64,
    evictions: u64,
}

impl ResultCache {
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            clock: 0,
            evictions: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Look up a stored result, refreshing its recency on a hit.
    pub fn try_get(&mut self, ctx: &PropagationContext, fingerprint: u64) -> Option<f32> {
        self.get_key(&CacheKey::new(ctx, fingerprint))
    }

    /// [`try_get`](Self::try_get) with a precomputed key.
    pub fn get_key(&mut self, key: &CacheKey) -> Option<f32> {
        let now = self.tick();
        let entry = self.entries.get_mut(key)?;
        entry.last_access = now;
        Some(entry.value)
    }

    /// Store a result, evicting the least recently used entry if the
    /// cache is full.
    pub fn store(&mut self, ctx: &PropagationContext, fingerprint: u64, value: f32) {
        self.store_key(CacheKey::new(ctx, fingerprint), value);
    }

    /// [`store`](Self::store) with a precomputed key.
    pub fn store_key(&mut self, key: CacheKey, value: f32) {
        let now = self.tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.last_access = now;
            return;
        }
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                last_access: now,
            },
        );
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .values()
            .enumerate()
            .min_by_key(|(_, e)| e.last_access)
            .map(|(i, _)| i);
        if let Some(index) = oldest {
            self.entries.swap_remove_index(index);
            self.evictions += 1;
        }
    }

    /// Whether a result is stored for the key, without touching recency.
    pub fn contains(&self, ctx: &PropagationContext, fingerprint: u64) -> bool {
        self.entries.contains_key(&CacheKey::new(ctx, fingerprint))
    }

    /// Drop every entry. The eviction counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored results.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries evicted over the cache's lifetime.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
