//! In-memory near-cache layer
//!
//! A concurrent map-backed tier with write-back fill. One instance is meant
//! to be shared behind `Arc`: the map serializes its own access, so the
//! layer upholds the synchronization obligation the core leaves to
//! collaborators.

use dashmap::DashMap;

use crate::cache::chain::Next;
use crate::cache::context::CacheContext;
use crate::cache::traits::CacheLayer;

/// Map-backed cache layer.
///
/// Reads short-circuit on a hit; on a miss the layer delegates and fills
/// itself from whatever the rest of the chain resolved. Writes and deletes
/// apply locally and then propagate.
pub struct MemoryLayer<V> {
    name: String,
    entries: DashMap<String, V>,
}

impl<V> MemoryLayer<V> {
    /// Create a layer named `"memory"`
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    /// Create a named layer, so two memory tiers in one chain stay
    /// distinguishable in `ctx.source`
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: DashMap::new(),
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert directly into the store, bypassing any chain. Useful for
    /// preloading a tier before it starts serving.
    pub fn seed(&self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }
}

impl<V> Default for MemoryLayer<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync + 'static> CacheLayer<V> for MemoryLayer<V> {
    fn read(&self, ctx: &mut CacheContext<V>, next: Next<'_, V>) {
        if let Some(hit) = self.entries.get(ctx.key()) {
            let value = hit.value().clone();
            drop(hit);
            ctx.resolve(value, &self.name);
            return;
        }
        next.proceed(ctx);
        // write-back fill from whatever the rest of the chain resolved
        if ctx.is_resolved() {
            if let Some(value) = ctx.value.clone() {
                log::trace!("{}: write-back fill for key {}", self.name, ctx.key());
                self.entries.insert(ctx.key().to_string(), value);
            }
        }
    }

    fn write(&self, ctx: &mut CacheContext<V>, next: Next<'_, V>) {
        if let Some(value) = ctx.value.clone() {
            self.entries.insert(ctx.key().to_string(), value);
        }
        next.proceed(ctx);
    }

    fn delete(&self, ctx: &mut CacheContext<V>, next: Next<'_, V>) {
        self.entries.remove(ctx.key());
        next.proceed(ctx);
    }

    fn source(&self) -> &str {
        &self.name
    }
}
