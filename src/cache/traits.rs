//! Layer trait for cache chain participants
//!
//! A layer is one storage tier (near cache or authoritative source). It is
//! registered with the orchestrator as a trait object and participates in the
//! read, write, and delete chains through the shared [`CacheContext`].

use super::chain::Next;
use super::context::CacheContext;

/// One storage tier participating in a chain.
///
/// Every method receives the continuation explicitly: calling
/// [`Next::proceed`] delegates to the next layer in the current chain, and
/// dropping the cursor stops the chain at this layer. That explicit handoff
/// is what enables short-circuit reads and selective write fan-out.
///
/// Implementations must be `Send + Sync`: a single layer instance is shared
/// behind `Arc` across every chain it appears in, and the core adds no
/// synchronization of its own around a layer's private store.
pub trait CacheLayer<V>: Send + Sync {
    /// Inspect or satisfy a read.
    ///
    /// On a hit the layer calls [`CacheContext::resolve`] with its own
    /// identity and returns without delegating. On a miss it delegates via
    /// `next.proceed(ctx)` and may then inspect the context: when
    /// [`CacheContext::is_resolved`] holds, the layer may copy the value
    /// into its own store as a write-back fill.
    fn read(&self, ctx: &mut CacheContext<V>, next: Next<'_, V>);

    /// Persist `ctx.value` under `ctx.key()` in this layer's store, then
    /// usually delegate so the write fans out. A terminal pure cache may
    /// drop `next` instead.
    fn write(&self, ctx: &mut CacheContext<V>, next: Next<'_, V>);

    /// Remove the entry from this layer's store if present. An authoritative
    /// layer that must never lose data may leave its store untouched while
    /// still delegating so nearer caches actually evict.
    fn delete(&self, ctx: &mut CacheContext<V>, next: Next<'_, V>);

    /// Stable identity, used to populate `ctx.source` and for diagnostics
    fn source(&self) -> &str;
}
