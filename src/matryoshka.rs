//! Simple public API for the matryoshka chained cache
//!
//! [`Matryoshka`] is the cache orchestrator: it owns the ordered layer list,
//! derives the three capability chains from it, validates request
//! preconditions, and exposes the public read/write/delete operations. It
//! never touches storage itself; every side effect lives inside a layer.

use std::sync::Arc;

use crate::cache::chain::{Capability, Chain};
use crate::cache::context::CacheContext;
use crate::cache::traits::CacheLayer;
use crate::cache::types::CacheOperationError;

/// Cache orchestrator over an ordered chain of storage layers.
///
/// Layers are registered nearest-first: reads run in registration order and
/// short-circuit on the first hit, while writes and deletes run in reverse
/// registration order so the authoritative layer (registered last) is
/// updated before nearer caches. That forward/reverse split is a contract of
/// [`register`](Self::register), not an accident of traversal.
///
/// Registration rebuilds the composed chains and therefore takes `&mut
/// self`; it cannot overlap an in-flight operation on the same instance.
pub struct Matryoshka<V> {
    layers: Vec<Arc<dyn CacheLayer<V>>>,
    read_chain: Chain<V>,
    write_chain: Chain<V>,
    delete_chain: Chain<V>,
}

impl<V> Matryoshka<V> {
    /// Create an orchestrator with no layers; all three chains are no-ops
    /// until the first registration.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            read_chain: Chain::noop(Capability::Read),
            write_chain: Chain::noop(Capability::Write),
            delete_chain: Chain::noop(Capability::Delete),
        }
    }

    /// Append a layer to the chain and rebuild all three composed chains.
    /// Fluent, so a stack reads top-down:
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use matryoshka::{Matryoshka, MemoryLayer};
    /// let mut cache: Matryoshka<i64> = Matryoshka::new();
    /// cache
    ///     .register(Arc::new(MemoryLayer::with_name("near")))
    ///     .register(Arc::new(MemoryLayer::with_name("far")));
    /// ```
    pub fn register(&mut self, layer: Arc<dyn CacheLayer<V>>) -> &mut Self {
        log::debug!(
            "registered cache layer {} (total {})",
            layer.source(),
            self.layers.len() + 1
        );
        self.layers.push(layer);
        self.rebuild_chains();
        self
    }

    /// Number of registered layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn rebuild_chains(&mut self) {
        let forward = self.layers.clone();
        let reverse: Vec<_> = self.layers.iter().rev().cloned().collect();
        self.read_chain = Chain::new(forward, Capability::Read);
        self.write_chain = Chain::new(reverse.clone(), Capability::Write);
        self.delete_chain = Chain::new(reverse, Capability::Delete);
    }

    /// Run the read chain over a caller-built context.
    ///
    /// Fails with [`CacheOperationError::MissingKey`] before any layer runs
    /// when the key is empty. The chain's outcome stays observable on the
    /// context (`value`, `source`, extension data); the returned `Result`
    /// mirrors `ctx.error`.
    pub fn read_context(&self, ctx: &mut CacheContext<V>) -> Result<(), CacheOperationError> {
        if ctx.key().is_empty() {
            ctx.error = Some(CacheOperationError::MissingKey);
            return Err(CacheOperationError::MissingKey);
        }
        log::trace!("read chain ({} layers) for key {}", self.read_chain.len(), ctx.key());
        self.read_chain.invoke(ctx);
        match &ctx.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Run the reverse-order write chain over a caller-built context.
    ///
    /// Fails with [`CacheOperationError::MissingKey`] or
    /// [`CacheOperationError::MissingValue`] before any layer runs.
    pub fn write_context(&self, ctx: &mut CacheContext<V>) -> Result<(), CacheOperationError> {
        if ctx.key().is_empty() {
            ctx.error = Some(CacheOperationError::MissingKey);
            return Err(CacheOperationError::MissingKey);
        }
        if ctx.value.is_none() {
            ctx.error = Some(CacheOperationError::MissingValue);
            return Err(CacheOperationError::MissingValue);
        }
        log::trace!("write chain ({} layers) for key {}", self.write_chain.len(), ctx.key());
        self.write_chain.invoke(ctx);
        match &ctx.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Run the reverse-order delete chain over a caller-built context.
    ///
    /// Fails with [`CacheOperationError::MissingKey`] before any layer runs.
    pub fn delete_context(&self, ctx: &mut CacheContext<V>) -> Result<(), CacheOperationError> {
        if ctx.key().is_empty() {
            ctx.error = Some(CacheOperationError::MissingKey);
            return Err(CacheOperationError::MissingKey);
        }
        log::trace!("delete chain ({} layers) for key {}", self.delete_chain.len(), ctx.key());
        self.delete_chain.invoke(ctx);
        match &ctx.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Read `key` through the chain. A chain that finishes without a value
    /// and without an error reports [`CacheOperationError::KeyNotFound`].
    pub fn get(&self, key: impl Into<String>) -> Result<V, CacheOperationError> {
        let mut ctx = CacheContext::new(key);
        self.read_context(&mut ctx)?;
        ctx.value.ok_or(CacheOperationError::KeyNotFound)
    }

    /// Write `value` under `key`, authoritative layer first
    pub fn put(&self, key: impl Into<String>, value: V) -> Result<(), CacheOperationError> {
        let mut ctx = CacheContext::with_value(key, value);
        self.write_context(&mut ctx)
    }

    /// Delete `key` from the chain, authoritative layer first
    pub fn remove(&self, key: impl Into<String>) -> Result<(), CacheOperationError> {
        let mut ctx = CacheContext::new(key);
        self.delete_context(&mut ctx)
    }
}

impl<V> Default for Matryoshka<V> {
    fn default() -> Self {
        Self::new()
    }
}
