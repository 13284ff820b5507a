//! Capability chain composition
//!
//! A [`Chain`] is an ordered list of layer handles bound to one capability
//! (read, write, or delete). Execution walks the list with an index cursor,
//! [`Next`]: each layer is handed the cursor for the position after its own
//! and decides whether to call [`Next::proceed`]. Chain depth is explicit and
//! the empty chain composes to a no-op.

use std::sync::Arc;

use super::context::CacheContext;
use super::traits::CacheLayer;

/// Which layer method a chain dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Read,
    Write,
    Delete,
}

/// Ordered sequence of layers composed for one capability.
///
/// The layer list is already in execution order: the orchestrator builds the
/// read chain in registration order and the write/delete chains reversed, so
/// the authoritative layer (registered last) is reached first on a write.
pub struct Chain<V> {
    layers: Vec<Arc<dyn CacheLayer<V>>>,
    capability: Capability,
}

impl<V> Chain<V> {
    pub(crate) fn new(layers: Vec<Arc<dyn CacheLayer<V>>>, capability: Capability) -> Self {
        Self { layers, capability }
    }

    /// Empty chain: invoking it leaves the context untouched
    pub(crate) fn noop(capability: Capability) -> Self {
        Self::new(Vec::new(), capability)
    }

    /// Run the chain from the first layer
    pub fn invoke(&self, ctx: &mut CacheContext<V>) {
        Next {
            chain: self,
            index: 0,
        }
        .proceed(ctx);
    }

    /// Number of layers in this chain
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn dispatch(&self, index: usize, ctx: &mut CacheContext<V>) {
        let Some(layer) = self.layers.get(index) else {
            return;
        };
        let next = Next {
            chain: self,
            index: index + 1,
        };
        match self.capability {
            Capability::Read => layer.read(ctx, next),
            Capability::Write => layer.write(ctx, next),
            Capability::Delete => layer.delete(ctx, next),
        }
    }
}

/// Cursor into a [`Chain`], handed to each layer as its continuation.
///
/// `proceed` consumes the cursor, so a layer delegates at most once;
/// dropping it without calling `proceed` stops the chain at that layer.
pub struct Next<'a, V> {
    chain: &'a Chain<V>,
    index: usize,
}

impl<V> Next<'_, V> {
    /// Hand the context to the next layer in the chain. Past the end of the
    /// chain this is a no-op, leaving whatever state the last layer set.
    pub fn proceed(self, ctx: &mut CacheContext<V>) {
        self.chain.dispatch(self.index, ctx);
    }

    /// Layers left after this cursor position
    pub fn remaining(&self) -> usize {
        self.chain.layers.len().saturating_sub(self.index)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    /// Counts invocations per capability; `delegate` controls whether each
    /// method calls proceed.
    struct Probe {
        name: &'static str,
        delegate: bool,
        reads: AtomicUsize,
        writes: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl Probe {
        fn new(name: &'static str, delegate: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                delegate,
                reads: AtomicUsize::new(0),
                writes: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
            })
        }
    }

    impl CacheLayer<i64> for Probe {
        fn read(&self, ctx: &mut CacheContext<i64>, next: Next<'_, i64>) {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.delegate {
                next.proceed(ctx);
            }
        }

        fn write(&self, ctx: &mut CacheContext<i64>, next: Next<'_, i64>) {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.delegate {
                next.proceed(ctx);
            }
        }

        fn delete(&self, ctx: &mut CacheContext<i64>, next: Next<'_, i64>) {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            if self.delegate {
                next.proceed(ctx);
            }
        }

        fn source(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn empty_chain_is_noop() {
        let chain: Chain<i64> = Chain::noop(Capability::Read);
        let mut ctx = CacheContext::new("k");
        chain.invoke(&mut ctx);
        assert!(ctx.value.is_none());
        assert!(ctx.error.is_none());
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());
    }

    #[test]
    fn chain_runs_layers_in_list_order_while_delegating() {
        let a = Probe::new("a", true);
        let b = Probe::new("b", true);
        let chain = Chain::new(
            vec![a.clone() as Arc<dyn CacheLayer<i64>>, b.clone() as _],
            Capability::Read,
        );
        let mut ctx = CacheContext::new("k");
        chain.invoke(&mut ctx);
        assert_eq!(a.reads.load(Ordering::SeqCst), 1);
        assert_eq!(b.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_the_cursor_stops_the_chain() {
        let a = Probe::new("a", false);
        let b = Probe::new("b", true);
        let chain = Chain::new(
            vec![a.clone() as Arc<dyn CacheLayer<i64>>, b.clone() as _],
            Capability::Delete,
        );
        let mut ctx = CacheContext::new("k");
        chain.invoke(&mut ctx);
        assert_eq!(a.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(b.deletes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn capability_selects_the_dispatched_method() {
        let a = Probe::new("a", true);
        let chain = Chain::new(
            vec![a.clone() as Arc<dyn CacheLayer<i64>>],
            Capability::Write,
        );
        let mut ctx = CacheContext::with_value("k", 1);
        chain.invoke(&mut ctx);
        assert_eq!(a.writes.load(Ordering::SeqCst), 1);
        assert_eq!(a.reads.load(Ordering::SeqCst), 0);
        assert_eq!(a.deletes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cursor_reports_remaining_depth() {
        struct DepthCheck;
        impl CacheLayer<i64> for DepthCheck {
            fn read(&self, ctx: &mut CacheContext<i64>, next: Next<'_, i64>) {
                ctx.set_ext("remaining", next.remaining());
                next.proceed(ctx);
            }
            fn write(&self, _ctx: &mut CacheContext<i64>, _next: Next<'_, i64>) {}
            fn delete(&self, _ctx: &mut CacheContext<i64>, _next: Next<'_, i64>) {}
            fn source(&self) -> &str {
                "depth-check"
            }
        }

        let chain = Chain::new(
            vec![
                Arc::new(DepthCheck) as Arc<dyn CacheLayer<i64>>,
                Probe::new("tail", true) as _,
            ],
            Capability::Read,
        );
        let mut ctx = CacheContext::new("k");
        chain.invoke(&mut ctx);
        assert_eq!(ctx.ext::<usize>("remaining"), Some(&1));
    }
}
