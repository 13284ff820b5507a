//! Matryoshka - composable chained cache
//!
//! A composition engine for chained cache lookups: an ordered list of storage
//! layers (fast near caches down to an authoritative source) is combined into
//! a single read/write/delete operation.
//!
//! # Features
//!
//! - **Multi-layer chains**: register layers nearest-first; reads try them in
//!   order and short-circuit on the first hit
//! - **Write-back fill**: a layer that delegated a read may populate its own
//!   store from the resolved value, promoting hot entries toward the front
//! - **Authoritative-first writes**: writes and deletes run the chain in
//!   reverse registration order so the source of truth is updated first
//! - **Explicit continuation**: each layer receives a [`Next`] cursor and
//!   fully controls whether the chain proceeds
//! - **Open extension slot**: a per-operation dynamic map lets layers pass
//!   auxiliary data without widening the shared context
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use matryoshka::prelude::*;
//!
//! let near: Arc<MemoryLayer<i64>> = Arc::new(MemoryLayer::with_name("cache"));
//! let mut cache: Matryoshka<i64> = Matryoshka::new();
//! cache.register(near.clone());
//!
//! cache.put("answer", 42).unwrap();
//! assert_eq!(cache.get("answer").unwrap(), 42);
//! ```

// Public API modules
pub mod matryoshka;
pub mod prelude;

// Cache implementation modules - traits are public for user implementations
pub mod cache;

// Re-export the public API at the crate root for convenience
pub use cache::chain::{Capability, Chain, Next};
pub use cache::context::CacheContext;
pub use cache::tier::memory::MemoryLayer;
pub use cache::traits::CacheLayer;
pub use cache::types::CacheOperationError;
pub use matryoshka::Matryoshka;
