//! Matryoshka prelude - convenient imports for users
//!
//! This module provides everything users need to build and drive a layered
//! cache chain.

// Re-export the public API
pub use crate::matryoshka::Matryoshka;

// Re-export essential error types that users might need
pub use crate::cache::types::CacheOperationError;

// Re-export the trait and chain types that custom layers implement against
pub use crate::cache::chain::{Capability, Chain, Next};
pub use crate::cache::context::CacheContext;
pub use crate::cache::traits::CacheLayer;

// Re-export the provided in-memory tier
pub use crate::cache::tier::memory::MemoryLayer;
