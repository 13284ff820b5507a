//! Cache system module
//!
//! Chain composition machinery: the per-operation context, the layer trait,
//! the capability chains, and the provided in-memory tier.

pub mod chain;
pub mod context;
pub mod tier;
pub mod traits;
pub mod types;
