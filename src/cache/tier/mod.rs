//! Provided layer implementations
//!
//! Concrete layers are collaborators of the core, not part of it; this
//! module ships the one reference tier most chains start with.

pub mod memory;
