//! Per-operation request context
//!
//! One [`CacheContext`] is created per logical read/write/delete, threaded
//! through the composed chain by mutable reference, and discarded when the
//! operation returns. It is never retained across calls.

use std::any::Any;
use std::collections::HashMap;

use super::types::CacheOperationError;

/// Mutable carrier passed through a capability chain.
///
/// The key is fixed at construction; `value`, `source`, and `error` are the
/// shared fields layers cooperate on. The extension slot is a string-keyed
/// dynamic map for layer-private data, so layers can hand auxiliary state to
/// each other without widening this struct.
pub struct CacheContext<V> {
    key: String,
    /// Present for write operations and for successful reads
    pub value: Option<V>,
    /// Identity of the layer that resolved a read, `None` otherwise
    pub source: Option<String>,
    /// Set when the operation failed; absence means success
    pub error: Option<CacheOperationError>,
    extension: HashMap<String, Box<dyn Any + Send>>,
}

impl<V> CacheContext<V> {
    /// Create a context for a read or delete. No validation happens here;
    /// the orchestrator rejects empty keys before any layer runs.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            source: None,
            error: None,
            extension: HashMap::new(),
        }
    }

    /// Create a context carrying a value, for a write operation
    pub fn with_value(key: impl Into<String>, value: V) -> Self {
        let mut ctx = Self::new(key);
        ctx.value = Some(value);
        ctx
    }

    /// Key identifying the item; immutable for the lifetime of the operation
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mark the read as satisfied by `source`: sets the value, records the
    /// resolving layer, and clears any error a further layer left behind.
    pub fn resolve(&mut self, value: V, source: &str) {
        self.value = Some(value);
        self.source = Some(source.to_string());
        self.error = None;
    }

    /// Whether the context holds a usable result (value present, no error).
    /// Layers consult this after delegating to decide on a write-back fill.
    pub fn is_resolved(&self) -> bool {
        self.error.is_none() && self.value.is_some()
    }

    /// Store a layer-private extension value under `key`
    pub fn set_ext<T: Any + Send>(&mut self, key: impl Into<String>, value: T) {
        self.extension.insert(key.into(), Box::new(value));
    }

    /// Borrow an extension value, if present and of the requested type
    pub fn ext<T: Any + Send>(&self, key: &str) -> Option<&T> {
        self.extension.get(key).and_then(|v| v.downcast_ref())
    }

    /// Remove and return an extension value
    pub fn take_ext<T: Any + Send>(&mut self, key: &str) -> Option<T> {
        let boxed = self.extension.remove(key)?;
        match boxed.downcast::<T>() {
            Ok(v) => Some(*v),
            Err(boxed) => {
                // wrong type requested, keep the entry
                self.extension.insert(key.to_string(), boxed);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_sets_value_source_and_clears_error() {
        let mut ctx: CacheContext<i64> = CacheContext::new("k");
        ctx.error = Some(CacheOperationError::KeyNotFound);
        ctx.resolve(7, "near");
        assert_eq!(ctx.value, Some(7));
        assert_eq!(ctx.source.as_deref(), Some("near"));
        assert!(ctx.error.is_none());
        assert!(ctx.is_resolved());
    }

    #[test]
    fn extension_slot_is_typed_per_key() {
        let mut ctx: CacheContext<i64> = CacheContext::new("k");
        ctx.set_ext("attempts", 3usize);
        ctx.set_ext("origin", String::from("disk"));

        assert_eq!(ctx.ext::<usize>("attempts"), Some(&3));
        assert_eq!(ctx.ext::<String>("origin").map(String::as_str), Some("disk"));
        // wrong type yields None and leaves the entry intact
        assert_eq!(ctx.ext::<i32>("attempts"), None);
        assert_eq!(ctx.take_ext::<i32>("attempts"), None);
        assert_eq!(ctx.take_ext::<usize>("attempts"), Some(3));
        assert_eq!(ctx.ext::<usize>("attempts"), None);
    }

    #[test]
    fn value_carrying_constructor() {
        let ctx = CacheContext::with_value("k", 9i64);
        assert_eq!(ctx.key(), "k");
        assert_eq!(ctx.value, Some(9));
        assert!(ctx.source.is_none());
    }
}
