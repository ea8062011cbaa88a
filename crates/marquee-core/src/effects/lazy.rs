//! Deferred-load registry for gallery assets.
//!
//! A key is requested the first time its region is flagged in view and is
//! never reprocessed on later visibility changes, whatever the outcome of
//! the load.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazyState<T> {
    /// Registered, not yet visible
    Pending,
    /// Load started, result not yet delivered
    Requested,
    Loaded(T),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct LazyStore<T> {
    entries: HashMap<String, LazyState<T>>,
}

impl<T> Default for LazyStore<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> LazyStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a deferred source; keeps any existing state for the key
    pub fn register(&mut self, key: impl Into<String>) {
        self.entries.entry(key.into()).or_insert(LazyState::Pending);
    }

    /// Transition Pending → Requested. Returns true exactly once per key:
    /// when the caller should actually start the load.
    pub fn request_if_pending(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(state @ LazyState::Pending) => {
                *state = LazyState::Requested;
                true
            }
            _ => false,
        }
    }

    pub fn set_loaded(&mut self, key: &str, value: T) {
        if let Some(state) = self.entries.get_mut(key) {
            *state = LazyState::Loaded(value);
        }
    }

    pub fn set_failed(&mut self, key: &str, error: impl Into<String>) {
        if let Some(state) = self.entries.get_mut(key) {
            *state = LazyState::Failed(error.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&LazyState<T>> {
        self.entries.get(key)
    }

    pub fn loaded(&self, key: &str) -> Option<&T> {
        match self.entries.get(key) {
            Some(LazyState::Loaded(value)) => Some(value),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.entries.get_mut(key) {
            Some(LazyState::Loaded(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(LazyState::Loaded(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_exactly_once() {
        let mut store: LazyStore<String> = LazyStore::new();
        store.register("a.png");

        assert!(store.request_if_pending("a.png"));
        // Subsequent visibility changes never re-request
        assert!(!store.request_if_pending("a.png"));

        store.set_loaded("a.png", "decoded".to_string());
        assert!(!store.request_if_pending("a.png"));
        assert_eq!(store.loaded("a.png").map(String::as_str), Some("decoded"));
    }

    #[test]
    fn test_deferred_source_becomes_live() {
        let mut store: LazyStore<u32> = LazyStore::new();
        store.register("img");
        assert_eq!(store.get("img"), Some(&LazyState::Pending));

        assert!(store.request_if_pending("img"));
        store.set_loaded("img", 7);
        assert!(store.is_loaded("img"));
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut store: LazyStore<u32> = LazyStore::new();
        store.register("broken");
        assert!(store.request_if_pending("broken"));
        store.set_failed("broken", "decode error");
        assert!(!store.request_if_pending("broken"));
        assert!(!store.is_loaded("broken"));
    }

    #[test]
    fn test_unknown_key_is_inert() {
        let mut store: LazyStore<u32> = LazyStore::new();
        assert!(!store.request_if_pending("nope"));
        store.set_loaded("nope", 1);
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn test_reregister_keeps_state() {
        let mut store: LazyStore<u32> = LazyStore::new();
        store.register("a");
        assert!(store.request_if_pending("a"));
        store.register("a");
        assert!(!store.request_if_pending("a"));
    }
}
