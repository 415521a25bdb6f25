//! Key-value storage scopes.
//!
//! The tracker reads two scopes: a durable one (consent, first-touch UTM)
//! and a session one (session id) that the host clears when the visit ends.

use parking_lot::RwLock;
use std::collections::HashMap;

/// A string key-value store bound to one lifetime scope.
pub trait ScopedStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// Remove every key in this scope.
    fn clear(&self);
}

/// In-process storage scope.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ScopedStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}
