//! Per-element instance registry.

use std::hash::Hash;

use indexmap::IndexMap;

/// Widget instances keyed by element handle, at most one per element.
#[derive(Debug, Clone)]
pub struct InstanceRegistry<K, W> {
    instances: IndexMap<K, W>,
}

impl<K: Hash + Eq, W> InstanceRegistry<K, W> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            instances: IndexMap::new(),
        }
    }

    /// Get the instance for an element.
    pub fn get(&self, key: &K) -> Option<&W> {
        self.instances.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut W> {
        self.instances.get_mut(key)
    }

    /// Store an instance, returning the one it replaced.
    pub fn set(&mut self, key: K, instance: W) -> Option<W> {
        self.instances.insert(key, instance)
    }

    /// Remove and return the instance for an element.
    pub fn delete(&mut self, key: &K) -> Option<W> {
        self.instances.shift_remove(key)
    }

    /// Check if an element has an instance.
    pub fn contains(&self, key: &K) -> bool {
        self.instances.contains_key(key)
    }

    /// Build and store an instance unless the element already has one.
    ///
    /// Returns `Ok(true)` when a new instance was created. `build` is not
    /// called for an element that is already registered.
    pub fn construct<E>(&mut self, key: K, build: impl FnOnce() -> Result<W, E>) -> Result<bool, E> {
        if self.instances.contains_key(&key) {
            return Ok(false);
        }
        let instance = build()?;
        self.instances.insert(key, instance);
        Ok(true)
    }

    /// Element handles in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.instances.keys()
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<K: Hash + Eq, W> Default for InstanceRegistry<K, W> {
    fn default() -> Self {
        Self::new()
    }
}
