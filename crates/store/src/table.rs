//! Generic keyed in-memory table.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

/// A `RwLock<HashMap>` table with the handful of access shapes the stores
/// need. Poisoned locks degrade to empty reads / dropped writes, matching the
/// disposable-read-model convention.
#[derive(Debug)]
pub struct InMemoryTable<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryTable<K, V>
where
    K: Copy + Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        map.remove(key)
    }

    pub fn all(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    pub fn filter(&self, pred: impl Fn(&V) -> bool) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().filter(|v| pred(v)).cloned().collect(),
            Err(_) => vec![],
        }
    }

    pub fn any(&self, pred: impl Fn(&V) -> bool) -> bool {
        match self.inner.read() {
            Ok(map) => map.values().any(|v| pred(v)),
            Err(_) => false,
        }
    }

    pub fn retain(&self, keep: impl Fn(&V) -> bool) {
        if let Ok(mut map) = self.inner.write() {
            map.retain(|_, v| keep(v));
        }
    }

    /// Mutate one row in place; returns false when the key is absent.
    pub fn update_in_place(&self, key: &K, f: impl FnOnce(&mut V)) -> bool {
        match self.inner.write() {
            Ok(mut map) => match map.get_mut(key) {
                Some(value) => {
                    f(value);
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for InMemoryTable<K, V>
where
    K: Copy + Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
