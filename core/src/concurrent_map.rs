//! Sharded map for concurrent accumulation.
//!
//! Keys are spread over a fixed number of `BTreeMap` shards, each behind its
//! own mutex. A writer only ever holds the lock of the shard its key hashes to,
//! so writers to different shards never block each other.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Ord + Hash,
{
    /// Create a map with `shard_count` shards (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize { self.shards.len() }

    fn bucket(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.shards.len() as u64) as usize
    }

    /// Lock the shard owning `key` and return a guard to its value, inserting
    /// `V::default()` first if the key is new. The shard stays locked until the
    /// guard is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        let shard = self.shards[self.bucket(&key)].lock();
        MutexGuard::map(shard, |map| map.entry(key).or_default())
    }

    pub fn erase(&self, key: &K) -> Option<V> {
        self.shards[self.bucket(key)].lock().remove(key)
    }

    pub fn len(&self) -> usize { self.shards.iter().map(|s| s.lock().len()).sum() }

    pub fn is_empty(&self) -> bool { self.shards.iter().all(|s| s.lock().is_empty()) }

    /// Fold every shard into one ordered map. Taking `self` by value means all
    /// borrowing writers must have finished before the merge can run.
    pub fn build_ordinary_map(self) -> BTreeMap<K, V> {
        let mut out = BTreeMap::new();
        for shard in self.shards {
            out.append(&mut shard.into_inner());
        }
        out
    }
}
