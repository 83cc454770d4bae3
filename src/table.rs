//! Canonical node store (unique table).
//!
//! Hash-consing table mapping `(variable, low, high)` to the single internal node
//! carrying that triple. Buckets hold the index of the first entry of an open chain;
//! entries link to the next one through `next`, with index 0 reserved as the chain
//! terminator (sentry), as in the classic `Table` layout.
//!
//! ```text
//! buckets: [ 0 | 3 | 0 | 1 ]      entries: [ sentry | e1 -> 0 | e2 -> 0 | e3 -> 2 ]
//! ```
//!
//! Removal only marks an entry as deleted (tombstone); lookups skip tombstones and the
//! next rehash purges them. Tombstones count toward the load: once live entries plus
//! tombstones reach [`LOAD_FACTOR`] of the bucket count the table is rehashed, doubling
//! the bucket count only when live entries alone fill at least half of it.

use log::debug;

use crate::error::{BddError, Result};
use crate::node::NodeKey;
use crate::reference::NodeId;
use crate::types::Var;
use crate::utils::{reduce, MyHash};

/// Occupancy ratio at which the table grows.
pub const LOAD_FACTOR: f64 = 0.75;

/// Default number of buckets of a fresh table.
pub const DEFAULT_BUCKETS: usize = 1024;

#[derive(Debug, Copy, Clone)]
struct Entry {
    key: NodeKey,
    node: NodeId,
    deleted: bool,
    next: usize,
}

impl Entry {
    fn sentry() -> Self {
        Self {
            key: NodeKey::new(Var::new(0), NodeId::new(0), NodeId::new(0)),
            node: NodeId::new(0),
            deleted: true,
            next: 0,
        }
    }
}

#[derive(Debug)]
pub struct Table {
    buckets: Vec<usize>,
    entries: Vec<Entry>,
    /// Number of live (non-deleted) entries.
    count: usize,
    /// Number of deleted entries still linked in chains.
    tombstones: usize,
}

impl Table {
    /// Create an empty table with `buckets` buckets.
    pub fn new(buckets: usize) -> Result<Self> {
        assert_ne!(buckets, 0, "Bucket count should not be zero");

        let mut bucket_vec = Vec::new();
        bucket_vec
            .try_reserve_exact(buckets)
            .map_err(BddError::oom("node table buckets"))?;
        bucket_vec.resize(buckets, 0);

        let mut entries = Vec::new();
        entries
            .try_reserve(1)
            .map_err(BddError::oom("node table entries"))?;
        entries.push(Entry::sentry());

        Ok(Self {
            buckets: bucket_vec,
            entries,
            count: 0,
            tombstones: 0,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    /// Approximate heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        self.buckets.capacity() * std::mem::size_of::<usize>()
            + self.entries.capacity() * std::mem::size_of::<Entry>()
    }

    fn bucket_index(&self, key: &NodeKey) -> usize {
        reduce(key.hash(), self.buckets.len())
    }

    fn find_entry(&self, key: &NodeKey) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(key)];
        while index != 0 {
            let entry = &self.entries[index];
            if !entry.deleted && entry.key == *key {
                return Some(index);
            }
            index = entry.next;
        }
        None
    }

    /// Look up the node registered for `key`.
    pub fn search(&self, key: &NodeKey) -> Option<NodeId> {
        self.find_entry(key).map(|i| self.entries[i].node)
    }

    /// Register `node` under `key`.
    ///
    /// Returns `Ok(false)` without touching the table when `key` is already present: a
    /// duplicate insert never overwrites the existing node. On allocation failure the
    /// table keeps its previous contents.
    pub fn insert(&mut self, key: NodeKey, node: NodeId) -> Result<bool> {
        let used = self.count + self.tombstones;
        if used as f64 / self.buckets.len() as f64 >= LOAD_FACTOR {
            if 2 * self.count >= self.buckets.len() {
                self.resize()?;
            } else {
                self.purge()?;
            }
        }

        if self.find_entry(&key).is_some() {
            debug!("insert: {:?} already present", key);
            return Ok(false);
        }

        self.entries
            .try_reserve(1)
            .map_err(BddError::oom("node table entries"))?;

        let b = self.bucket_index(&key);
        self.entries.push(Entry {
            key,
            node,
            deleted: false,
            next: self.buckets[b],
        });
        self.buckets[b] = self.entries.len() - 1;
        self.count += 1;

        Ok(true)
    }

    /// Mark the entry for `key` as deleted, returning its node.
    pub fn remove(&mut self, key: &NodeKey) -> Option<NodeId> {
        let index = self.find_entry(key)?;
        let entry = &mut self.entries[index];
        entry.deleted = true;
        self.count -= 1;
        self.tombstones += 1;
        Some(entry.node)
    }

    /// Double the bucket count and rehash live entries, dropping tombstones.
    pub fn resize(&mut self) -> Result<()> {
        let new_size = self
            .buckets
            .len()
            .checked_mul(2)
            .ok_or(BddError::OutOfMemory {
                context: "node table size overflow",
            })?;
        self.rehash(new_size)
    }

    /// Rehash live entries into the same number of buckets, dropping tombstones.
    pub fn purge(&mut self) -> Result<()> {
        self.rehash(self.buckets.len())
    }

    /// The new buckets and entries are built aside and swapped in only on success.
    fn rehash(&mut self, new_size: usize) -> Result<()> {
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(new_size)
            .map_err(BddError::oom("node table buckets"))?;
        buckets.resize(new_size, 0);

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(self.count + 1)
            .map_err(BddError::oom("node table entries"))?;
        entries.push(Entry::sentry());

        for entry in self.entries.iter().skip(1).filter(|e| !e.deleted) {
            let b = reduce(entry.key.hash(), new_size);
            entries.push(Entry {
                next: buckets[b],
                ..*entry
            });
            buckets[b] = entries.len() - 1;
        }

        debug!(
            "rehash: {} -> {} buckets, {} entries, purged {} tombstones",
            self.buckets.len(),
            new_size,
            self.count,
            self.tombstones
        );

        self.buckets = buckets;
        self.entries = entries;
        self.tombstones = 0;

        Ok(())
    }

    /// Iterate over live `(key, node)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, NodeId)> + '_ {
        self.entries
            .iter()
            .skip(1)
            .filter(|e| !e.deleted)
            .map(|e| (e.key, e.node))
    }
}
