//! Node arena with per-slot reference counts.
//!
//! Slots are addressed by plain indices which stay valid until the slot is freed, so
//! they can serve as node identity. Freed slots are reused by later allocations.

use std::cmp::min;

use crate::error::{BddError, Result};

#[derive(Debug, Clone)]
struct Entry<T> {
    value: Option<T>,
    ref_count: u32,
}

#[derive(Debug)]
pub struct Storage<T> {
    data: Vec<Entry<T>>,
    /// Maximum number of slots.
    max_capacity: usize,
    /// Index of the first *possibly* free (non-occupied) slot.
    min_free: usize,
    /// Number of occupied slots.
    real_size: usize,
}

impl<T> Storage<T> {
    /// Create a new storage holding at most `2^bits` values.
    pub fn new(bits: usize) -> Self {
        assert!(
            (1..=31).contains(&bits),
            "Storage bits should be in the range 1..=31"
        );

        Self {
            data: Vec::new(),
            max_capacity: 1 << bits,
            min_free: 0,
            real_size: 0,
        }
    }

    /// Maximum number of slots.
    pub fn capacity(&self) -> usize {
        self.max_capacity
    }
    /// Number of slots ever touched (high-water mark).
    pub fn size(&self) -> usize {
        self.data.len()
    }
    /// Number of occupied slots.
    pub fn real_size(&self) -> usize {
        self.real_size
    }

    /// Approximate heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<Entry<T>>()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.data.get(index).is_some_and(|e| e.value.is_some())
    }

    pub fn value(&self, index: usize) -> &T {
        match self.data.get(index).and_then(|e| e.value.as_ref()) {
            Some(value) => value,
            None => panic!("Index {} is not occupied", index),
        }
    }

    pub fn ref_count(&self, index: usize) -> u32 {
        assert!(self.is_occupied(index), "Index {} is not occupied", index);
        self.data[index].ref_count
    }

    /// Store `value` in a free slot with reference count 1 and return the slot index.
    ///
    /// Fails with [`BddError::OutOfMemory`] when the storage is full or the backing
    /// vector cannot grow; the storage is unchanged in that case.
    pub fn alloc(&mut self, value: T) -> Result<usize> {
        let free = (self.min_free..self.data.len()).find(|&i| !self.is_occupied(i));

        let index = match free {
            Some(i) => {
                self.data[i] = Entry {
                    value: Some(value),
                    ref_count: 1,
                };
                i
            }
            None => {
                if self.data.len() >= self.max_capacity {
                    return Err(BddError::OutOfMemory {
                        context: "node storage is full",
                    });
                }
                self.data.try_reserve(1).map_err(BddError::oom("node storage"))?;
                self.data.push(Entry {
                    value: Some(value),
                    ref_count: 1,
                });
                self.data.len() - 1
            }
        };

        self.min_free = index + 1;
        self.real_size += 1;

        Ok(index)
    }

    /// Increment the reference count of an occupied slot, returning the new count.
    pub fn retain(&mut self, index: usize) -> u32 {
        assert!(self.is_occupied(index), "Index {} is not occupied", index);
        let entry = &mut self.data[index];
        entry.ref_count += 1;
        entry.ref_count
    }

    /// Decrement the reference count of an occupied slot, returning the new count.
    ///
    /// The slot stays occupied at count zero until [`Storage::free`] is called.
    pub fn release(&mut self, index: usize) -> u32 {
        assert!(self.is_occupied(index), "Index {} is not occupied", index);
        let entry = &mut self.data[index];
        assert_ne!(entry.ref_count, 0, "Index {} is already released", index);
        entry.ref_count -= 1;
        entry.ref_count
    }

    /// Free the slot and hand back its value.
    pub fn free(&mut self, index: usize) -> T {
        let entry = &mut self.data[index];
        let value = match entry.value.take() {
            Some(value) => value,
            None => panic!("Index {} is not occupied", index),
        };
        entry.ref_count = 0;

        self.min_free = min(self.min_free, index);
        self.real_size -= 1;

        value
    }

    /// Iterate over occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.value.as_ref().map(|v| (i, v)))
    }
}
