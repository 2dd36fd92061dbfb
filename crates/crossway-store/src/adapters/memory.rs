//! # In-Memory Store
//!
//! Ordered store backed by a `BTreeMap`. The reference backend for tests
//! and light hosts; the map's key order gives range iteration for free.

use std::collections::BTreeMap;

use crate::domain::errors::StoreError;
use crate::ports::store::{range_bounds, KvStore, StoreIterator};

/// An ordered key-value store held entirely in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.entries.contains_key(key))
    }

    fn iter<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'a>, StoreError> {
        let range = self.entries.range::<[u8], _>(range_bounds(start, end));
        Ok(Box::new(MemoryIterator::new(range)))
    }

    fn iter_rev<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'a>, StoreError> {
        let range = self.entries.range::<[u8], _>(range_bounds(start, end)).rev();
        Ok(Box::new(MemoryIterator::new(range)))
    }
}

/// Cursor over a `BTreeMap` range, in either direction.
struct MemoryIterator<'a, I>
where
    I: Iterator<Item = (&'a Vec<u8>, &'a Vec<u8>)>,
{
    entries: I,
    current: Option<(&'a Vec<u8>, &'a Vec<u8>)>,
}

impl<'a, I> MemoryIterator<'a, I>
where
    I: Iterator<Item = (&'a Vec<u8>, &'a Vec<u8>)>,
{
    fn new(mut entries: I) -> Self {
        let current = entries.next();
        Self { entries, current }
    }
}

impl<'a, I> StoreIterator for MemoryIterator<'a, I>
where
    I: Iterator<Item = (&'a Vec<u8>, &'a Vec<u8>)>,
{
    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) {
        if self.current.is_none() {
            panic!("iterator is exhausted");
        }
        self.current = self.entries.next();
    }

    fn key(&self) -> &[u8] {
        match self.current {
            Some((key, _)) => key,
            None => panic!("iterator is exhausted"),
        }
    }

    fn value(&self) -> &[u8] {
        match self.current {
            Some((_, value)) => value,
            None => panic!("iterator is exhausted"),
        }
    }
}
