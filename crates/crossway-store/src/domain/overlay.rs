//! # Copy-on-Write Overlay
//!
//! An [`OverlayStore`] buffers writes on top of a parent store. Reads fall
//! through to the parent where the buffer is silent; writes and deletes
//! land only in the buffer. Calling [`OverlayStore::commit`] flushes the
//! buffer into the parent in one pass; dropping the overlay discards it.
//!
//! This is the transactional scope used around message execution: run the
//! handler against the overlay, commit on success, drop on failure, and
//! the parent never observes a half-applied message.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::errors::StoreError;
use crate::ports::store::{range_bounds, KvStore, StoreIterator};

// =============================================================================
// OVERLAY STORE
// =============================================================================

/// A write buffer over a parent store.
///
/// The buffer maps keys to `Some(value)` for pending writes and `None` for
/// pending deletes (tombstones). The latest write per key wins; earlier
/// buffered states of the same key leave no trace.
pub struct OverlayStore<'a, S: KvStore + ?Sized> {
    parent: &'a mut S,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a, S: KvStore + ?Sized> OverlayStore<'a, S> {
    /// Open an overlay scope over `parent`.
    pub fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
        }
    }

    /// Flush every buffered write and delete into the parent, in ascending
    /// key order, consuming the overlay. On error the parent may hold a
    /// prefix of the buffer; callers treat that as a backend failure of the
    /// surrounding transaction.
    pub fn commit(self) -> Result<(), StoreError> {
        let OverlayStore { parent, writes } = self;
        for (key, entry) in writes {
            match entry {
                Some(value) => parent.set(&key, &value)?,
                None => parent.delete(&key)?,
            }
        }
        Ok(())
    }

    /// Run `f` directly against the parent store, bypassing the buffer.
    ///
    /// Writes made this way are durable regardless of whether the overlay
    /// later commits, and reads through it do not see buffered writes.
    /// This is the escape hatch for effects that must survive a discarded
    /// scope, such as queueing a failure notification.
    pub fn with_parent<T>(&mut self, f: impl FnOnce(&mut S) -> T) -> T {
        f(&mut *self.parent)
    }
}

impl<'a, S: KvStore + ?Sized> KvStore for OverlayStore<'a, S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        match self.writes.get(key) {
            Some(entry) => Ok(entry.clone()),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        // Tombstone even if the parent has no such key; an extra delete on
        // commit is a no-op.
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        match self.writes.get(key) {
            Some(entry) => Ok(entry.is_some()),
            None => self.parent.has(key),
        }
    }

    fn iter<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'b>, StoreError> {
        let parent = self.parent.iter(start, end)?;
        let buffered: BufferedRange<'b> =
            Box::new(self.writes.range::<[u8], _>(range_bounds(start, end)));
        Ok(Box::new(MergeIterator::new(parent, buffered, false)))
    }

    fn iter_rev<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'b>, StoreError> {
        let parent = self.parent.iter_rev(start, end)?;
        let buffered: BufferedRange<'b> =
            Box::new(self.writes.range::<[u8], _>(range_bounds(start, end)).rev());
        Ok(Box::new(MergeIterator::new(parent, buffered, true)))
    }
}

// =============================================================================
// MERGE ITERATOR
// =============================================================================

type BufferedRange<'a> = Box<dyn Iterator<Item = (&'a Vec<u8>, &'a Option<Vec<u8>>)> + 'a>;

/// Which source supplies the next merged element.
enum Pick {
    Exhausted,
    Parent,
    Buffered,
    /// Same key on both sides: the buffer shadows the parent.
    Both,
}

/// Merges the parent's range cursor with the overlay's buffered range,
/// yielding each key once in iteration order. Buffered entries shadow
/// parent entries with the same key; tombstones suppress them entirely.
struct MergeIterator<'a> {
    parent: Box<dyn StoreIterator + 'a>,
    buffered: std::iter::Peekable<BufferedRange<'a>>,
    current: Option<(Vec<u8>, Vec<u8>)>,
    reverse: bool,
}

impl<'a> MergeIterator<'a> {
    fn new(
        parent: Box<dyn StoreIterator + 'a>,
        buffered: BufferedRange<'a>,
        reverse: bool,
    ) -> Self {
        let mut merged = Self {
            parent,
            buffered: buffered.peekable(),
            current: None,
            reverse,
        };
        merged.advance();
        merged
    }

    /// Decide which source is next without consuming either. Only touches
    /// `buffered` through `peek` and `parent` through reads, so the two
    /// field borrows stay disjoint.
    fn pick(&mut self) -> Pick {
        let parent_live = self.parent.valid();
        match self.buffered.peek() {
            None if parent_live => Pick::Parent,
            None => Pick::Exhausted,
            Some(_) if !parent_live => Pick::Buffered,
            Some((buffered_key, _)) => {
                let ordering = buffered_key.as_slice().cmp(self.parent.key());
                let ordering = if self.reverse {
                    ordering.reverse()
                } else {
                    ordering
                };
                match ordering {
                    Ordering::Less => Pick::Buffered,
                    Ordering::Equal => Pick::Both,
                    Ordering::Greater => Pick::Parent,
                }
            }
        }
    }

    /// Move `current` to the next merged element, skipping tombstones.
    fn advance(&mut self) {
        self.current = loop {
            let picked = self.pick();
            match picked {
                Pick::Exhausted => break None,
                Pick::Parent => {
                    let pair = (self.parent.key().to_vec(), self.parent.value().to_vec());
                    self.parent.next();
                    break Some(pair);
                }
                Pick::Buffered | Pick::Both => {
                    if matches!(picked, Pick::Both) {
                        // Shadowed: the parent's element at this key is
                        // skipped whether the buffer writes or deletes it.
                        self.parent.next();
                    }
                    match self.buffered.next() {
                        Some((key, Some(value))) => break Some((key.clone(), value.clone())),
                        // Tombstone: nothing to yield at this key.
                        _ => continue,
                    }
                }
            }
        };
    }
}

impl StoreIterator for MergeIterator<'_> {
    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) {
        if self.current.is_none() {
            panic!("iterator is exhausted");
        }
        self.advance();
    }

    fn key(&self) -> &[u8] {
        match &self.current {
            Some((key, _)) => key,
            None => panic!("iterator is exhausted"),
        }
    }

    fn value(&self) -> &[u8] {
        match &self.current {
            Some((_, value)) => value,
            None => panic!("iterator is exhausted"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
