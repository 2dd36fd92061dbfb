//! # Store Ports (Driven Ports)
//!
//! The ordered key-value interface this crate's decorators wrap and
//! re-expose. The host application supplies the backing implementation;
//! [`crate::adapters::memory::MemoryStore`] serves tests and light hosts.
//!
//! The engine processes one message at a time on one thread, so these
//! traits deliberately carry no `Send + Sync` bounds: a store handle is
//! exclusively owned by a single execution context for the duration of a
//! message.

use std::ops::Bound;

use crate::domain::errors::StoreError;

/// Abstract interface for an ordered byte-key/byte-value store.
///
/// Keys iterate in ascending lexicographic byte order. Range arguments
/// follow the half-open convention `[start, end)` with `None` meaning
/// unbounded; a range with `start > end` is a caller error.
pub trait KvStore {
    /// Get the value stored under a key. Missing keys are `None`, never an
    /// error.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store a value under a key, replacing any previous value.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is a no-op.
    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError>;

    /// Check whether a key is present.
    fn has(&self, key: &[u8]) -> Result<bool, StoreError>;

    /// Iterate ascending over `[start, end)`.
    fn iter<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'a>, StoreError>;

    /// Iterate descending over `[start, end)`.
    fn iter_rev<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'a>, StoreError>;
}

/// Cursor over a key range.
///
/// A freshly created iterator is positioned on the first element of its
/// range (if any). Accessing `key`/`value` or advancing once `valid()` has
/// become false is a contract violation and panics; exhaustion is a state
/// the caller must check, not an error the iterator reports.
pub trait StoreIterator {
    /// Whether the cursor is on an element.
    fn valid(&self) -> bool;

    /// Advance to the next element. Panics if the iterator is exhausted.
    fn next(&mut self);

    /// Key at the current position. Panics if the iterator is exhausted.
    fn key(&self) -> &[u8];

    /// Value at the current position. Panics if the iterator is exhausted.
    fn value(&self) -> &[u8];
}

/// Translate optional range endpoints into `BTreeMap` range bounds:
/// inclusive start, exclusive end, `None` unbounded.
pub(crate) fn range_bounds<'a>(
    start: Option<&'a [u8]>,
    end: Option<&'a [u8]>,
) -> (Bound<&'a [u8]>, Bound<&'a [u8]>) {
    (
        start.map_or(Bound::Unbounded, Bound::Included),
        end.map_or(Bound::Unbounded, Bound::Excluded),
    )
}
