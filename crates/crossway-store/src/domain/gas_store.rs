//! # Gas-Accounted Store Decorator
//!
//! Wraps any [`KvStore`] and charges a shared [`GasMeter`] for every
//! operation before the operation touches the backing store. The charge is
//! a pure function of the [`GasConfig`] and the byte lengths involved, so
//! identical traffic against identical state consumes identical gas on
//! every replica.
//!
//! ## Charging model
//!
//! - `get`: flat charge up front, then per-byte on the returned value
//!   (a miss reads zero bytes)
//! - `set`: flat charge, then per-byte on key plus value, both before the
//!   write lands
//! - `delete` / `has`: flat charge up front
//! - iterators: a flat creation charge positions the cursor on the first
//!   element for free; each advance charges flat plus per-byte for the
//!   position it departs, so a full walk prices every element exactly once
//!
//! A failed charge unwinds mid-operation with [`crate::domain::gas::OutOfGas`]
//! and the backing store is left untouched by the aborted call.

use crate::config::GasConfig;
use crate::domain::errors::StoreError;
use crate::domain::gas::{desc, Gas, GasMeter};
use crate::ports::store::{KvStore, StoreIterator};

// =============================================================================
// GAS STORE
// =============================================================================

/// A [`KvStore`] decorator that meters every operation.
///
/// Borrows the backing store exclusively and the meter shared for the
/// duration of one execution scope. The pricing configuration is copied in,
/// so a scope's prices cannot change under it.
pub struct GasStore<'a, S: KvStore + ?Sized> {
    inner: &'a mut S,
    meter: &'a dyn GasMeter,
    config: GasConfig,
}

impl<'a, S: KvStore + ?Sized> GasStore<'a, S> {
    /// Wrap a backing store with a meter and pricing configuration.
    pub fn new(inner: &'a mut S, meter: &'a dyn GasMeter, config: GasConfig) -> Self {
        Self {
            inner,
            meter,
            config,
        }
    }
}

impl<'a, S: KvStore + ?Sized> KvStore for GasStore<'a, S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.meter.consume(self.config.read_cost_flat, desc::READ_FLAT);
        let value = self.inner.get(key)?;
        let read_bytes = value.as_ref().map_or(0, Vec::len) as Gas;
        self.meter
            .consume(self.config.read_cost_per_byte * read_bytes, desc::READ_PER_BYTE);
        Ok(value)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meter.consume(self.config.write_cost_flat, desc::WRITE_FLAT);
        let written_bytes = (key.len() + value.len()) as Gas;
        self.meter.consume(
            self.config.write_cost_per_byte * written_bytes,
            desc::WRITE_PER_BYTE,
        );
        self.inner.set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.meter.consume(self.config.delete_cost, desc::DELETE);
        self.inner.delete(key)
    }

    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.meter.consume(self.config.has_cost, desc::HAS);
        self.inner.has(key)
    }

    fn iter<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'b>, StoreError> {
        self.meter
            .consume(self.config.iter_create_cost, desc::ITER_CREATE);
        let inner = self.inner.iter(start, end)?;
        Ok(Box::new(GasIterator {
            inner,
            meter: self.meter,
            config: self.config,
        }))
    }

    fn iter_rev<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<Box<dyn StoreIterator + 'b>, StoreError> {
        self.meter
            .consume(self.config.iter_create_cost, desc::ITER_CREATE);
        let inner = self.inner.iter_rev(start, end)?;
        Ok(Box::new(GasIterator {
            inner,
            meter: self.meter,
            config: self.config,
        }))
    }
}

// =============================================================================
// GAS ITERATOR
// =============================================================================

/// Meters iterator advances; reads at the current position are free.
///
/// The per-byte step charge covers the position being departed, never the
/// one being arrived at. Advancing an exhausted iterator charges nothing
/// before hitting the cursor's own contract panic.
struct GasIterator<'a> {
    inner: Box<dyn StoreIterator + 'a>,
    meter: &'a dyn GasMeter,
    config: GasConfig,
}

impl StoreIterator for GasIterator<'_> {
    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn next(&mut self) {
        if self.inner.valid() {
            self.meter
                .consume(self.config.iter_step_cost_flat, desc::ITER_STEP_FLAT);
            let departed_bytes = (self.inner.key().len() + self.inner.value().len()) as Gas;
            self.meter.consume(
                self.config.iter_step_cost_per_byte * departed_bytes,
                desc::ITER_STEP_PER_BYTE,
            );
        }
        self.inner.next();
    }

    fn key(&self) -> &[u8] {
        self.inner.key()
    }

    fn value(&self) -> &[u8] {
        self.inner.value()
    }
}

// =============================================================================
// TESTS
// =============================================================================
