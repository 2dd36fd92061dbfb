//! # Channel and Connection Runtimes
//!
//! A channel is the ordered lane for one datagram type between this chain
//! and one counterparty. Per channel the engine persists an egress queue
//! (densely indexed wire-encoded datagrams plus a length counter) and the
//! next expected ingress sequence. A connection is the per-counterparty
//! marker that inbound traffic is admitted at all.
//!
//! Counters and queue entries are engine-owned state: if their bytes do
//! not decode, the store is corrupt and the runtime aborts rather than
//! guessing.

use crossway_store::KvStore;
use shared_types::{ChainId, Datagram, DatagramType, Sequence};
use tracing::debug;

use crate::domain::errors::RelayError;
use crate::domain::keys;

/// Decode an engine-owned big-endian counter.
fn decode_counter(bytes: &[u8], what: &str) -> u64 {
    match <[u8; 8]>::try_from(bytes) {
        Ok(raw) => u64::from_be_bytes(raw),
        Err(_) => panic!(
            "corrupt {what} counter: expected 8 bytes, found {}",
            bytes.len()
        ),
    }
}

// =============================================================================
// CHANNEL RUNTIME
// =============================================================================

/// State access for one (datagram type, counterparty) channel.
pub struct ChannelRuntime<'a, S: KvStore + ?Sized> {
    store: &'a mut S,
    datagram_type: DatagramType,
    counterparty: ChainId,
}

impl<'a, S: KvStore + ?Sized> ChannelRuntime<'a, S> {
    /// Bind a channel to a store handle.
    pub fn new(store: &'a mut S, datagram_type: DatagramType, counterparty: ChainId) -> Self {
        Self {
            store,
            datagram_type,
            counterparty,
        }
    }

    /// Next inbound sequence this channel will accept. A channel with no
    /// recorded sequence starts at zero.
    pub fn ingress_sequence(&self) -> Result<Sequence, RelayError> {
        let key = keys::ingress_sequence(self.datagram_type, &self.counterparty);
        Ok(match self.store.get(&key)? {
            Some(bytes) => Sequence::new(decode_counter(&bytes, "ingress sequence")),
            None => Sequence::new(0),
        })
    }

    /// Record the next inbound sequence to accept.
    pub fn set_ingress_sequence(&mut self, sequence: Sequence) -> Result<(), RelayError> {
        let key = keys::ingress_sequence(self.datagram_type, &self.counterparty);
        self.store.set(&key, &sequence.value().to_be_bytes())?;
        Ok(())
    }

    /// Number of datagrams ever queued on this channel's egress side.
    pub fn egress_length(&self) -> Result<u64, RelayError> {
        let key = keys::egress_length(self.datagram_type, &self.counterparty);
        Ok(match self.store.get(&key)? {
            Some(bytes) => decode_counter(&bytes, "egress length"),
            None => 0,
        })
    }

    /// Fetch one queued egress datagram by index. `None` past the end.
    pub fn egress_datagram(&self, index: u64) -> Result<Option<Datagram>, RelayError> {
        let key = keys::egress_entry(self.datagram_type, &self.counterparty, index);
        match self.store.get(&key)? {
            Some(bytes) => match Datagram::from_wire(&bytes) {
                Ok(datagram) => Ok(Some(datagram)),
                Err(err) => panic!("corrupt egress datagram at index {index}: {err}"),
            },
            None => Ok(None),
        }
    }

    /// Append a datagram to the egress queue: write the entry at the
    /// current length, then bump the length.
    pub fn push_egress(&mut self, datagram: &Datagram) -> Result<(), RelayError> {
        let index = self.egress_length()?;
        let entry_key = keys::egress_entry(self.datagram_type, &self.counterparty, index);
        let bytes = datagram.to_wire()?;
        self.store.set(&entry_key, &bytes)?;
        let length_key = keys::egress_length(self.datagram_type, &self.counterparty);
        self.store.set(&length_key, &(index + 1).to_be_bytes())?;
        debug!(
            datagram_type = %self.datagram_type,
            counterparty = %self.counterparty,
            index,
            key = %hex::encode(&entry_key),
            "queued egress datagram"
        );
        Ok(())
    }
}

// =============================================================================
// CONNECTION RUNTIME
// =============================================================================

/// State access for the connection marker of one counterparty chain.
pub struct ConnectionRuntime<'a, S: KvStore + ?Sized> {
    store: &'a mut S,
    counterparty: ChainId,
}

impl<'a, S: KvStore + ?Sized> ConnectionRuntime<'a, S> {
    /// Bind to a store handle.
    pub fn new(store: &'a mut S, counterparty: ChainId) -> Self {
        Self {
            store,
            counterparty,
        }
    }

    /// Whether a connection to the counterparty has been established.
    pub fn established(&self) -> Result<bool, RelayError> {
        let key = keys::connection_established(&self.counterparty);
        Ok(self.store.has(&key)?)
    }

    /// Mark the connection established. Idempotent.
    pub fn set_established(&mut self) -> Result<(), RelayError> {
        let key = keys::connection_established(&self.counterparty);
        self.store.set(&key, &[1])?;
        debug!(counterparty = %self.counterparty, "connection established");
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
