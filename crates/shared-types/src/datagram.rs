//! # Datagram Data Model
//!
//! Defines the types relayed between zones: chain identities, directional
//! headers, the closed payload set, and the commitment proof accompanying
//! an inbound datagram.
//!
//! ## Wire Format
//!
//! A datagram travels (and is queued) as a single byte string:
//! a one-byte type tag followed by the bincode encoding of the header and
//! the payload data. Decoding is the only place an unknown type tag can
//! surface at runtime; everywhere else the payload set is closed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::WireError;

// =============================================================================
// IDENTITIES
// =============================================================================

/// Identity of an independently operated ledger.
///
/// Chain identifiers are free-form strings chosen at genesis; they namespace
/// every per-counterparty key the relay engine persists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(String);

impl ChainId {
    /// Create a chain identity from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChainId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ChainId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Monotonic per-channel message counter.
///
/// Each channel tracks the sequence number of the next datagram it will
/// accept; proofs carry the sequence number they claim to commit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Sequence(u64);

impl Sequence {
    /// Wrap a raw counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The next sequence number.
    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for Sequence {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// DATAGRAMS
// =============================================================================

/// Source and destination of a datagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    /// Chain the datagram originates from.
    pub src_chain: ChainId,
    /// Chain the datagram is addressed to.
    pub dest_chain: ChainId,
}

impl Header {
    /// Create a header for the given direction.
    pub fn new(src_chain: ChainId, dest_chain: ChainId) -> Self {
        Self {
            src_chain,
            dest_chain,
        }
    }

    /// The same channel viewed from the other end: source and destination
    /// swapped. Applying this twice returns the original header.
    pub fn inverse_direction(&self) -> Header {
        Header {
            src_chain: self.dest_chain.clone(),
            dest_chain: self.src_chain.clone(),
        }
    }
}

/// Discriminator for the closed set of payload kinds.
///
/// Tags are part of the wire format and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatagramType {
    /// A module-to-module message requiring application by the receiver.
    Packet,
    /// An acknowledgement of a previously applied packet.
    Receipt,
}

impl DatagramType {
    /// Stable wire tag for this type.
    pub fn tag(&self) -> u8 {
        match self {
            DatagramType::Packet => 0,
            DatagramType::Receipt => 1,
        }
    }

    /// Decode a wire tag.
    ///
    /// This is the only seam through which an unrecognized type can enter
    /// the engine; everything downstream matches exhaustively.
    pub fn from_tag(tag: u8) -> Result<Self, WireError> {
        match tag {
            0 => Ok(DatagramType::Packet),
            1 => Ok(DatagramType::Receipt),
            other => Err(WireError::UnknownType { tag: other }),
        }
    }
}

impl fmt::Display for DatagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatagramType::Packet => f.write_str("packet"),
            DatagramType::Receipt => f.write_str("receipt"),
        }
    }
}

/// Module data in transit, tagged with its kind.
///
/// The contained bytes are opaque to the relay engine; only the owning
/// module interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Packet data to be applied by the receiving module.
    Packet(Vec<u8>),
    /// Receipt data acknowledging a previously sent packet.
    Receipt(Vec<u8>),
}

impl Payload {
    /// The kind of datagram this payload travels as.
    pub fn datagram_type(&self) -> DatagramType {
        match self {
            Payload::Packet(_) => DatagramType::Packet,
            Payload::Receipt(_) => DatagramType::Receipt,
        }
    }

    /// The opaque module data.
    pub fn data(&self) -> &[u8] {
        match self {
            Payload::Packet(data) | Payload::Receipt(data) => data,
        }
    }
}

/// A routed unit of cross-zone communication: header plus payload.
///
/// Datagrams are immutable once constructed; the engine builds them at
/// send time and decodes them from queue entries and relayer submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datagram {
    header: Header,
    payload: Payload,
}

impl Datagram {
    /// Assemble a datagram.
    pub fn new(header: Header, payload: Payload) -> Self {
        Self { header, payload }
    }

    /// Routing header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Carried payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Encode to the wire format: `[tag][bincode(header, data)]`.
    pub fn to_wire(&self) -> Result<Vec<u8>, WireError> {
        let body =
            bincode::serialize(&(&self.header, self.payload.data())).map_err(|e| {
                WireError::Encode {
                    reason: e.to_string(),
                }
            })?;
        let mut bytes = Vec::with_capacity(1 + body.len());
        bytes.push(self.payload.datagram_type().tag());
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Decode from the wire format.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, WireError> {
        let (tag, body) = bytes.split_first().ok_or_else(|| WireError::Decode {
            reason: "empty datagram bytes".to_owned(),
        })?;
        let ty = DatagramType::from_tag(*tag)?;
        let (header, data): (Header, Vec<u8>) =
            bincode::deserialize(body).map_err(|e| WireError::Decode {
                reason: e.to_string(),
            })?;
        let payload = match ty {
            DatagramType::Packet => Payload::Packet(data),
            DatagramType::Receipt => Payload::Receipt(data),
        };
        Ok(Self { header, payload })
    }
}

/// Commitment proof accompanying an inbound datagram.
///
/// The engine interprets only the claimed sequence number; the commitment
/// bytes are passed through to the configured proof verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Sequence number this proof claims to commit.
    pub sequence: Sequence,
    /// Opaque commitment data (merkle path or similar).
    pub commitment: Vec<u8>,
}

impl Proof {
    /// Create a proof claim.
    pub fn new(sequence: Sequence, commitment: Vec<u8>) -> Self {
        Self {
            sequence,
            commitment,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
