//! Error types for the relay engine.
//!
//! Everything here is a reportable protocol failure: the caller gets a
//! structured reason and state stays consistent. Module contract
//! violations (a receipt handler failing or re-emitting) and gas
//! exhaustion are not in this enum; the former abort the process loudly
//! and the latter unwinds with `crossway_store::OutOfGas`.

use crossway_store::StoreError;
use shared_types::{ChainId, ModuleError, Sequence, WireError};
use thiserror::Error;

/// All reportable failures of relay operations.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// No connection to the counterparty chain has been established.
    #[error("connection to {counterparty} is not established")]
    ConnNotEstablished {
        /// The chain the datagram claims to come from.
        counterparty: ChainId,
    },

    /// The datagram is addressed to some other chain.
    #[error("datagram addressed to {dest}, host chain is {host}")]
    ChainMismatch {
        /// Identity of the chain this keeper runs on.
        host: ChainId,
        /// Destination named in the datagram header.
        dest: ChainId,
    },

    /// The datagram arrived out of order for its channel.
    #[error("invalid sequence: expected {expected}, got {got}")]
    InvalidSequence {
        /// Next sequence the channel will accept.
        expected: Sequence,
        /// Sequence the proof claimed.
        got: Sequence,
    },

    /// The wire bytes carried a type tag this engine does not know.
    #[error("unknown datagram type tag: {tag}")]
    UnknownDatagramType {
        /// The unrecognized tag byte.
        tag: u8,
    },

    /// The wire bytes could not be decoded as a datagram.
    #[error("malformed datagram: {reason}")]
    MalformedDatagram {
        /// What the decoder objected to.
        reason: String,
    },

    /// The commitment proof did not verify.
    #[error("proof rejected: {reason}")]
    ProofRejected {
        /// Why the verifier refused it.
        reason: String,
    },

    /// The module handler reported a failure.
    #[error("module handler failed: {0}")]
    Handler(ModuleError),

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<WireError> for RelayError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnknownType { tag } => RelayError::UnknownDatagramType { tag },
            WireError::Decode { .. } | WireError::Encode { .. } => RelayError::MalformedDatagram {
                reason: err.to_string(),
            },
        }
    }
}
