//! # Relay Messages
//!
//! The two messages the relay keeper accepts from the surrounding message
//! router: an outbound send request from a local module and an inbound
//! datagram submission from a relayer process.

use serde::{Deserialize, Serialize};

use crate::datagram::{ChainId, Datagram, Payload, Proof};

/// Request from a local module to queue a payload for a counterparty chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    /// Payload to relay.
    pub payload: Payload,
    /// Chain the payload is addressed to.
    pub dest_chain: ChainId,
}

impl SendMessage {
    /// Create a send request.
    pub fn new(payload: Payload, dest_chain: ChainId) -> Self {
        Self {
            payload,
            dest_chain,
        }
    }
}

/// Relayer submission of a datagram observed on a counterparty chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveMessage {
    /// The relayed datagram.
    pub datagram: Datagram,
    /// Chain the datagram was observed on.
    pub src_chain: ChainId,
    /// Commitment proof for the datagram at its claimed sequence.
    pub proof: Proof,
}

impl ReceiveMessage {
    /// Create a receive submission.
    pub fn new(datagram: Datagram, src_chain: ChainId, proof: Proof) -> Self {
        Self {
            datagram,
            src_chain,
            proof,
        }
    }
}
