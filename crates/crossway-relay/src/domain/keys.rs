//! Persisted key layout for relay state.
//!
//! All engine state lives under the `relay/` namespace, keyed by datagram
//! type and counterparty chain:
//!
//! ```text
//! relay/egress/<type>/<chain>/<index>      queued outbound datagram (wire bytes)
//! relay/egress/<type>/<chain>/len          egress queue length (u64, big-endian)
//! relay/ingress/<type>/<chain>             next expected inbound sequence (u64, big-endian)
//! relay/connection/<chain>/established     connection marker
//! ```
//!
//! Queue indices are fixed-width big-endian so entry keys sort in numeric
//! order. Chain identifiers are expected to be path-safe; a host admitting
//! `/` into chain names gets overlapping namespaces.

use shared_types::{ChainId, DatagramType};

/// Key of the egress queue length counter for a channel.
pub fn egress_length(datagram_type: DatagramType, chain: &ChainId) -> Vec<u8> {
    format!("relay/egress/{datagram_type}/{chain}/len").into_bytes()
}

/// Key of one egress queue entry.
pub fn egress_entry(datagram_type: DatagramType, chain: &ChainId, index: u64) -> Vec<u8> {
    let mut key = format!("relay/egress/{datagram_type}/{chain}/").into_bytes();
    key.extend_from_slice(&index.to_be_bytes());
    key
}

/// Key of the next expected ingress sequence for a channel.
pub fn ingress_sequence(datagram_type: DatagramType, chain: &ChainId) -> Vec<u8> {
    format!("relay/ingress/{datagram_type}/{chain}").into_bytes()
}

/// Key of the connection marker for a counterparty chain.
pub fn connection_established(chain: &ChainId) -> Vec<u8> {
    format!("relay/connection/{chain}/established").into_bytes()
}
