//! Cross-crate integration tests.
//!
//! These flows wire `crossway-relay` keepers over real `crossway-store`
//! backends, with the test driving the relayer role by hand: read a queued
//! datagram out of one zone's egress, submit it to the counterparty with a
//! proof.

pub mod relay_flows;
