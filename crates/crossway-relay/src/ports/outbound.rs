//! # Outbound Ports (Driven Ports)
//!
//! Contracts the relay engine drives: module handlers carrying the
//! business logic behind payloads, and the commitment proof verifier.

use shared_types::{Datagram, ModuleError, Payload, Proof};

use crate::context::Context;
use crate::domain::errors::RelayError;

/// Module callback invoked by Send before a payload is queued outbound.
pub trait SendHandler {
    /// Validate and apply the module-side effects of sending `payload`.
    /// An `Err` vetoes the send; nothing is queued.
    fn on_send(&mut self, payload: &Payload) -> Result<(), ModuleError>;
}

/// Module callback invoked by Receive for each inbound payload.
///
/// For packets the context's store is a transactional view: writes made
/// through it are committed only when the returned result is `Ok`. The
/// optionally returned payload is queued back to the source chain as a
/// receipt regardless of the result. For receipts the handler must succeed
/// and must not return a payload; violating either contract is fatal.
pub trait ReceiveHandler {
    /// Apply `payload`, optionally emitting a receipt payload.
    fn on_receive(
        &mut self,
        ctx: &mut Context<'_>,
        payload: &Payload,
    ) -> (Option<Payload>, Result<(), ModuleError>);
}

/// Verifies that an inbound datagram is committed by the source chain at
/// the claimed sequence.
pub trait ProofVerifier {
    /// Check `proof` against `datagram`; an `Err` rejects the datagram
    /// before any state is touched.
    fn verify(&self, proof: &Proof, datagram: &Datagram) -> Result<(), RelayError>;
}

/// A verifier that accepts every proof.
///
/// Placeholder until light-client commitment verification is wired in;
/// hosts relaying real value must supply their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllVerifier;

impl ProofVerifier for AcceptAllVerifier {
    fn verify(&self, _proof: &Proof, _datagram: &Datagram) -> Result<(), RelayError> {
        Ok(())
    }
}
