//! # Relay Keeper
//!
//! Drives the relay protocol: Send queues outbound datagrams after the
//! module's handler approves them; Receive admits inbound datagrams
//! through connection, destination, proof, and sequence checks, advances
//! the ingress sequence, and dispatches to the handler by datagram type.
//!
//! Packet handlers run inside a transactional store scope. Their writes
//! commit only on success, but a receipt they emit is pushed underneath
//! the scope so a failed packet still notifies the counterparty.

use crossway_store::{GasStore, OverlayStore};
use shared_types::{ChainId, Datagram, DatagramType, Header, ReceiveMessage, SendMessage};
use tracing::info;

use crate::config::RelayConfig;
use crate::context::Context;
use crate::domain::errors::RelayError;
use crate::domain::runtime::{ChannelRuntime, ConnectionRuntime};
use crate::ports::inbound::RelayApi;
use crate::ports::outbound::{AcceptAllVerifier, ProofVerifier, ReceiveHandler, SendHandler};

// =============================================================================
// RELAY KEEPER
// =============================================================================

/// The relay engine's application service. One instance per host chain.
pub struct RelayKeeper {
    config: RelayConfig,
    verifier: Box<dyn ProofVerifier>,
}

impl RelayKeeper {
    /// Build a keeper that accepts every proof. Suitable for tests and for
    /// deployments where commitment verification happens upstream.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_verifier(config, Box::new(AcceptAllVerifier))
    }

    /// Build a keeper with an explicit proof verifier.
    pub fn with_verifier(config: RelayConfig, verifier: Box<dyn ProofVerifier>) -> Self {
        Self { config, verifier }
    }

    /// The keeper's configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Apply an inbound packet: run the handler in a transactional scope,
    /// queue any receipt underneath that scope, then commit or discard the
    /// handler's writes by its result.
    fn receive_packet(
        &self,
        handler: &mut dyn ReceiveHandler,
        ctx: &mut Context<'_>,
        datagram: Datagram,
        src_chain: ChainId,
    ) -> Result<(), RelayError> {
        let mut overlay = OverlayStore::new(&mut *ctx.store);
        let (receipt, handler_result) = {
            let mut scoped = Context::new(&mut overlay, ctx.meter);
            handler.on_receive(&mut scoped, datagram.payload())
        };

        if let Some(receipt_payload) = receipt {
            // The receipt must survive even when the handler's writes do
            // not, so it bypasses the overlay and lands on the store
            // underneath. Same channel as the inbound datagram, direction
            // inverted.
            let receipt_datagram =
                Datagram::new(datagram.header().inverse_direction(), receipt_payload);
            let meter = ctx.meter;
            let gas = self.config.gas;
            overlay.with_parent(|parent| {
                let mut store = GasStore::new(parent, meter, gas);
                let mut channel = ChannelRuntime::new(
                    &mut store,
                    datagram.payload().datagram_type(),
                    src_chain,
                );
                channel.push_egress(&receipt_datagram)
            })?;
        }

        if handler_result.is_ok() {
            overlay.commit()?;
            info!(
                codespace = %self.config.codespace,
                src = %datagram.header().src_chain,
                "inbound packet applied"
            );
        }
        handler_result.map_err(RelayError::Handler)
    }

    /// Apply an inbound receipt directly against the caller's store. A
    /// receipt acknowledges a datagram this chain already sent; its
    /// handler has no business failing or emitting further receipts, and
    /// doing so aborts the process.
    fn receive_receipt(
        &self,
        handler: &mut dyn ReceiveHandler,
        ctx: &mut Context<'_>,
        datagram: Datagram,
    ) -> Result<(), RelayError> {
        let (receipt, handler_result) = handler.on_receive(ctx, datagram.payload());
        if let Err(err) = handler_result {
            panic!("receipt handler must not fail: {err}");
        }
        if receipt.is_some() {
            panic!("receipt handler must not return a new receipt");
        }
        info!(
            codespace = %self.config.codespace,
            src = %datagram.header().src_chain,
            "inbound receipt applied"
        );
        Ok(())
    }
}

impl RelayApi for RelayKeeper {
    fn send(
        &self,
        handler: &mut dyn SendHandler,
        ctx: &mut Context<'_>,
        msg: SendMessage,
    ) -> Result<(), RelayError> {
        let SendMessage {
            payload,
            dest_chain,
        } = msg;

        // Handler veto happens before any state is touched.
        handler.on_send(&payload).map_err(RelayError::Handler)?;

        let datagram = Datagram::new(
            Header::new(self.config.chain_id.clone(), dest_chain.clone()),
            payload,
        );
        let mut store = GasStore::new(&mut *ctx.store, ctx.meter, self.config.gas);
        let mut channel = ChannelRuntime::new(
            &mut store,
            datagram.payload().datagram_type(),
            dest_chain,
        );
        channel.push_egress(&datagram)?;

        info!(
            codespace = %self.config.codespace,
            dest = %datagram.header().dest_chain,
            datagram_type = %datagram.payload().datagram_type(),
            "queued outbound datagram"
        );
        Ok(())
    }

    fn receive(
        &self,
        handler: &mut dyn ReceiveHandler,
        ctx: &mut Context<'_>,
        msg: ReceiveMessage,
    ) -> Result<(), RelayError> {
        let ReceiveMessage {
            datagram,
            src_chain,
            proof,
        } = msg;
        let datagram_type = datagram.payload().datagram_type();

        {
            let mut store = GasStore::new(&mut *ctx.store, ctx.meter, self.config.gas);

            let conn = ConnectionRuntime::new(&mut store, src_chain.clone());
            if !conn.established()? {
                return Err(RelayError::ConnNotEstablished {
                    counterparty: src_chain,
                });
            }

            if datagram.header().dest_chain != self.config.chain_id {
                return Err(RelayError::ChainMismatch {
                    host: self.config.chain_id.clone(),
                    dest: datagram.header().dest_chain.clone(),
                });
            }

            self.verifier.verify(&proof, &datagram)?;

            let mut channel = ChannelRuntime::new(&mut store, datagram_type, src_chain.clone());
            let expected = channel.ingress_sequence()?;
            if proof.sequence != expected {
                return Err(RelayError::InvalidSequence {
                    expected,
                    got: proof.sequence,
                });
            }
            // The sequence advances no matter what the handler does with
            // the datagram; a failed application must not be replayable.
            channel.set_ingress_sequence(expected.increment())?;
        }

        match datagram_type {
            DatagramType::Packet => self.receive_packet(handler, ctx, datagram, src_chain),
            DatagramType::Receipt => self.receive_receipt(handler, ctx, datagram),
        }
    }

    fn establish_connection(
        &self,
        ctx: &mut Context<'_>,
        counterparty: &ChainId,
    ) -> Result<(), RelayError> {
        let mut store = GasStore::new(&mut *ctx.store, ctx.meter, self.config.gas);
        let mut conn = ConnectionRuntime::new(&mut store, counterparty.clone());
        conn.set_established()?;
        info!(
            codespace = %self.config.codespace,
            counterparty = %counterparty,
            "connection established"
        );
        Ok(())
    }

    fn egress_length(
        &self,
        ctx: &mut Context<'_>,
        datagram_type: DatagramType,
        dest: &ChainId,
    ) -> Result<u64, RelayError> {
        let mut store = GasStore::new(&mut *ctx.store, ctx.meter, self.config.gas);
        let channel = ChannelRuntime::new(&mut store, datagram_type, dest.clone());
        channel.egress_length()
    }

    fn egress_datagram(
        &self,
        ctx: &mut Context<'_>,
        datagram_type: DatagramType,
        dest: &ChainId,
        index: u64,
    ) -> Result<Option<Datagram>, RelayError> {
        let mut store = GasStore::new(&mut *ctx.store, ctx.meter, self.config.gas);
        let channel = ChannelRuntime::new(&mut store, datagram_type, dest.clone());
        channel.egress_datagram(index)
    }
}

// =============================================================================
// TESTS
// =============================================================================
