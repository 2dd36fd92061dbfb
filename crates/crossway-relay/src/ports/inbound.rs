//! # Inbound Ports
//!
//! API trait defining what the relay engine can do. Handlers are supplied
//! per call: the message's owning module hands its callbacks to the engine
//! rather than registering them up front.

use shared_types::{ChainId, Datagram, DatagramType, ReceiveMessage, SendMessage};

use crate::context::Context;
use crate::domain::errors::RelayError;
use crate::ports::outbound::{ReceiveHandler, SendHandler};

/// Relay API - inbound port.
pub trait RelayApi {
    /// Queue an outbound payload for a destination chain.
    ///
    /// The module's send handler runs first and can veto the send; on veto
    /// nothing is queued.
    fn send(
        &self,
        handler: &mut dyn SendHandler,
        ctx: &mut Context<'_>,
        msg: SendMessage,
    ) -> Result<(), RelayError>;

    /// Apply one inbound datagram: admission checks, ingress sequence
    /// advance, then handler dispatch by datagram type.
    fn receive(
        &self,
        handler: &mut dyn ReceiveHandler,
        ctx: &mut Context<'_>,
        msg: ReceiveMessage,
    ) -> Result<(), RelayError>;

    /// Mark the connection to a counterparty chain established.
    fn establish_connection(
        &self,
        ctx: &mut Context<'_>,
        counterparty: &ChainId,
    ) -> Result<(), RelayError>;

    /// Number of datagrams ever queued outbound on a channel.
    fn egress_length(
        &self,
        ctx: &mut Context<'_>,
        datagram_type: DatagramType,
        dest: &ChainId,
    ) -> Result<u64, RelayError>;

    /// Fetch one queued outbound datagram by index, `None` past the end.
    fn egress_datagram(
        &self,
        ctx: &mut Context<'_>,
        datagram_type: DatagramType,
        dest: &ChainId,
        index: u64,
    ) -> Result<Option<Datagram>, RelayError>;
}
