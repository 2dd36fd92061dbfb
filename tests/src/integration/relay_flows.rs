//! # Relay Integration Flows
//!
//! Two zones, each running its own keeper over its own in-memory store, with
//! the test playing the relayer: read a queued datagram from one zone's
//! egress, submit it to the counterparty with a proof at the matching
//! sequence.
//!
//! ## Flows covered
//!
//! 1. **Packet round trip**: send on zone-a, deliver to zone-b, carry the
//!    acknowledgement receipt back to zone-a.
//! 2. **Refusal**: zone-b's module rejects a packet; its writes roll back
//!    while the failure receipt and the advanced sequence survive.
//! 3. **Ordering**: replayed and skipped sequences are refused.
//! 4. **Isolation**: opposite directions meter their sequences independently.

#[cfg(test)]
mod tests {
    use crate::init_tracing;

    use crossway_relay::{
        Context, ReceiveHandler, RelayApi, RelayConfig, RelayError, RelayKeeper, SendHandler,
    };
    use crossway_store::{GasConfig, InfiniteGasMeter, KvStore, MemoryStore};
    use shared_types::{
        ChainId, Datagram, DatagramType, ModuleError, Payload, Proof, ReceiveMessage, SendMessage,
        Sequence,
    };

    // ========================================================================
    // Test fixtures
    // ========================================================================

    /// One simulated zone: a relay keeper over its own in-memory store.
    struct Zone {
        keeper: RelayKeeper,
        store: MemoryStore,
        meter: InfiniteGasMeter,
    }

    impl Zone {
        fn new(chain_id: &str) -> Self {
            let config = RelayConfig::new("relay", ChainId::from(chain_id), GasConfig::default());
            Zone {
                keeper: RelayKeeper::new(config),
                store: MemoryStore::new(),
                meter: InfiniteGasMeter::new(),
            }
        }

        fn chain(&self) -> ChainId {
            self.keeper.config().chain_id.clone()
        }

        fn establish(&mut self, counterparty: &ChainId) {
            let mut ctx = Context::new(&mut self.store, &self.meter);
            self.keeper
                .establish_connection(&mut ctx, counterparty)
                .expect("establish connection");
        }

        fn send(
            &mut self,
            handler: &mut dyn SendHandler,
            payload: Payload,
            dest: &ChainId,
        ) -> Result<(), RelayError> {
            let mut ctx = Context::new(&mut self.store, &self.meter);
            self.keeper
                .send(handler, &mut ctx, SendMessage::new(payload, dest.clone()))
        }

        fn receive(
            &mut self,
            handler: &mut dyn ReceiveHandler,
            msg: ReceiveMessage,
        ) -> Result<(), RelayError> {
            let mut ctx = Context::new(&mut self.store, &self.meter);
            self.keeper.receive(handler, &mut ctx, msg)
        }

        fn egress_length(&mut self, datagram_type: DatagramType, dest: &ChainId) -> u64 {
            let mut ctx = Context::new(&mut self.store, &self.meter);
            self.keeper
                .egress_length(&mut ctx, datagram_type, dest)
                .expect("egress length")
        }

        fn egress_datagram(
            &mut self,
            datagram_type: DatagramType,
            dest: &ChainId,
            index: u64,
        ) -> Option<Datagram> {
            let mut ctx = Context::new(&mut self.store, &self.meter);
            self.keeper
                .egress_datagram(&mut ctx, datagram_type, dest, index)
                .expect("egress datagram")
        }
    }

    /// Deliver the datagram queued at `index` on `from`'s egress toward `to`,
    /// proving it at the matching sequence.
    fn relay_at(
        from: &mut Zone,
        to: &mut Zone,
        handler: &mut dyn ReceiveHandler,
        queue: DatagramType,
        index: u64,
    ) -> Result<(), RelayError> {
        let datagram = from
            .egress_datagram(queue, &to.chain(), index)
            .expect("datagram queued at index");
        let proof = Proof::new(Sequence::new(index), vec![0xcc; 8]);
        to.receive(handler, ReceiveMessage::new(datagram, from.chain(), proof))
    }

    /// Send-side module callback that approves every outbound payload.
    #[derive(Default)]
    struct ApprovingModule {
        approved: usize,
    }

    impl SendHandler for ApprovingModule {
        fn on_send(&mut self, _payload: &Payload) -> Result<(), ModuleError> {
            self.approved += 1;
            Ok(())
        }
    }

    /// Receive-side module callback backed by the receiving zone's store.
    ///
    /// Packets are applied under `app/` keys and acknowledged with an `ok:`
    /// receipt; payloads listed in `refuse` are rejected with a `fail:`
    /// receipt instead. Incoming receipts are recorded and never answered.
    #[derive(Default)]
    struct EchoModule {
        refuse: Vec<Vec<u8>>,
        packets: Vec<Vec<u8>>,
        receipts: Vec<Vec<u8>>,
    }

    impl EchoModule {
        fn refusing(data: &[u8]) -> Self {
            EchoModule {
                refuse: vec![data.to_vec()],
                ..EchoModule::default()
            }
        }
    }

    impl ReceiveHandler for EchoModule {
        fn on_receive(
            &mut self,
            ctx: &mut Context<'_>,
            payload: &Payload,
        ) -> (Option<Payload>, Result<(), ModuleError>) {
            match payload {
                Payload::Packet(data) => {
                    if self.refuse.contains(data) {
                        let mut receipt = b"fail:".to_vec();
                        receipt.extend_from_slice(data);
                        return (
                            Some(Payload::Receipt(receipt)),
                            Err(ModuleError::new(7, "payload refused")),
                        );
                    }
                    self.packets.push(data.clone());
                    let mut key = b"app/".to_vec();
                    key.extend_from_slice(data);
                    ctx.store.set(&key, data).expect("apply packet");
                    let mut receipt = b"ok:".to_vec();
                    receipt.extend_from_slice(data);
                    (Some(Payload::Receipt(receipt)), Ok(()))
                }
                Payload::Receipt(data) => {
                    self.receipts.push(data.clone());
                    (None, Ok(()))
                }
            }
        }
    }

    // ========================================================================
    // Flows
    // ========================================================================

    /// Happy path: packet out, acknowledgement receipt back.
    #[test]
    fn test_packet_round_trip_with_receipt() {
        init_tracing();
        let mut a = Zone::new("zone-a");
        let mut b = Zone::new("zone-b");
        a.establish(&b.chain());
        b.establish(&a.chain());

        // zone-a queues a packet for zone-b.
        let mut sender = ApprovingModule::default();
        a.send(&mut sender, Payload::Packet(b"ping".to_vec()), &b.chain())
            .expect("send");
        assert_eq!(sender.approved, 1);
        assert_eq!(a.egress_length(DatagramType::Packet, &b.chain()), 1);

        // The relayer delivers it; zone-b applies the packet and queues a
        // receipt on the channel the packet arrived on.
        let mut b_module = EchoModule::default();
        relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 0).expect("deliver packet");

        assert_eq!(b_module.packets, vec![b"ping".to_vec()]);
        assert_eq!(
            b.store.get(b"app/ping").expect("read"),
            Some(b"ping".to_vec())
        );
        assert_eq!(b.egress_length(DatagramType::Packet, &a.chain()), 1);

        // The relayer carries the receipt back; zone-a records it without
        // answering.
        let mut a_module = EchoModule::default();
        relay_at(&mut b, &mut a, &mut a_module, DatagramType::Packet, 0).expect("deliver receipt");

        assert_eq!(a_module.receipts, vec![b"ok:ping".to_vec()]);
        assert!(a_module.packets.is_empty());
        assert_eq!(
            a.egress_length(DatagramType::Packet, &b.chain()),
            1,
            "a delivered receipt must not queue anything new"
        );
    }

    /// A refused packet rolls back module writes but still produces a
    /// failure receipt, and the inbound sequence still advances.
    #[test]
    fn test_refused_packet_rolls_back_and_queues_failure_receipt() {
        init_tracing();
        let mut a = Zone::new("zone-a");
        let mut b = Zone::new("zone-b");
        a.establish(&b.chain());
        b.establish(&a.chain());

        let mut sender = ApprovingModule::default();
        a.send(&mut sender, Payload::Packet(b"forbidden".to_vec()), &b.chain())
            .expect("send");

        let mut b_module = EchoModule::refusing(b"forbidden");
        let result = relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 0);
        assert!(matches!(result, Err(RelayError::Handler(_))));

        // No module write landed, but the failure receipt is queued.
        assert_eq!(b.store.get(b"app/forbidden").expect("read"), None);
        assert_eq!(b.egress_length(DatagramType::Packet, &a.chain()), 1);

        // The failed delivery consumed its sequence: replaying it is refused.
        let replay = relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 0);
        assert!(matches!(
            replay,
            Err(RelayError::InvalidSequence { expected, got })
                if expected.value() == 1 && got.value() == 0
        ));

        // zone-a learns about the refusal from the receipt.
        let mut a_module = EchoModule::default();
        relay_at(&mut b, &mut a, &mut a_module, DatagramType::Packet, 0).expect("deliver receipt");
        assert_eq!(a_module.receipts, vec![b"fail:forbidden".to_vec()]);
    }

    /// Deliveries must follow the ingress sequence exactly.
    #[test]
    fn test_ordered_delivery_rejects_skips_and_replays() {
        init_tracing();
        let mut a = Zone::new("zone-a");
        let mut b = Zone::new("zone-b");
        b.establish(&a.chain());

        let mut sender = ApprovingModule::default();
        for payload in [&b"first"[..], b"second", b"third"] {
            a.send(&mut sender, Payload::Packet(payload.to_vec()), &b.chain())
                .expect("send");
        }
        assert_eq!(a.egress_length(DatagramType::Packet, &b.chain()), 3);

        let mut b_module = EchoModule::default();

        // Head of the queue delivers.
        relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 0).expect("deliver first");

        // Replaying the consumed datagram or skipping ahead is refused.
        assert!(relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 0).is_err());
        assert!(relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 2).is_err());

        // The remainder still delivers in order.
        relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 1).expect("deliver second");
        relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 2).expect("deliver third");

        let expected: Vec<Vec<u8>> = [&b"first"[..], b"second", b"third"]
            .iter()
            .map(|p| p.to_vec())
            .collect();
        assert_eq!(b_module.packets, expected);
    }

    /// Traffic in opposite directions lives on disjoint channels.
    #[test]
    fn test_bidirectional_channels_are_independent() {
        init_tracing();
        let mut a = Zone::new("zone-a");
        let mut b = Zone::new("zone-b");
        a.establish(&b.chain());
        b.establish(&a.chain());

        let mut sender = ApprovingModule::default();
        a.send(&mut sender, Payload::Packet(b"a-to-b".to_vec()), &b.chain())
            .expect("send a");
        b.send(&mut sender, Payload::Packet(b"b-to-a-1".to_vec()), &a.chain())
            .expect("send b");
        b.send(&mut sender, Payload::Packet(b"b-to-a-2".to_vec()), &a.chain())
            .expect("send b");

        assert_eq!(a.egress_length(DatagramType::Packet, &b.chain()), 1);
        assert_eq!(b.egress_length(DatagramType::Packet, &a.chain()), 2);

        // Each direction proves against its own ingress sequence.
        let mut a_module = EchoModule::default();
        let mut b_module = EchoModule::default();
        relay_at(&mut b, &mut a, &mut a_module, DatagramType::Packet, 0).expect("deliver b 0");
        relay_at(&mut a, &mut b, &mut b_module, DatagramType::Packet, 0).expect("deliver a 0");
        relay_at(&mut b, &mut a, &mut a_module, DatagramType::Packet, 1).expect("deliver b 1");

        assert_eq!(
            a_module.packets,
            vec![b"b-to-a-1".to_vec(), b"b-to-a-2".to_vec()]
        );
        assert_eq!(b_module.packets, vec![b"a-to-b".to_vec()]);
    }
}
