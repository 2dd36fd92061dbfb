//! # Crossway Benchmarks
//!
//! Performance checks for the hot paths: metered store writes, the wire
//! codec, and the full send/receive relay round trip.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use crossway_relay::{Context, ReceiveHandler, RelayApi, RelayConfig, RelayKeeper, SendHandler};
use crossway_store::{GasConfig, GasMeter, GasStore, InfiniteGasMeter, KvStore, MemoryStore};
use shared_types::{
    ChainId, Datagram, DatagramType, Header, ModuleError, Payload, Proof, ReceiveMessage,
    SendMessage, Sequence,
};

// ============================================================================
// Metered store writes
// ============================================================================

fn bench_gas_store_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("gas-store");

    for size in [32usize, 256, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("set", size), &size, |b, &size| {
            let mut rng = rand::thread_rng();
            let meter = InfiniteGasMeter::new();
            let mut mem = MemoryStore::new();
            let value: Vec<u8> = (0..size).map(|_| rng.gen()).collect();
            let mut key = [0u8; 16];

            b.iter(|| {
                rng.fill(&mut key);
                let mut store = GasStore::new(&mut mem, &meter, GasConfig::default());
                store.set(&key, &value).expect("set");
                black_box(meter.consumed())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Wire codec
// ============================================================================

fn bench_wire_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire");

    for size in [64usize, 1024, 16384] {
        let datagram = Datagram::new(
            Header::new(ChainId::from("zone-a"), ChainId::from("zone-b")),
            Payload::Packet(vec![0x5a; size]),
        );
        let bytes = datagram.to_wire().expect("encode");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("to_wire", size),
            &datagram,
            |b, datagram| b.iter(|| black_box(datagram.to_wire().expect("encode"))),
        );
        group.bench_with_input(BenchmarkId::new("from_wire", size), &bytes, |b, bytes| {
            b.iter(|| black_box(Datagram::from_wire(bytes).expect("decode")))
        });
    }

    group.finish();
}

// ============================================================================
// Relay round trip
// ============================================================================

struct Approve;

impl SendHandler for Approve {
    fn on_send(&mut self, _payload: &Payload) -> Result<(), ModuleError> {
        Ok(())
    }
}

struct Consume;

impl ReceiveHandler for Consume {
    fn on_receive(
        &mut self,
        _ctx: &mut Context<'_>,
        payload: &Payload,
    ) -> (Option<Payload>, Result<(), ModuleError>) {
        black_box(payload);
        (None, Ok(()))
    }
}

fn bench_relay_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay");

    group.bench_function("send_receive_round_trip", |b| {
        let sender_keeper = RelayKeeper::new(RelayConfig::new(
            "relay",
            ChainId::from("zone-a"),
            GasConfig::default(),
        ));
        let receiver_keeper = RelayKeeper::new(RelayConfig::new(
            "relay",
            ChainId::from("zone-b"),
            GasConfig::default(),
        ));
        let meter = InfiniteGasMeter::new();
        let mut sender_store = MemoryStore::new();
        let mut receiver_store = MemoryStore::new();
        let zone_a = ChainId::from("zone-a");
        let zone_b = ChainId::from("zone-b");

        {
            let mut ctx = Context::new(&mut receiver_store, &meter);
            receiver_keeper
                .establish_connection(&mut ctx, &zone_a)
                .expect("establish");
        }

        let payload = vec![0xab; 128];
        let mut cursor = 0u64;

        b.iter(|| {
            {
                let mut ctx = Context::new(&mut sender_store, &meter);
                sender_keeper
                    .send(
                        &mut Approve,
                        &mut ctx,
                        SendMessage::new(Payload::Packet(payload.clone()), zone_b.clone()),
                    )
                    .expect("send");
            }

            let datagram = {
                let mut ctx = Context::new(&mut sender_store, &meter);
                sender_keeper
                    .egress_datagram(&mut ctx, DatagramType::Packet, &zone_b, cursor)
                    .expect("egress read")
                    .expect("datagram queued")
            };

            let mut ctx = Context::new(&mut receiver_store, &meter);
            receiver_keeper
                .receive(
                    &mut Consume,
                    &mut ctx,
                    ReceiveMessage::new(
                        datagram,
                        zone_a.clone(),
                        Proof::new(Sequence::new(cursor), vec![0u8; 32]),
                    ),
                )
                .expect("receive");
            cursor += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_gas_store_set,
    bench_wire_codec,
    bench_relay_round_trip
);
criterion_main!(benches);
