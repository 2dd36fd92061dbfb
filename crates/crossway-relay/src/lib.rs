//! # Crossway Relay Engine
//!
//! Orders and relays datagrams between sovereign chains ("zones"). Each
//! chain runs this engine inside its state machine; off-chain relayers
//! ferry queued datagrams across and feed them back in with proofs.
//!
//! ## Purpose
//!
//! - Per-channel egress queues of outbound datagrams, indexed densely so
//!   relayers can page through them
//! - Per-channel ingress sequencing so inbound datagrams apply exactly
//!   once and in order
//! - Handler dispatch: module business logic runs inside a transactional
//!   store scope, with failure receipts surviving a rolled-back handler
//!
//! ## Module Structure
//!
//! ```text
//! crossway-relay/
//! ├── domain/          # Errors, key layout, channel/connection runtimes
//! ├── ports/           # RelayApi, handler and proof-verifier contracts
//! ├── application/     # RelayKeeper wiring it together
//! ├── config.rs        # RelayConfig
//! └── context.rs       # Execution context handed to handlers
//! ```
//!
//! All keeper state traffic flows through a gas-accounted store decorator;
//! the caller's meter pays for it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod context;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::keeper::RelayKeeper;
pub use config::RelayConfig;
pub use context::Context;
pub use domain::errors::RelayError;
pub use domain::runtime::{ChannelRuntime, ConnectionRuntime};
pub use ports::inbound::RelayApi;
pub use ports::outbound::{AcceptAllVerifier, ProofVerifier, ReceiveHandler, SendHandler};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
