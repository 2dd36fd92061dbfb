//! # Shared Types Crate
//!
//! This crate contains the data model shared by the relay engine and the
//! storage subsystem: chain identities, datagram headers and payloads,
//! commitment proofs, and the module-facing message/result types.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Closed Payload Set**: `Payload` is a closed enumeration; dispatch is
//!   exhaustive and only the wire-decode seam can observe an unknown type tag.
//! - **Opaque Module Data**: Payload contents are byte blobs owned by the
//!   sending/receiving modules; the engine never interprets them.

pub mod datagram;
pub mod errors;
pub mod messages;

pub use datagram::{ChainId, Datagram, DatagramType, Header, Payload, Proof, Sequence};
pub use errors::{ModuleError, WireError};
pub use messages::{ReceiveMessage, SendMessage};
