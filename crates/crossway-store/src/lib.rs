//! # Crossway Store: Gas-Accounted State Storage
//!
//! Ordered key-value storage with deterministic gas accounting, as required
//! by a replicated state machine: every byte read or written is priced by a
//! fixed configuration so all validating replicas compute identical totals.
//!
//! ## Architecture
//!
//! - **Ports**: `KvStore` / `StoreIterator`, the ordered byte-store interface
//!   the host supplies and every decorator re-exposes
//! - **Domain**: gas meters, the gas-charging store decorator, and the
//!   copy-on-write overlay used for transactional execution scopes
//! - **Adapters**: in-memory ordered store for tests and light hosts
//!
//! ## Failure Model
//!
//! Backend failures are ordinary `Result` errors. Gas exhaustion is not: it
//! unwinds with a typed [`OutOfGas`] payload that the transaction boundary
//! catches via [`catch_out_of_gas`]. Contract violations (reading an
//! exhausted iterator, advancing it again) abort loudly and are never caught.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::memory::MemoryStore;
pub use config::GasConfig;
pub use domain::errors::StoreError;
pub use domain::gas::{
    catch_out_of_gas, desc, Gas, GasMeter, InfiniteGasMeter, OutOfGas, TxGasMeter,
};
pub use domain::gas_store::GasStore;
pub use domain::overlay::OverlayStore;
pub use ports::store::{KvStore, StoreIterator};
