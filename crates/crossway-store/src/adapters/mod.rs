//! Adapters implementing the store ports.

pub mod memory;
