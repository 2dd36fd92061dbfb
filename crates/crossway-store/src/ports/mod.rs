//! Ports: the store interface supplied by the host and re-exposed by
//! every decorator in this crate.

pub mod store;
