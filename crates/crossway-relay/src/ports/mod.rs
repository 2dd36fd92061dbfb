//! Ports: the engine's API surface and the contracts it drives.

pub mod inbound;
pub mod outbound;
