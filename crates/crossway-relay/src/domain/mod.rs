//! Domain logic: error taxonomy, persisted key layout, and the channel and
//! connection runtimes.

pub mod errors;
pub mod keys;
pub mod runtime;
