//! Application layer: the keeper orchestrating runtimes, handlers, and
//! proof verification.

pub mod keeper;
