//! Execution context for relay operations.

use crossway_store::{GasMeter, KvStore};

/// The mutable environment one message executes in: a store handle and the
/// transaction's gas meter.
///
/// The keeper wraps `store` in its own gas-charging decorator for engine
/// state traffic. Module handlers receive the same context (with the store
/// swapped for a transactional view where the protocol calls for one) and
/// wrap it the same way if their own traffic is metered.
pub struct Context<'a> {
    /// Store backing this execution scope.
    pub store: &'a mut dyn KvStore,
    /// Meter charged for all metered traffic in this scope.
    pub meter: &'a dyn GasMeter,
}

impl<'a> Context<'a> {
    /// Assemble a context from its parts.
    pub fn new(store: &'a mut dyn KvStore, meter: &'a dyn GasMeter) -> Self {
        Self { store, meter }
    }
}
