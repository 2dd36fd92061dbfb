//! Gas pricing configuration for store operations.

use serde::{Deserialize, Serialize};

use crate::domain::gas::Gas;

/// Per-operation-kind gas prices.
///
/// Every charge the store decorator makes is a pure function of these
/// values and the byte lengths involved, which keeps accounting identical
/// across replicas. The values are consensus parameters: changing them
/// changes every transaction's measured cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasConfig {
    /// Flat charge for every read.
    pub read_cost_flat: Gas,
    /// Charge per byte of the value a read returns (zero on a miss).
    pub read_cost_per_byte: Gas,
    /// Flat charge for every write.
    pub write_cost_flat: Gas,
    /// Charge per byte of key plus value written.
    pub write_cost_per_byte: Gas,
    /// Flat charge for a delete.
    pub delete_cost: Gas,
    /// Flat charge for an existence check.
    pub has_cost: Gas,
    /// Flat charge for creating an iterator.
    pub iter_create_cost: Gas,
    /// Flat charge for each iterator advance.
    pub iter_step_cost_flat: Gas,
    /// Charge per byte of key plus value at the position an advance departs.
    pub iter_step_cost_per_byte: Gas,
}

impl GasConfig {
    /// A configuration that charges nothing, for genesis writes and
    /// simulation contexts where accounting is not wanted.
    pub fn free() -> Self {
        Self {
            read_cost_flat: 0,
            read_cost_per_byte: 0,
            write_cost_flat: 0,
            write_cost_per_byte: 0,
            delete_cost: 0,
            has_cost: 0,
            iter_create_cost: 0,
            iter_step_cost_flat: 0,
            iter_step_cost_per_byte: 0,
        }
    }
}

impl Default for GasConfig {
    /// The reference pricing table. Under it, one Get (miss), Set, Get (hit),
    /// Delete, Get (miss) round trip on an 8-byte key with a 9-byte value
    /// consumes exactly 193 gas.
    fn default() -> Self {
        Self {
            read_cost_flat: 10,
            read_cost_per_byte: 1,
            write_cost_flat: 8,
            write_cost_per_byte: 8,
            delete_cost: 10,
            has_cost: 10,
            iter_create_cost: 10,
            iter_step_cost_flat: 15,
            iter_step_cost_per_byte: 1,
        }
    }
}
