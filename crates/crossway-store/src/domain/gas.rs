//! # Gas Metering
//!
//! Meters measure the resource cost of store traffic for one transaction.
//! A meter is shared by plain reference between every store decorator in
//! the transaction's execution context; consumption goes through interior
//! mutability so the decorators never need a lock on this single-threaded
//! path.
//!
//! Exhaustion is not an error value. The transaction meter unwinds with a
//! typed [`OutOfGas`] payload, which keeps a half-applied operation from
//! continuing and leaves the meter unusable. The transaction boundary
//! catches the unwind with [`catch_out_of_gas`] and discards the scratch
//! state; any other panic keeps propagating because it signals a bug, not
//! exhaustion.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

/// Gas amounts and totals.
pub type Gas = u64;

/// Descriptors naming each charge site, carried in the [`OutOfGas`]
/// payload and useful in accounting traces.
pub mod desc {
    /// Flat read charge.
    pub const READ_FLAT: &str = "ReadFlat";
    /// Per-byte charge on a read's returned value.
    pub const READ_PER_BYTE: &str = "ReadPerByte";
    /// Flat write charge.
    pub const WRITE_FLAT: &str = "WriteFlat";
    /// Per-byte charge on a write's key and value.
    pub const WRITE_PER_BYTE: &str = "WritePerByte";
    /// Flat delete charge.
    pub const DELETE: &str = "Delete";
    /// Flat existence-check charge.
    pub const HAS: &str = "Has";
    /// Flat iterator-creation charge.
    pub const ITER_CREATE: &str = "IterCreate";
    /// Flat iterator-advance charge.
    pub const ITER_STEP_FLAT: &str = "IterStepFlat";
    /// Per-byte charge on the position an iterator advance departs.
    pub const ITER_STEP_PER_BYTE: &str = "IterStepPerByte";
}

/// Unwind payload for gas exhaustion.
///
/// Distinguishable from every other panic by type, so fee logic at the
/// transaction boundary can react to exhaustion (for example by charging
/// the full limit) without ever catching genuine bugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfGas {
    /// Charge site that crossed the limit.
    pub descriptor: &'static str,
    /// The meter's limit.
    pub limit: Gas,
    /// Total the failed charge would have brought consumption to.
    pub attempted: Gas,
}

/// Abstract interface for gas consumption tracking.
pub trait GasMeter {
    /// Add `amount` to the consumed total. Aborts the transaction by
    /// unwinding with an [`OutOfGas`] payload if the total passes the
    /// limit.
    fn consume(&self, amount: Gas, descriptor: &'static str);

    /// Total consumed so far. After an exhaustion abort this reports the
    /// attempted (over-limit) total, matching the [`OutOfGas`] payload.
    fn consumed(&self) -> Gas;

    /// The meter's limit.
    fn limit(&self) -> Gas;

    /// Whether consumption has passed the limit.
    fn is_past_limit(&self) -> bool;
}

/// The transaction gas meter: a fixed limit set from the transaction's fee.
///
/// The consumed total is recorded before the limit check, so the meter is
/// already past its limit when the abort unwinds and every later `consume`
/// aborts as well. A meter that has aborted once is done for good.
#[derive(Debug)]
pub struct TxGasMeter {
    limit: Gas,
    consumed: Cell<Gas>,
}

impl TxGasMeter {
    /// Create a meter with the given limit.
    pub fn new(limit: Gas) -> Self {
        Self {
            limit,
            consumed: Cell::new(0),
        }
    }
}

impl GasMeter for TxGasMeter {
    fn consume(&self, amount: Gas, descriptor: &'static str) {
        let attempted = self.consumed.get().saturating_add(amount);
        self.consumed.set(attempted);
        if attempted > self.limit {
            panic::panic_any(OutOfGas {
                descriptor,
                limit: self.limit,
                attempted,
            });
        }
    }

    fn consumed(&self) -> Gas {
        self.consumed.get()
    }

    fn limit(&self) -> Gas {
        self.limit
    }

    fn is_past_limit(&self) -> bool {
        self.consumed.get() > self.limit
    }
}

/// A meter that never aborts, for genesis and simulation contexts where
/// consumption is measured but not bounded.
#[derive(Debug, Default)]
pub struct InfiniteGasMeter {
    consumed: Cell<Gas>,
}

impl InfiniteGasMeter {
    /// Create an unbounded meter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GasMeter for InfiniteGasMeter {
    fn consume(&self, amount: Gas, _descriptor: &'static str) {
        self.consumed.set(self.consumed.get().saturating_add(amount));
    }

    fn consumed(&self) -> Gas {
        self.consumed.get()
    }

    fn limit(&self) -> Gas {
        Gas::MAX
    }

    fn is_past_limit(&self) -> bool {
        false
    }
}

/// Run `f`, converting a gas-exhaustion unwind into `Err(OutOfGas)`.
///
/// Any other panic is resumed untouched: contract violations stay fatal.
/// On `Err` the caller must discard whatever transaction state `f` was
/// mutating; the unwind may have interrupted a compound operation.
pub fn catch_out_of_gas<T>(f: impl FnOnce() -> T) -> Result<T, OutOfGas> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<OutOfGas>() {
            Ok(out_of_gas) => Err(*out_of_gas),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
