//! Domain logic: gas metering, the charging store decorator, and the
//! copy-on-write overlay.

pub mod errors;
pub mod gas;
pub mod gas_store;
pub mod overlay;
