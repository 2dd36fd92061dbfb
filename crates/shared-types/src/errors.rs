//! # Shared Error Types
//!
//! Failure values that cross the subsystem boundary: the module-signaled
//! result carried back through send/receive handlers, and wire-format
//! failures from datagram encoding and decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a module handler.
///
/// Modules identify failures by a numeric code within their own codespace;
/// the message is for operators, not for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("module error {code}: {message}")]
pub struct ModuleError {
    /// Module-defined failure code.
    pub code: u32,
    /// Human-readable failure description.
    pub message: String,
}

impl ModuleError {
    /// Create a module failure result.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure in the datagram wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// The type tag does not name a known datagram kind.
    #[error("unknown datagram type tag: {tag}")]
    UnknownType { tag: u8 },

    /// The bytes after the tag did not decode.
    #[error("malformed datagram bytes: {reason}")]
    Decode { reason: String },

    /// The datagram could not be encoded.
    #[error("datagram encoding failed: {reason}")]
    Encode { reason: String },
}
