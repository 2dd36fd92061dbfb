//! Relay engine configuration.

use crossway_store::GasConfig;
use serde::{Deserialize, Serialize};
use shared_types::ChainId;

/// Configuration for a relay keeper instance.
///
/// One keeper serves one host chain; the host identity stamps the source
/// field of every outbound datagram header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Label identifying this engine in logs and error domains.
    pub codespace: String,
    /// Identity of the chain this keeper runs on.
    pub chain_id: ChainId,
    /// Gas pricing applied to the keeper's own state traffic.
    pub gas: GasConfig,
}

impl RelayConfig {
    /// Build a configuration.
    pub fn new(codespace: impl Into<String>, chain_id: ChainId, gas: GasConfig) -> Self {
        Self {
            codespace: codespace.into(),
            chain_id,
            gas,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            codespace: "relay".to_string(),
            chain_id: ChainId::from("localnet"),
            gas: GasConfig::default(),
        }
    }
}
