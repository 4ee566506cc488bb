use ::config::{Layer, NetworkConfig, NetworkConfigBuilder, NetworkType};
use alloy_primitives::Address;
use permit::PermitKind;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

/// Top-level CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Network preset (mainnet or testnet)
    pub network: NetworkType,

    /// L1 RPC endpoint url, used to read nonces and domain separators
    #[serde(default)]
    pub l1_rpc_url: Option<String>,

    /// L2 RPC endpoint url
    #[serde(default)]
    pub l2_rpc_url: Option<String>,

    /// Signer-proxy url; when set, permits are signed remotely
    #[serde(default)]
    pub signer_proxy_url: Option<String>,

    /// Address served by the signer-proxy
    #[serde(default)]
    pub signer_address: Option<Address>,

    /// Override of the L2 chain id (local devnets)
    #[serde(default)]
    pub l2_chain_id: Option<u64>,

    /// Override of the L1 bridge address
    #[serde(default)]
    pub l1_bridge: Option<Address>,

    /// Override of the L2 bridge address
    #[serde(default)]
    pub l2_bridge: Option<Address>,

    /// Permit tokens by symbol
    #[serde(default)]
    pub tokens: BTreeMap<String, TokenConfig>,
}

/// A permit-capable token and its EIP-712 domain fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub address: Address,
    pub layer: Layer,
    /// Domain `name`
    pub name: String,
    /// Domain `version`
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub kind: PermitKind,
}

fn default_version() -> String {
    "1".to_string()
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Network preset with the configured overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        let mut builder = NetworkConfigBuilder::from_network_type(self.network);
        if let Some(chain_id) = self.l2_chain_id {
            builder = builder.zkevm_chain_id(chain_id);
        }
        if let Some(bridge) = self.l1_bridge {
            builder = builder.ethereum_bridge(bridge);
        }
        if let Some(bridge) = self.l2_bridge {
            builder = builder.zkevm_bridge(bridge);
        }
        builder.build()
    }

    /// Look up a token by symbol.
    pub fn token(&self, symbol: &str) -> eyre::Result<&TokenConfig> {
        self.tokens
            .get(symbol)
            .ok_or_else(|| eyre::eyre!("token {symbol} is not configured"))
    }

    /// RPC url of the given layer, if configured.
    pub fn rpc_url(&self, layer: Layer) -> Option<&str> {
        match layer {
            Layer::L1 => self.l1_rpc_url.as_deref(),
            Layer::L2 => self.l2_rpc_url.as_deref(),
        }
    }
}
