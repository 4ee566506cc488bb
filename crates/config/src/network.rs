//! Network configuration for Polygon zkEVM permits.
//!
//! Provides chain-specific addresses and parameters for different networks
//! (mainnet, testnet). A permit is only valid on the chain it was signed for,
//! so every token entry resolves its chain id through these presets.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Network type (mainnet or testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

/// Which side of the bridge a token lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    L1,
    L2,
}

impl Layer {
    /// The layer on the other side of the bridge.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::L1 => Self::L2,
            Self::L2 => Self::L1,
        }
    }
}

/// Ethereum (L1) network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthereumConfig {
    /// Chain ID
    pub chain_id: u64,
    /// PolygonZkEVMBridge deployment on L1
    pub bridge: Address,
    /// Bridge network identifier (0 for L1)
    pub network_id: u32,
}

impl EthereumConfig {
    /// Ethereum mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1,
            // https://etherscan.io/address/0x2a3DD3EB832aF982ec71669E178424b10Dca2EDe
            bridge: address!("0x2a3DD3EB832aF982ec71669E178424b10Dca2EDe"),
            network_id: 0,
        }
    }

    /// Ethereum Sepolia testnet configuration.
    pub const fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            // https://sepolia.etherscan.io/address/0x528e26b25a34a4A5d0dbDa1d57D318153d2ED582
            bridge: address!("0x528e26b25a34a4A5d0dbDa1d57D318153d2ED582"),
            network_id: 0,
        }
    }
}

/// Polygon zkEVM (L2) network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZkEvmConfig {
    /// Chain ID
    pub chain_id: u64,
    /// PolygonZkEVMBridge deployment on L2
    pub bridge: Address,
    /// Bridge network identifier
    pub network_id: u32,
}

impl ZkEvmConfig {
    /// Polygon zkEVM mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1101,
            // https://zkevm.polygonscan.com/address/0x2a3DD3EB832aF982ec71669E178424b10Dca2EDe
            bridge: address!("0x2a3DD3EB832aF982ec71669E178424b10Dca2EDe"),
            network_id: 1,
        }
    }

    /// Polygon zkEVM Cardona testnet configuration.
    pub const fn cardona() -> Self {
        Self {
            chain_id: 2442,
            bridge: address!("0x528e26b25a34a4A5d0dbDa1d57D318153d2ED582"),
            network_id: 1,
        }
    }
}

/// Complete network configuration for both sides of the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type (mainnet or testnet)
    pub network_type: NetworkType,
    /// Ethereum/L1 configuration
    pub ethereum: EthereumConfig,
    /// zkEVM/L2 configuration
    pub zkevm: ZkEvmConfig,
}

impl NetworkConfig {
    /// Create mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            ethereum: EthereumConfig::mainnet(),
            zkevm: ZkEvmConfig::mainnet(),
        }
    }

    /// Create testnet (Sepolia / Cardona) configuration.
    pub const fn testnet() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            ethereum: EthereumConfig::sepolia(),
            zkevm: ZkEvmConfig::cardona(),
        }
    }

    /// Chain ID of the given layer.
    pub const fn chain_id(&self, layer: Layer) -> u64 {
        match layer {
            Layer::L1 => self.ethereum.chain_id,
            Layer::L2 => self.zkevm.chain_id,
        }
    }

    /// Bridge address on the given layer, the usual permit spender.
    pub const fn bridge(&self, layer: Layer) -> Address {
        match layer {
            Layer::L1 => self.ethereum.bridge,
            Layer::L2 => self.zkevm.bridge,
        }
    }

    /// Bridge network identifier of the given layer.
    pub const fn network_id(&self, layer: Layer) -> u32 {
        match layer {
            Layer::L1 => self.ethereum.network_id,
            Layer::L2 => self.zkevm.network_id,
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    network_type: NetworkType,
    ethereum: EthereumConfig,
    zkevm: ZkEvmConfig,
}

impl NetworkConfigBuilder {
    /// Start with mainnet defaults.
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            ethereum: EthereumConfig::mainnet(),
            zkevm: ZkEvmConfig::mainnet(),
        }
    }

    /// Start with testnet defaults.
    pub const fn testnet() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            ethereum: EthereumConfig::sepolia(),
            zkevm: ZkEvmConfig::cardona(),
        }
    }

    /// Start from the defaults of a network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::testnet(),
        }
    }

    /// Override the L1 bridge address.
    pub const fn ethereum_bridge(mut self, address: Address) -> Self {
        self.ethereum.bridge = address;
        self
    }

    /// Override the L2 bridge address.
    pub const fn zkevm_bridge(mut self, address: Address) -> Self {
        self.zkevm.bridge = address;
        self
    }

    /// Override the L2 chain id (local devnets).
    pub const fn zkevm_chain_id(mut self, chain_id: u64) -> Self {
        self.zkevm.chain_id = chain_id;
        self
    }

    /// Build the network configuration.
    pub const fn build(self) -> NetworkConfig {
        NetworkConfig {
            network_type: self.network_type,
            ethereum: self.ethereum,
            zkevm: self.zkevm,
        }
    }
}
