//! Configuration types for the zkEVM permit toolkit.
//!
//! This crate provides:
//! - Network configurations (mainnet, testnet)
//! - Bridge addresses and chain ids for both layers

pub mod network;

pub use network::{
    EthereumConfig, Layer, NetworkConfig, NetworkConfigBuilder, NetworkType, ZkEvmConfig,
};
