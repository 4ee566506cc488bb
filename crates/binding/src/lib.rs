//! Contract bindings for all external contracts.
//!
//! This crate consolidates the Solidity definitions used across the project:
//! - EIP-712 `Permit` structs for each supported permit flavour
//! - ERC20 permit token interfaces (EIP-2612 and DAI-style)
//! - Polygon zkEVM bridge entrypoints that consume permit data
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod bridge;
pub mod permit;
pub mod token;
