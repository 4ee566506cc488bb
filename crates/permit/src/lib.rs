//! Off-chain permit signatures for Polygon zkEVM bridge deposits.
//!
//! A [`PermitRequest`] describes an allowance an owner grants to a spender
//! (usually the bridge). [`PermitBuilder`] encodes it as EIP-712 typed data,
//! asks a [`PermitSigner`] to sign the digest and returns a
//! [`PermitSignature`] carrying `v`, `r`, `s` plus the exact payload that was
//! signed, so the caller can re-verify before submitting it.
//!
//! The builder holds no state between calls: the owner's nonce must be
//! fetched by the caller.

pub mod builder;
pub mod calldata;
pub mod error;
pub mod request;
pub mod signature;
pub mod signer;
pub mod typed_data;

pub use builder::{build_permit, PermitBuilder};
pub use error::{PermitError, SignerError};
pub use request::{PermitKind, PermitRequest};
pub use signature::PermitSignature;
pub use signer::PermitSigner;
pub use typed_data::SigningPayload;
