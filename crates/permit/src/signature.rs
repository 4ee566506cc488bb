use crate::{calldata, error::PermitError, request::PermitRequest, typed_data::SigningPayload};
use alloy_primitives::{Address, Bytes, Signature, B256};
use serde::Serialize;
use serde_json::Value;

/// A signed permit together with the data it commits to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitSignature {
    /// Recovery id in Ethereum form (27 or 28)
    pub v: u8,
    pub r: B256,
    pub s: B256,
    pub domain_separator: B256,
    pub struct_hash: B256,
    /// Hash actually signed
    pub digest: B256,
    /// EIP-712 document equivalent to `digest`
    pub typed_data: Value,
    #[serde(skip)]
    signature: Signature,
}

impl PermitSignature {
    pub(crate) fn new(signature: Signature, payload: SigningPayload) -> Self {
        Self {
            v: 27 + u8::from(signature.v()),
            r: B256::from(signature.r().to_be_bytes::<32>()),
            s: B256::from(signature.s().to_be_bytes::<32>()),
            domain_separator: payload.domain_separator,
            struct_hash: payload.struct_hash,
            digest: payload.digest,
            typed_data: payload.typed_data,
            signature,
        }
    }

    /// Underlying ECDSA signature.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Compact `r || s || v` encoding.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.signature.as_bytes())
    }

    /// Recover the signing address from the digest.
    pub fn recover(&self) -> Option<Address> {
        self.signature
            .recover_address_from_prehash(&self.digest)
            .ok()
    }

    /// Check that the signature was produced by `owner`.
    pub fn verify(&self, owner: Address) -> bool {
        self.recover() == Some(owner)
    }

    /// ABI-encoded `permit(...)` call for the token, usable as bridge `permitData`.
    ///
    /// Fails if `request` is not the request this signature was built for.
    pub fn permit_calldata(&self, request: &PermitRequest) -> Result<Bytes, PermitError> {
        calldata::permit_calldata(request, self)
    }
}
