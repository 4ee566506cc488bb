use crate::{error::SignerError, typed_data::SigningPayload};
use alloy_primitives::{Address, Signature};
use std::future::Future;

/// A capability that can sign a permit without exposing its key.
///
/// Every [`alloy_signer::Signer`] (local keys, hardware wallets) implements this
/// by signing the raw digest. Remote services may instead submit the typed-data
/// document from the payload.
pub trait PermitSigner: Send + Sync {
    /// Address whose key produces the signatures.
    fn address(&self) -> Address;

    /// Sign a permit payload.
    fn sign_permit(
        &self,
        payload: &SigningPayload,
    ) -> impl Future<Output = Result<Signature, SignerError>> + Send;
}

impl<S> PermitSigner for S
where
    S: alloy_signer::Signer + Send + Sync,
{
    fn address(&self) -> Address {
        alloy_signer::Signer::address(self)
    }

    async fn sign_permit(&self, payload: &SigningPayload) -> Result<Signature, SignerError> {
        self.sign_hash(&payload.digest)
            .await
            .map_err(|e| SignerError::Rejected(e.to_string()))
    }
}
