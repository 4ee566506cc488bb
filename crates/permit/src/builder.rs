//! Permit construction: validate, encode, sign, self-check.

use crate::{
    error::{PermitError, SignerError},
    request::PermitRequest,
    signature::PermitSignature,
    signer::PermitSigner,
    typed_data::SigningPayload,
};
use alloy_primitives::{uint, Signature, U256};
use std::future::Future;
use tracing::{debug, warn};

/// Builds permit signatures.
///
/// By default every signature is recovered against the digest before it is
/// returned and must resolve to `request.owner`.
#[derive(Debug, Clone, Copy)]
pub struct PermitBuilder {
    self_check: bool,
}

impl Default for PermitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PermitBuilder {
    pub const fn new() -> Self {
        Self { self_check: true }
    }

    /// Enable or disable the recovery check after signing.
    pub const fn self_check(mut self, enabled: bool) -> Self {
        self.self_check = enabled;
        self
    }

    /// Sign `request` with `signer`.
    pub async fn build<S>(
        &self,
        request: &PermitRequest,
        signer: &S,
    ) -> Result<PermitSignature, PermitError>
    where
        S: PermitSigner + ?Sized,
    {
        let payload = self.prepare(request)?;
        let raw = signer.sign_permit(&payload).await?;

        self.finish(request, raw, payload)
    }

    /// Like [`Self::build`], but gives up as soon as `cancel` resolves.
    ///
    /// The pending signing future is dropped on cancellation and the call
    /// fails with [`SignerError::Cancelled`].
    pub async fn build_until<S, C>(
        &self,
        request: &PermitRequest,
        signer: &S,
        cancel: C,
    ) -> Result<PermitSignature, PermitError>
    where
        S: PermitSigner + ?Sized,
        C: Future<Output = ()>,
    {
        let payload = self.prepare(request)?;

        let raw = tokio::select! {
            result = signer.sign_permit(&payload) => result?,
            () = cancel => {
                debug!(owner = %request.owner, "Permit signing cancelled");
                return Err(SignerError::Cancelled.into());
            }
        };

        self.finish(request, raw, payload)
    }

    fn prepare(&self, request: &PermitRequest) -> Result<SigningPayload, PermitError> {
        request.validate()?;

        let payload = SigningPayload::new(request);
        debug!(
            token = %request.token_address,
            chain_id = request.chain_id,
            owner = %request.owner,
            spender = %request.spender,
            kind = ?request.kind,
            digest = %payload.digest,
            "Signing permit"
        );

        Ok(payload)
    }

    fn finish(
        &self,
        request: &PermitRequest,
        raw: Signature,
        payload: SigningPayload,
    ) -> Result<PermitSignature, PermitError> {
        let signature = normalize(raw)?;
        let permit = PermitSignature::new(signature, payload);

        if self.self_check {
            let recovered = permit.recover().ok_or_else(|| {
                SignerError::Malformed("signature does not recover to any address".to_string())
            })?;

            if recovered != request.owner {
                warn!(
                    expected = %request.owner,
                    recovered = %recovered,
                    digest = %permit.digest,
                    "Permit signature recovers to the wrong address"
                );
                return Err(PermitError::VerificationMismatch {
                    expected: request.owner,
                    recovered,
                });
            }
        }

        Ok(permit)
    }
}

/// Build a permit with the default (self-checking) builder.
pub async fn build_permit<S>(
    request: &PermitRequest,
    signer: &S,
) -> Result<PermitSignature, PermitError>
where
    S: PermitSigner + ?Sized,
{
    PermitBuilder::new().build(request, signer).await
}

/// Order of the secp256k1 group.
const SECP256K1_ORDER: U256 =
    uint!(0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141_U256);

/// Reject degenerate signatures and move `s` into the lower half order (EIP-2).
///
/// `r` and `s` must lie in `[1, n)`.
fn normalize(signature: Signature) -> Result<Signature, SignerError> {
    if signature.r().is_zero() || signature.s().is_zero() {
        return Err(SignerError::Malformed("zero r or s".to_string()));
    }
    if signature.r() >= SECP256K1_ORDER || signature.s() >= SECP256K1_ORDER {
        return Err(SignerError::Malformed(
            "r or s outside the curve order".to_string(),
        ));
    }

    Ok(signature.normalize_s().unwrap_or(signature))
}
