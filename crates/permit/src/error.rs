use alloy_primitives::Address;
use thiserror::Error;

/// Failure reported by a signing capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The signer refused or failed to sign (e.g. user rejected a hardware prompt)
    #[error("signer rejected the request: {0}")]
    Rejected(String),

    /// The signer returned bytes that are not a usable ECDSA signature
    #[error("malformed signature: {0}")]
    Malformed(String),

    /// The signer could not be reached
    #[error("signer transport error: {0}")]
    Transport(String),

    /// The caller aborted before the signer answered
    #[error("signing cancelled")]
    Cancelled,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermitError {
    /// A request field failed validation
    #[error("invalid permit input: {0}")]
    InvalidInput(String),

    /// The signing capability could not produce a signature
    #[error("signing failed: {0}")]
    SigningFailure(#[from] SignerError),

    /// The produced signature does not recover to the permit owner
    #[error("signature recovers to {recovered}, expected owner {expected}")]
    VerificationMismatch {
        expected: Address,
        recovered: Address,
    },
}

impl PermitError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether repeating the same call could succeed.
    ///
    /// Only transport failures qualify; invalid input and mismatches are
    /// deterministic for a given request and signer.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SigningFailure(SignerError::Transport(_)))
    }
}
