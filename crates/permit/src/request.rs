use crate::error::PermitError;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Permit flavour implemented by the token contract.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermitKind {
    /// EIP-2612: `Permit(owner, spender, value, nonce, deadline)`.
    #[default]
    Eip2612,
    /// DAI: `Permit(holder, spender, nonce, expiry, allowed)`.
    ///
    /// The allowance is all-or-nothing, so `value` must be `0` or `U256::MAX`.
    Dai,
    /// UNI: EIP-2612 message, but the domain carries no `version`.
    Uni,
}

impl PermitKind {
    /// Whether the EIP-712 domain of this flavour includes `version`.
    pub const fn has_version(self) -> bool {
        !matches!(self, Self::Uni)
    }
}

/// Everything needed to sign a permit for one owner/spender pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitRequest {
    /// Permit token contract (the domain's `verifyingContract`)
    pub token_address: Address,
    /// Chain the permit is redeemable on
    pub chain_id: u64,
    /// Token holder granting the allowance
    pub owner: Address,
    /// Account allowed to spend
    pub spender: Address,
    /// Allowance amount
    pub value: U256,
    /// Owner's current on-chain permit nonce
    pub nonce: U256,
    /// Expiry timestamp in seconds
    pub deadline: U256,
    /// Domain `name`
    pub token_name: String,
    /// Domain `version`
    pub token_version: String,
    #[serde(default)]
    pub kind: PermitKind,
}

impl PermitRequest {
    /// Check construction-time preconditions.
    ///
    /// Past deadlines are accepted; freshness is enforced by the token at redemption.
    pub fn validate(&self) -> Result<(), PermitError> {
        if self.token_address.is_zero() {
            return Err(PermitError::invalid("token address is the zero address"));
        }
        if self.owner.is_zero() {
            return Err(PermitError::invalid("owner is the zero address"));
        }
        if self.spender.is_zero() {
            return Err(PermitError::invalid("spender is the zero address"));
        }
        if self.chain_id == 0 {
            return Err(PermitError::invalid("chain id must be non-zero"));
        }
        if self.token_name.is_empty() {
            return Err(PermitError::invalid("token name is empty"));
        }
        if self.kind.has_version() && self.token_version.is_empty() {
            return Err(PermitError::invalid("token version is empty"));
        }
        if self.kind == PermitKind::Dai && !self.value.is_zero() && self.value != U256::MAX {
            return Err(PermitError::invalid(format!(
                "dai permits only allow 0 or max value, got {}",
                self.value
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use alloy_primitives::address;

    pub fn wrapped_token_request(owner: Address) -> PermitRequest {
        PermitRequest {
            token_address: address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            chain_id: 1101,
            owner,
            spender: address!("0x2222222222222222222222222222222222222222"),
            value: U256::from(1_000_000_000_000_000_000u128),
            nonce: U256::ZERO,
            deadline: U256::from(9_999_999_999u64),
            token_name: "TokenWrapped".to_string(),
            token_version: "1".to_string(),
            kind: PermitKind::Eip2612,
        }
    }
}
