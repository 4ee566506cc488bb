//! On-chain reads the permit builder depends on but does not track itself.

use crate::ClientError;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use binding::token::IERC20Permit;
use tracing::debug;

/// Reads permit-related state from a token contract.
pub struct TokenReader<P> {
    provider: P,
}

impl<P> TokenReader<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Current permit nonce of `owner`, the value the next permit must carry.
    pub async fn permit_nonce(&self, token: Address, owner: Address) -> Result<U256, ClientError> {
        debug!("Querying permit nonce: token={}, owner={}", token, owner);

        let contract = IERC20Permit::new(token, &self.provider);
        contract
            .nonces(owner)
            .call()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))
    }

    /// Token `name()`, the domain `name` of most permit tokens.
    pub async fn token_name(&self, token: Address) -> Result<String, ClientError> {
        debug!("Querying token name: token={}", token);

        let contract = IERC20Permit::new(token, &self.provider);
        contract
            .name()
            .call()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))
    }

    /// Domain separator the token verifies permits against.
    pub async fn domain_separator(&self, token: Address) -> Result<B256, ClientError> {
        debug!("Querying DOMAIN_SEPARATOR: token={}", token);

        let contract = IERC20Permit::new(token, &self.provider);
        contract
            .DOMAIN_SEPARATOR()
            .call()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))
    }
}
