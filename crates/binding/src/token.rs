//! ERC20 permit token contract bindings.

use alloy_sol_types::sol;

sol! {
    /// ERC20 token with EIP-2612 permit support
    #[sol(rpc)]
    interface IERC20Permit {
        /// Approve spender via an off-chain owner signature
        function permit(
            address owner,
            address spender,
            uint256 value,
            uint256 deadline,
            uint8 v,
            bytes32 r,
            bytes32 s
        ) external;

        /// Current permit nonce of an owner
        function nonces(address owner) external view returns (uint256);

        /// EIP-712 domain separator of the token
        function DOMAIN_SEPARATOR() external view returns (bytes32);

        /// Get token name
        function name() external view returns (string memory);
    }
}

sol! {
    /// DAI-style permit token
    ///
    /// `nonces` and `DOMAIN_SEPARATOR` share their selectors with [`IERC20Permit`].
    interface IDaiPermit {
        /// Set or revoke an unlimited allowance via an off-chain holder signature
        function permit(
            address holder,
            address spender,
            uint256 nonce,
            uint256 expiry,
            bool allowed,
            uint8 v,
            bytes32 r,
            bytes32 s
        ) external;
    }
}
