//! EIP-712 typed structs signed by permit holders.
//!
//! Both flavours are named `Permit` on-chain, so each lives in its own module.
//! The struct name and field order are part of the type hash.

/// EIP-2612 permit, also used by UNI-style tokens.
pub mod eip2612 {
    use alloy_sol_types::sol;

    sol! {
        /// `Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)`
        #[derive(Debug, PartialEq, Eq)]
        struct Permit {
            address owner;
            address spender;
            uint256 value;
            uint256 nonce;
            uint256 deadline;
        }
    }
}

/// DAI-style permit (boolean allowance instead of an amount).
pub mod dai {
    use alloy_sol_types::sol;

    sol! {
        /// `Permit(address holder,address spender,uint256 nonce,uint256 expiry,bool allowed)`
        #[derive(Debug, PartialEq, Eq)]
        struct Permit {
            address holder;
            address spender;
            uint256 nonce;
            uint256 expiry;
            bool allowed;
        }
    }
}
