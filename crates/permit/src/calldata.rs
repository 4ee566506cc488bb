//! ABI encoding of signed permits.
//!
//! The bridge's `bridgeAsset(..., permitData)` forwards `permitData` verbatim
//! to the token, so it has to be a complete `permit(...)` call including the
//! selector.

use crate::{
    error::PermitError,
    request::{PermitKind, PermitRequest},
    signature::PermitSignature,
    typed_data::SigningPayload,
};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use binding::{
    bridge::IPolygonZkEVMBridge,
    token::{IDaiPermit, IERC20Permit},
};

/// Encode the token's `permit(...)` call for a signed request.
///
/// The request must hash to the digest the signature was made over, otherwise
/// the token would see a signature for different fields.
pub fn permit_calldata(
    request: &PermitRequest,
    signature: &PermitSignature,
) -> Result<Bytes, PermitError> {
    if SigningPayload::new(request).digest != signature.digest {
        return Err(PermitError::invalid(
            "request does not match the signed permit",
        ));
    }

    let data = match request.kind {
        PermitKind::Dai => IDaiPermit::permitCall {
            holder: request.owner,
            spender: request.spender,
            nonce: request.nonce,
            expiry: request.deadline,
            allowed: request.value == U256::MAX,
            v: signature.v,
            r: signature.r,
            s: signature.s,
        }
        .abi_encode(),
        PermitKind::Eip2612 | PermitKind::Uni => IERC20Permit::permitCall {
            owner: request.owner,
            spender: request.spender,
            value: request.value,
            deadline: request.deadline,
            v: signature.v,
            r: signature.r,
            s: signature.s,
        }
        .abi_encode(),
    };

    Ok(data.into())
}

/// Parameters of a `bridgeAsset` deposit paid for with a permit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeDeposit {
    pub destination_network: u32,
    pub destination_address: Address,
    pub amount: U256,
    pub token: Address,
    pub force_update_global_exit_root: bool,
}

impl BridgeDeposit {
    /// Encode `bridgeAsset` with `permit_data` attached.
    pub fn calldata(&self, permit_data: Bytes) -> Bytes {
        IPolygonZkEVMBridge::bridgeAssetCall {
            destinationNetwork: self.destination_network,
            destinationAddress: self.destination_address,
            amount: self.amount,
            token: self.token,
            forceUpdateGlobalExitRoot: self.force_update_global_exit_root,
            permitData: permit_data,
        }
        .abi_encode()
        .into()
    }
}
