//! Polygon zkEVM bridge contract bindings.

use alloy_sol_types::sol;

sol! {
    /// Polygon zkEVM bridge entrypoints that accept token permits
    interface IPolygonZkEVMBridge {
        /// Deposit tokens into the bridge.
        ///
        /// `permitData` is the ABI-encoded `permit(...)` call forwarded to the token
        /// so the deposit needs no prior `approve`.
        function bridgeAsset(
            uint32 destinationNetwork,
            address destinationAddress,
            uint256 amount,
            address token,
            bool forceUpdateGlobalExitRoot,
            bytes calldata permitData
        ) external payable;
    }
}
