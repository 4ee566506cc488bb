use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Contracts exported by the zkEVM contracts package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractName {
    PolygonZKEVMBridge,
    PolygonZKEVMGlobalExitRoot,
    PolygonZKEVMGlobalExitRootL2,
    PolygonZKEVM,
    TokenWrapped,
    Verifier,
    // Test variants
    PolygonZKEVMBridgeMock,
    ERC20PermitMock,
    PolygonZKEVMGlobalExitRootL2Mock,
    PolygonZKEVMGlobalExitRootMock,
    PolygonZKEVMMock,
    VerifierRollupHelperMock,
}

impl ContractName {
    pub const ALL: [Self; 12] = [
        Self::PolygonZKEVMBridge,
        Self::PolygonZKEVMGlobalExitRoot,
        Self::PolygonZKEVMGlobalExitRootL2,
        Self::PolygonZKEVM,
        Self::TokenWrapped,
        Self::Verifier,
        Self::PolygonZKEVMBridgeMock,
        Self::ERC20PermitMock,
        Self::PolygonZKEVMGlobalExitRootL2Mock,
        Self::PolygonZKEVMGlobalExitRootMock,
        Self::PolygonZKEVMMock,
        Self::VerifierRollupHelperMock,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PolygonZKEVMBridge => "PolygonZKEVMBridge",
            Self::PolygonZKEVMGlobalExitRoot => "PolygonZKEVMGlobalExitRoot",
            Self::PolygonZKEVMGlobalExitRootL2 => "PolygonZKEVMGlobalExitRootL2",
            Self::PolygonZKEVM => "PolygonZKEVM",
            Self::TokenWrapped => "TokenWrapped",
            Self::Verifier => "Verifier",
            Self::PolygonZKEVMBridgeMock => "PolygonZKEVMBridgeMock",
            Self::ERC20PermitMock => "ERC20PermitMock",
            Self::PolygonZKEVMGlobalExitRootL2Mock => "PolygonZKEVMGlobalExitRootL2Mock",
            Self::PolygonZKEVMGlobalExitRootMock => "PolygonZKEVMGlobalExitRootMock",
            Self::PolygonZKEVMMock => "PolygonZKEVMMock",
            Self::VerifierRollupHelperMock => "VerifierRollupHelperMock",
        }
    }

    /// Whether this is a mock used only in tests.
    pub const fn is_mock(self) -> bool {
        matches!(
            self,
            Self::PolygonZKEVMBridgeMock
                | Self::ERC20PermitMock
                | Self::PolygonZKEVMGlobalExitRootL2Mock
                | Self::PolygonZKEVMGlobalExitRootMock
                | Self::PolygonZKEVMMock
                | Self::VerifierRollupHelperMock
        )
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for names that are not exported contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContract(pub String);

impl fmt::Display for UnknownContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown contract: {}", self.0)
    }
}

impl std::error::Error for UnknownContract {}

impl FromStr for ContractName {
    type Err = UnknownContract;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownContract(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for name in ContractName::ALL {
            assert_eq!(name.to_string().parse::<ContractName>(), Ok(name));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "PolygonZkEVMBridge".parse::<ContractName>(),
            Err(UnknownContract("PolygonZkEVMBridge".to_string()))
        );
    }

    #[test]
    fn test_mocks() {
        assert!(ContractName::ERC20PermitMock.is_mock());
        assert!(!ContractName::TokenWrapped.is_mock());
        assert_eq!(
            ContractName::ALL
                .iter()
                .filter(|name| name.is_mock())
                .count(),
            6
        );
    }
}
