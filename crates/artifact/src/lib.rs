//! Typed registry of the zkEVM contract build artifacts.
//!
//! Artifacts are Hardhat-style JSON files (`<ContractName>.json`) holding the
//! ABI and deployment bytecode of a compiled contract. They are loaded once
//! and then looked up by name; unknown or missing names are reported as
//! [`ArtifactError::NotFound`].

mod name;

pub use name::ContractName;

use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ArtifactError {
    /// No artifact is registered under the requested name
    #[error("artifact not found: {0}")]
    NotFound(String),

    /// Error reading an artifact file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The artifact file is not valid artifact JSON
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Compiled contract: interface description plus deployment code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    #[serde(default)]
    pub deployed_bytecode: Option<Bytes>,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse an artifact file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&contents).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether the artifact is an interface or abstract contract.
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }
}

/// Artifacts keyed by contract name.
#[derive(Debug, Clone, Default)]
pub struct ArtifactRegistry {
    artifacts: BTreeMap<ContractName, ContractArtifact>,
}

impl ArtifactRegistry {
    pub const fn new() -> Self {
        Self {
            artifacts: BTreeMap::new(),
        }
    }

    /// Load `<Name>.json` from `dir` for every known contract.
    ///
    /// Contracts without a file are skipped. A file that exists but cannot be
    /// read or parsed is an error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        for name in ContractName::ALL {
            let path = dir.join(format!("{name}.json"));
            if !path.is_file() {
                debug!("Skipping missing artifact: {}", path.display());
                continue;
            }

            let artifact = ContractArtifact::from_file(&path)?;
            debug!(
                contract = %name,
                functions = artifact.abi.functions.len(),
                bytecode_len = artifact.bytecode.len(),
                "Loaded artifact"
            );
            registry.insert(name, artifact);
        }

        Ok(registry)
    }

    /// Register or replace an artifact.
    pub fn insert(&mut self, name: ContractName, artifact: ContractArtifact) {
        self.artifacts.insert(name, artifact);
    }

    /// Look up an artifact by its exported name.
    pub fn get(&self, name: &str) -> Result<&ContractArtifact, ArtifactError> {
        name.parse::<ContractName>()
            .ok()
            .and_then(|contract| self.artifacts.get(&contract))
            .ok_or_else(|| ArtifactError::NotFound(name.to_string()))
    }

    /// Typed lookup.
    pub fn artifact(&self, name: ContractName) -> Option<&ContractArtifact> {
        self.artifacts.get(&name)
    }

    /// Names of the registered artifacts.
    pub fn names(&self) -> impl Iterator<Item = ContractName> + '_ {
        self.artifacts.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
