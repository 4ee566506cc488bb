pub mod config;

use crate::config::{Config, TokenConfig};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use artifact::{ArtifactRegistry, ContractArtifact};
use client::{token::TokenReader, RemoteSigner};
use permit::{
    calldata::BridgeDeposit, PermitBuilder, PermitKind, PermitRequest, PermitSignature,
    PermitSigner, SignerError, SigningPayload,
};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Signing capability selected from the CLI flags and config.
pub enum CliSigner {
    Local(PrivateKeySigner),
    Remote(RemoteSigner),
}

impl CliSigner {
    /// Prefer a local key; fall back to the configured signer-proxy.
    pub fn from_config(config: &Config, private_key: Option<&str>) -> eyre::Result<Self> {
        if let Some(key) = private_key {
            return Ok(Self::Local(client::local_signer(key)?));
        }

        match (&config.signer_proxy_url, config.signer_address) {
            (Some(url), Some(address)) => Ok(Self::Remote(RemoteSigner::new(url, address))),
            (Some(_), None) => {
                eyre::bail!("signer_proxy_url is set but signer_address is missing")
            }
            _ => eyre::bail!("no signer: pass --private-key or configure signer_proxy_url"),
        }
    }
}

impl PermitSigner for CliSigner {
    fn address(&self) -> Address {
        match self {
            Self::Local(signer) => signer.address(),
            Self::Remote(signer) => signer.address(),
        }
    }

    async fn sign_permit(
        &self,
        payload: &SigningPayload,
    ) -> Result<alloy_primitives::Signature, SignerError> {
        match self {
            Self::Local(signer) => signer.sign_permit(payload).await,
            Self::Remote(signer) => signer.sign_permit(payload).await,
        }
    }
}

/// Arguments of a single permit.
#[derive(Debug, Clone)]
pub struct SignArgs {
    pub token: String,
    /// Defaults to the bridge on the token's layer
    pub spender: Option<Address>,
    pub value: U256,
    /// Read from the token when absent
    pub nonce: Option<U256>,
    pub deadline: U256,
    /// Also encode a `bridgeAsset` deposit
    pub bridge: bool,
    /// Deposit destination, defaults to the other side of the bridge; implies `bridge`
    pub destination_network: Option<u32>,
    /// Deposit amount; required for DAI permits, must equal `value` otherwise
    pub amount: Option<U256>,
}

/// Everything `permit sign` reports.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutput {
    pub request: PermitRequest,
    pub signature: PermitSignature,
    pub permit_data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_calldata: Option<Bytes>,
}

/// Assemble a permit request for a configured token.
pub fn permit_request(
    config: &Config,
    token: &TokenConfig,
    owner: Address,
    spender: Address,
    value: U256,
    nonce: U256,
    deadline: U256,
) -> PermitRequest {
    PermitRequest {
        token_address: token.address,
        chain_id: config.network_config().chain_id(token.layer),
        owner,
        spender,
        value,
        nonce,
        deadline,
        token_name: token.name.clone(),
        token_version: token.version.clone(),
        kind: token.kind,
    }
}

/// Deposit the bridge accepts for `request`.
///
/// The bridge only forwards permits whose spender is itself, checks that an
/// EIP-2612 permit's value equals the deposited amount, and rejects deposits to
/// its own network.
pub fn bridge_deposit(
    config: &Config,
    token: &TokenConfig,
    request: &PermitRequest,
    destination_network: Option<u32>,
    amount: Option<U256>,
) -> eyre::Result<BridgeDeposit> {
    let network = config.network_config();

    let bridge = network.bridge(token.layer);
    if request.spender != bridge {
        eyre::bail!(
            "permit spender {} is not the bridge {}, bridgeAsset would revert",
            request.spender,
            bridge
        );
    }

    let origin = network.network_id(token.layer);
    let destination_network =
        destination_network.unwrap_or_else(|| network.network_id(token.layer.counterpart()));
    if destination_network == origin {
        eyre::bail!("destination network {destination_network} is the origin network");
    }

    let amount = match request.kind {
        PermitKind::Dai => {
            if request.value.is_zero() {
                eyre::bail!("a revoking DAI permit cannot pay for a deposit");
            }
            amount.ok_or_else(|| eyre::eyre!("--amount is required for DAI permits"))?
        }
        PermitKind::Eip2612 | PermitKind::Uni => match amount {
            None => request.value,
            Some(amount) if amount == request.value => amount,
            Some(amount) => {
                eyre::bail!(
                    "deposit amount {amount} must equal the permit value {}",
                    request.value
                )
            }
        },
    };

    Ok(BridgeDeposit {
        destination_network,
        destination_address: request.owner,
        amount,
        token: token.address,
        force_update_global_exit_root: true,
    })
}

/// Build and sign a permit, optionally wrapping it in a bridge deposit.
pub async fn sign_permit<S>(
    config: &Config,
    signer: &S,
    args: SignArgs,
) -> eyre::Result<SignOutput>
where
    S: PermitSigner,
{
    let token = config.token(&args.token)?;
    let network = config.network_config();
    let owner = signer.address();
    let spender = args.spender.unwrap_or_else(|| network.bridge(token.layer));

    let nonce = match args.nonce {
        Some(nonce) => nonce,
        None => {
            let rpc_url = config.rpc_url(token.layer).ok_or_else(|| {
                eyre::eyre!(
                    "--nonce is required when no {:?} rpc url is configured",
                    token.layer
                )
            })?;
            let provider = client::create_provider(rpc_url).await?;
            let nonce = TokenReader::new(provider)
                .permit_nonce(token.address, owner)
                .await?;
            info!(%owner, %nonce, "Fetched permit nonce");
            nonce
        }
    };

    let request = permit_request(
        config,
        token,
        owner,
        spender,
        args.value,
        nonce,
        args.deadline,
    );
    // Deposit is validated before the signer is asked
    let deposit = if args.bridge || args.destination_network.is_some() {
        Some(bridge_deposit(
            config,
            token,
            &request,
            args.destination_network,
            args.amount,
        )?)
    } else {
        None
    };

    let signature = PermitBuilder::new().build(&request, signer).await?;
    let permit_data = signature.permit_calldata(&request)?;
    let bridge_calldata = deposit.map(|deposit| deposit.calldata(permit_data.clone()));

    info!(
        token = %args.token,
        owner = %owner,
        spender = %spender,
        digest = %signature.digest,
        "Permit signed"
    );

    Ok(SignOutput {
        request,
        signature,
        permit_data,
        bridge_calldata,
    })
}

/// Locally reconstructed domain separator, and the deployed one when reachable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainReport {
    pub token: Address,
    pub chain_id: u64,
    pub local: B256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_chain: Option<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_chain_name: Option<String>,
}

impl DomainReport {
    /// `None` when no RPC url is configured or the on-chain read failed.
    pub fn matches(&self) -> Option<bool> {
        self.on_chain.map(|on_chain| on_chain == self.local)
    }
}

/// Compare the configured domain of `symbol` with the deployed contract.
pub async fn check_domain(config: &Config, symbol: &str) -> eyre::Result<DomainReport> {
    let token = config.token(symbol)?;
    let request = permit_request(
        config,
        token,
        Address::ZERO,
        Address::ZERO,
        U256::ZERO,
        U256::ZERO,
        U256::ZERO,
    );
    let local = permit::typed_data::permit_domain(&request).separator();

    let mut report = DomainReport {
        token: token.address,
        chain_id: request.chain_id,
        local,
        on_chain: None,
        on_chain_name: None,
    };

    if let Some(rpc_url) = config.rpc_url(token.layer) {
        let provider = client::create_provider(rpc_url).await?;
        let reader = TokenReader::new(provider);

        match reader.domain_separator(token.address).await {
            Ok(separator) => report.on_chain = Some(separator),
            Err(e) => warn!(token = %symbol, "Failed to read DOMAIN_SEPARATOR: {}", e),
        }
        match reader.token_name(token.address).await {
            Ok(name) => report.on_chain_name = Some(name),
            Err(e) => warn!(token = %symbol, "Failed to read token name: {}", e),
        }

        if report.matches() == Some(false) {
            warn!(
                token = %symbol,
                local = %local,
                on_chain = ?report.on_chain,
                on_chain_name = ?report.on_chain_name,
                "Configured domain does not match the token; permits will be rejected"
            );
        }
    }

    Ok(report)
}

/// Short description of a loaded artifact.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    pub contract_name: String,
    pub functions: Vec<String>,
    pub events: Vec<String>,
    pub bytecode_size: usize,
    pub deployable: bool,
}

impl From<&ContractArtifact> for ArtifactSummary {
    fn from(artifact: &ContractArtifact) -> Self {
        Self {
            contract_name: artifact.contract_name.clone(),
            functions: artifact
                .abi
                .functions()
                .map(|function| function.signature())
                .collect(),
            events: artifact
                .abi
                .events()
                .map(|event| event.signature())
                .collect(),
            bytecode_size: artifact.bytecode.len(),
            deployable: artifact.is_deployable(),
        }
    }
}

/// Load the artifacts in `dir` and summarize `name`.
pub fn artifact_summary(dir: impl AsRef<Path>, name: &str) -> eyre::Result<ArtifactSummary> {
    let registry = ArtifactRegistry::from_dir(dir)?;
    let artifact = registry.get(name)?;

    Ok(ArtifactSummary::from(artifact))
}

/// Parse a decimal or 0x-prefixed 256-bit integer.
pub fn parse_u256(value: &str) -> Result<U256, String> {
    value
        .parse()
        .map_err(|e| format!("invalid integer {value}: {e}"))
}
