//! `permit`: sign EIP-2612 permits for Polygon zkEVM bridge deposits.
//!
//! Subcommands:
//! - `sign`: build and sign a permit, print it with its `permit(...)` calldata
//! - `domain`: print the reconstructed domain separator (and the deployed one)
//! - `artifact`: summarize a compiled contract artifact

use alloy_primitives::{Address, U256};
use clap::{Parser, Subcommand};
use permit::PermitSigner;
use permit_cli::{
    artifact_summary, check_domain, config::Config, parse_u256, sign_permit, CliSigner, SignArgs,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "permit")]
#[command(about = "Sign token permits for Polygon zkEVM bridge deposits")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key of the permit owner (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build and sign a permit
    Sign {
        /// Token symbol from the config
        #[arg(long)]
        token: String,

        /// Spender address (defaults to the bridge)
        #[arg(long)]
        spender: Option<Address>,

        /// Allowance, in the token's base units
        #[arg(long, value_parser = parse_u256)]
        value: U256,

        /// Owner's permit nonce (read from the token if omitted)
        #[arg(long, value_parser = parse_u256)]
        nonce: Option<U256>,

        /// Expiry timestamp in seconds
        #[arg(long, value_parser = parse_u256)]
        deadline: U256,

        /// Also encode a bridgeAsset deposit (spender must be the bridge)
        #[arg(long)]
        bridge: bool,

        /// Deposit destination network id (defaults to the other layer; implies --bridge)
        #[arg(long)]
        destination_network: Option<u32>,

        /// Deposit amount (required for DAI permits, defaults to --value otherwise)
        #[arg(long, value_parser = parse_u256)]
        amount: Option<U256>,
    },

    /// Print the EIP-712 domain separator of a token
    Domain {
        /// Token symbol from the config
        #[arg(long)]
        token: String,
    },

    /// Summarize a compiled contract artifact
    Artifact {
        /// Contract name, e.g. PolygonZKEVMBridge
        name: String,

        /// Directory holding <Name>.json artifacts
        #[arg(long, default_value = "artifacts")]
        dir: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Sign {
            token,
            spender,
            value,
            nonce,
            deadline,
            bridge,
            destination_network,
            amount,
        } => {
            let config = Config::from_file(&cli.config)?;
            let signer = CliSigner::from_config(&config, cli.private_key.as_deref())?;

            info!("Loaded config:");
            info!("  Network: {:?}", config.network);
            info!("  Owner: {}", signer.address());

            let args = SignArgs {
                token,
                spender,
                value,
                nonce,
                deadline,
                bridge,
                destination_network,
                amount,
            };
            let output = sign_permit(&config, &signer, args).await?;

            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Domain { token } => {
            let config = Config::from_file(&cli.config)?;
            let report = check_domain(&config, &token).await?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Artifact { name, dir } => {
            let summary = artifact_summary(&dir, &name)?;

            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
