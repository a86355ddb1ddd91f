//! Definitions of CLI arguments and commands for the deploy scripts

use alloy::providers::Provider;
use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand};

use crate::{commands, errors::ScriptError};

/// Deploy the AMM protocol stack to an EVM chain
#[derive(Parser)]
#[command(name = "amm-deploy", version, about)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "DEPLOYER_PRIVATE_KEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = "http://localhost:8545")]
    pub rpc_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// The deploy commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the full protocol stack to a chain
    All(ChainConfigArgs),
    /// Deploy governance: xgov agents, relayer, and DAO vault
    Governance(ChainConfigArgs),
    /// Deploy the exchange router
    Router(ChainConfigArgs),
    /// Deploy the address provider
    AddressProvider(ChainConfigArgs),
    /// Deploy the stableswap infra
    Stableswap(AmmArgs),
    /// Deploy the tricrypto infra
    Tricrypto(AmmArgs),
    /// Deploy the twocrypto infra
    Twocrypto(AmmArgs),
    /// Deploy a twocrypto pool through the recorded factory
    CryptoPool(CryptoPoolArgs),
    /// Deploy test tokens on a devnet
    TestTokens(TestTokensArgs),
    /// Deploy test tokens and a seeded test pool on a devnet
    TestPools(TestPoolsArgs),
}

impl Command {
    /// Dispatch the parsed command
    pub async fn run<P: Provider + Clone>(
        self,
        provider: P,
        deployer: Address,
    ) -> Result<(), ScriptError> {
        match self {
            Command::All(args) => {
                commands::run_deploy_all(provider, deployer, &args.chain_config_file).await
            }
            Command::Governance(args) => {
                commands::run_deploy_governance(provider, deployer, &args.chain_config_file).await
            }
            Command::Router(args) => {
                commands::run_deploy_router(provider, deployer, &args.chain_config_file).await
            }
            Command::AddressProvider(args) => {
                commands::run_deploy_address_provider(provider, deployer, &args.chain_config_file)
                    .await
            }
            Command::Stableswap(args) => {
                commands::run_deploy_stableswap(
                    provider,
                    deployer,
                    &args.chain_config_file,
                    &args.fee_receiver,
                )
                .await
            }
            Command::Tricrypto(args) => {
                commands::run_deploy_tricrypto(
                    provider,
                    deployer,
                    &args.chain_config_file,
                    &args.fee_receiver,
                )
                .await
            }
            Command::Twocrypto(args) => {
                commands::run_deploy_twocrypto(
                    provider,
                    deployer,
                    &args.chain_config_file,
                    &args.fee_receiver,
                )
                .await
            }
            Command::CryptoPool(args) => {
                commands::run_deploy_crypto_pool(
                    provider,
                    deployer,
                    &args.chain,
                    &args.name,
                    &args.symbol,
                    &args.coins,
                )
                .await
            }
            Command::TestTokens(args) => {
                commands::run_test_tokens(provider, deployer, &args.chain, args.receiver.as_deref())
                    .await
            }
            Command::TestPools(args) => {
                commands::run_test_pools(provider, deployer, &args.chain).await
            }
        }
    }
}

/// Arguments for commands targeting a chain configuration file
#[derive(Args)]
pub struct ChainConfigArgs {
    /// Chain configuration file name, e.g. `arbitrum-sepolia.yaml`
    pub chain_config_file: String,
}

/// Arguments for the AMM infra commands
#[derive(Args)]
pub struct AmmArgs {
    /// Chain configuration file name, e.g. `arbitrum-sepolia.yaml`
    pub chain_config_file: String,

    /// Address receiving pool fees, in hex
    pub fee_receiver: String,
}

/// Arguments for the `crypto-pool` command
#[derive(Args)]
pub struct CryptoPoolArgs {
    /// Chain name, resolved to `configs/<chain>.yaml`
    pub chain: String,

    /// Pool name
    pub name: String,

    /// LP token symbol
    pub symbol: String,

    /// Comma-separated pair of coin addresses, in hex
    pub coins: String,
}

/// Arguments for the `test-tokens` command
#[derive(Args)]
pub struct TestTokensArgs {
    /// Chain name, resolved to `configs/<chain>.yaml`
    pub chain: String,

    /// Recipient of the minted test tokens, defaulting to the deployer
    #[arg(long)]
    pub receiver: Option<String>,
}

/// Arguments for the `test-pools` command
#[derive(Args)]
pub struct TestPoolsArgs {
    /// Chain name, resolved to `configs/<chain>.yaml`
    pub chain: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_the_full_pipeline_command() {
        let cli = Cli::try_parse_from([
            "amm-deploy",
            "--priv-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "--rpc-url",
            "http://localhost:8545",
            "all",
            "arbitrum-sepolia.yaml",
        ])
        .unwrap();

        match cli.command {
            Command::All(args) => assert_eq!(args.chain_config_file, "arbitrum-sepolia.yaml"),
            _ => panic!("expected the `all` command"),
        }
    }

    #[test]
    fn parses_devnet_commands() {
        let cli = Cli::try_parse_from([
            "amm-deploy",
            "-p",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "test-tokens",
            "devnet",
            "--receiver",
            "0x40907540d8a6C65c637785e8f8B742ae6b0b9968",
        ])
        .unwrap();

        match cli.command {
            Command::TestTokens(args) => {
                assert_eq!(args.chain, "devnet");
                assert!(args.receiver.is_some());
            }
            _ => panic!("expected the `test-tokens` command"),
        }
    }
}
