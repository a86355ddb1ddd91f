//! Implementations of the deploy commands: the full pipeline plus the
//! single-step commands that wrap one deploy function each.

use alloy::providers::Provider;
use alloy_primitives::Address;
use tracing::info;

use crate::{
    checks,
    config::{get_chain_settings, ChainSettings, RollupType, Settings},
    constants::{GAUGE_TYPE_PLACEHOLDER, XGOV_CHECK},
    deploy::{
        amm, gauge, governance,
        governance::{governance_plan, vault_plan, GovernancePlan, VaultPlan},
        helpers, registries, test_pools,
    },
    errors::ScriptError,
    state::{DeploymentFile, Pool, Token},
    utils::{parse_address, DeployContext},
};

/// Load the chain settings and build the deploy context for a command
fn load_context<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
) -> Result<(DeployContext<P>, ChainSettings), ScriptError> {
    let settings = Settings::from_env();
    let chain = get_chain_settings(&settings, chain_config_file)?;
    let state = DeploymentFile::for_chain(&settings, &chain);

    let ctx = DeployContext {
        provider,
        deployer,
        settings,
        state,
    };
    Ok((ctx, chain))
}

/// Guard a devnet-only command: the chain must be a test network with an
/// existing deployment
fn ensure_devnet(chain: &ChainSettings, state: &DeploymentFile) -> Result<(), ScriptError> {
    if !chain.is_testnet {
        return Err(ScriptError::DevnetOnly(format!(
            "{} is not a test network",
            chain.chain
        )));
    }
    if !state.exists() {
        return Err(ScriptError::DevnetOnly(format!(
            "no deployment found for {}",
            chain.chain
        )));
    }

    Ok(())
}

/// Parse the comma-separated coin pair of the `crypto-pool` command
fn parse_coin_pair(coins: &str) -> Result<[Address; 2], ScriptError> {
    let parsed: Vec<Address> = coins
        .split(',')
        .map(|coin| parse_address(coin.trim()))
        .collect::<Result<_, _>>()?;

    parsed.try_into().map_err(|_| {
        ScriptError::ContractInteraction(
            "expected exactly two comma-separated coin addresses".to_string(),
        )
    })
}

/// Deploy the full protocol stack to a chain
pub async fn run_deploy_all<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
) -> Result<(), ScriptError> {
    // Checks to skip post-deployment, e.g. when admins come preconfigured
    let mut skipped: Vec<&str> = Vec::new();

    let (ctx, mut chain) = load_context(provider, deployer, chain_config_file)?;
    if chain.rollup_type == RollupType::Zksync {
        return Err(ScriptError::UnsupportedRollup(
            "zksync is currently not supported".to_string(),
        ));
    }

    // In debug mode, remove the existing deployment file so that no step
    // reads forked state referring to a non-existent prior deployment
    if ctx.settings.debug {
        ctx.state.remove_if_exists()?;
    }

    checks::pre_deploy(&ctx.provider, ctx.deployer, chain.chain_id).await?;

    ctx.state.dump_initial_chain_settings(&chain)?;

    let admins = match governance_plan(&chain)? {
        GovernancePlan::UseConfigured(admins) => {
            info!("No xgov needed, using admins from the chain settings file ...");
            skipped.push(XGOV_CHECK);
            admins
        }
        GovernancePlan::DeployXgov => {
            info!("Deploying xgov ...");
            let admins = governance::deploy_xgov(&ctx, &chain).await?;
            // pick up the new admin addresses from the deployment file
            chain = ctx.state.read()?.config;
            admins
        }
    };

    let dao_vault = match vault_plan(&chain) {
        VaultPlan::UseConfigured(vault) => vault,
        VaultPlan::Deploy => {
            info!("Deploying vault ...");
            let vault = governance::deploy_dao_vault(&ctx, admins[0]).await?;
            chain = ctx.state.read()?.config;
            vault
        }
    };

    // pool fees accrue to the DAO vault
    let fee_receiver = dao_vault;

    let gauge_factory = gauge::deploy_liquidity_gauge_infra(&ctx).await?;

    let address_provider = registries::deploy_address_provider(&ctx).await?;

    // the gauge type stays -1 until a real gauge type is assigned
    registries::deploy_metaregistry(&ctx, gauge_factory, GAUGE_TYPE_PLACEHOLDER).await?;

    helpers::deploy_router(&ctx, &chain).await?;

    amm::deploy_stableswap(&ctx, fee_receiver).await?;
    amm::deploy_tricrypto(&ctx, fee_receiver).await?;
    amm::deploy_twocrypto(&ctx, fee_receiver).await?;

    helpers::deploy_deposit_and_stake_zap(&ctx).await?;
    helpers::deploy_stable_swap_meta_zap(&ctx).await?;
    helpers::deploy_rate_provider(&ctx, address_provider).await?;

    registries::update_metaregistry(&ctx).await?;
    registries::update_address_provider(&ctx).await?;

    governance::transfer_ownership(&ctx, &chain).await?;

    checks::post_deploy(&ctx, &skipped).await?;

    info!("Infra deployed and tested!");
    Ok(())
}

/// Deploy only governance: the xgov infra and a DAO vault
pub async fn run_deploy_governance<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
) -> Result<(), ScriptError> {
    let (ctx, chain) = load_context(provider, deployer, chain_config_file)?;
    ctx.state.dump_initial_chain_settings(&chain)?;

    let admins = governance::deploy_xgov(&ctx, &chain).await?;
    governance::deploy_dao_vault(&ctx, admins[0]).await?;

    Ok(())
}

/// Deploy only the exchange router
pub async fn run_deploy_router<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
) -> Result<(), ScriptError> {
    let (ctx, chain) = load_context(provider, deployer, chain_config_file)?;
    ctx.state.dump_initial_chain_settings(&chain)?;

    helpers::deploy_router(&ctx, &chain).await?;
    Ok(())
}

/// Deploy only the address provider
pub async fn run_deploy_address_provider<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
) -> Result<(), ScriptError> {
    let (ctx, chain) = load_context(provider, deployer, chain_config_file)?;
    ctx.state.dump_initial_chain_settings(&chain)?;

    registries::deploy_address_provider(&ctx).await?;
    Ok(())
}

/// Deploy only the stableswap infra
pub async fn run_deploy_stableswap<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
    fee_receiver: &str,
) -> Result<(), ScriptError> {
    let (ctx, chain) = load_context(provider, deployer, chain_config_file)?;
    ctx.state.dump_initial_chain_settings(&chain)?;

    amm::deploy_stableswap(&ctx, parse_address(fee_receiver)?).await?;
    Ok(())
}

/// Deploy only the tricrypto infra
pub async fn run_deploy_tricrypto<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
    fee_receiver: &str,
) -> Result<(), ScriptError> {
    let (ctx, chain) = load_context(provider, deployer, chain_config_file)?;
    ctx.state.dump_initial_chain_settings(&chain)?;

    amm::deploy_tricrypto(&ctx, parse_address(fee_receiver)?).await?;
    Ok(())
}

/// Deploy only the twocrypto infra
pub async fn run_deploy_twocrypto<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain_config_file: &str,
    fee_receiver: &str,
) -> Result<(), ScriptError> {
    let (ctx, chain) = load_context(provider, deployer, chain_config_file)?;
    ctx.state.dump_initial_chain_settings(&chain)?;

    amm::deploy_twocrypto(&ctx, parse_address(fee_receiver)?).await?;
    Ok(())
}

/// Deploy a twocrypto pool for a coin pair through the recorded factory
pub async fn run_deploy_crypto_pool<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain: &str,
    name: &str,
    symbol: &str,
    coins: &str,
) -> Result<(), ScriptError> {
    let (ctx, _) = load_context(provider, deployer, &format!("{}.yaml", chain))?;
    let coins = parse_coin_pair(coins)?;

    let (pool, factory) = test_pools::deploy_pool(&ctx, name, symbol, coins).await?;
    info!("Deployed pool {} through factory {}", pool, factory);

    Ok(())
}

/// Deploy two test tokens on a devnet and record them in the state file
pub async fn run_test_tokens<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain: &str,
    receiver: Option<&str>,
) -> Result<(), ScriptError> {
    let (ctx, chain_settings) = load_context(provider, deployer, &format!("{}.yaml", chain))?;
    ensure_devnet(&chain_settings, &ctx.state)?;

    let receiver = receiver.map(parse_address).transpose()?;
    let (token0, token1) = test_pools::deploy_tokens(&ctx, receiver).await?;

    ctx.state.update(|config| {
        config.tokens = vec![Token { address: token0 }, Token { address: token1 }];
    })?;

    Ok(())
}

/// Deploy test tokens and a seeded test pool on a devnet, then smoke-test
/// the pool with a swap
pub async fn run_test_pools<P: Provider + Clone>(
    provider: P,
    deployer: Address,
    chain: &str,
) -> Result<(), ScriptError> {
    let (ctx, chain_settings) = load_context(provider, deployer, &format!("{}.yaml", chain))?;
    ensure_devnet(&chain_settings, &ctx.state)?;

    let (token0, token1) = test_pools::deploy_tokens(&ctx, None).await?;
    let tokens = vec![Token { address: token0 }, Token { address: token1 }];
    ctx.state.update(|config| {
        config.tokens = tokens.clone();
    })?;

    let (pool, factory) = test_pools::deploy_pool(&ctx, "Test", "TST", [token0, token1]).await?;
    ctx.state.update(|config| {
        config.pools = vec![Pool {
            symbol: "TST".to_string(),
            address: pool,
            factory,
            tokens: tokens.clone(),
        }];
    })?;

    test_pools::add_liquidity(&ctx, pool, token0, token1, test_pools::units(10_000)).await?;
    test_pools::swap(&ctx, pool, token0, test_pools::units(1_000)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::{DaoSettings, RollupType};

    use super::*;

    #[test]
    fn coin_pairs_must_have_exactly_two_addresses() {
        let a = "0x0000000000000000000000000000000000000001";
        let b = "0x0000000000000000000000000000000000000002";

        let pair = parse_coin_pair(&format!("{},{}", a, b)).unwrap();
        assert_eq!(pair[0], parse_address(a).unwrap());
        assert_eq!(pair[1], parse_address(b).unwrap());

        assert!(parse_coin_pair(a).is_err());
        assert!(parse_coin_pair(&format!("{},{},{}", a, b, a)).is_err());
        assert!(parse_coin_pair("one,two").is_err());
    }

    #[test]
    fn devnet_guard_rejects_mainnet_chains() {
        let chain = ChainSettings {
            chain: "mainnet".to_string(),
            chain_id: 1,
            rollup_type: RollupType::NotRollup,
            wrapped_native_token: alloy_primitives::Address::repeat_byte(0xee),
            is_testnet: false,
            file_name: None,
            dao: DaoSettings::default(),
        };
        let settings = Settings {
            debug: false,
            base_dir: std::env::temp_dir(),
        };
        let state = DeploymentFile::for_chain(&settings, &chain);

        assert!(matches!(
            ensure_devnet(&chain, &state),
            Err(ScriptError::DevnetOnly(_))
        ));
    }
}
