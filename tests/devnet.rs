//! Devnet end-to-end test: full pipeline, then test tokens, then a seeded
//! test pool with a smoke-test swap.
//!
//! Requires a running devnet, a funded deployer key, and a prepared base
//! directory: a `configs/devnet.yaml` settings file and compiled contract
//! artifacts under `contracts/`. Run with:
//!
//! ```text
//! RPC_URL=... DEPLOYER_PRIVATE_KEY=... cargo test --test devnet -- --ignored
//! ```

use amm_deploy::{
    commands,
    config::{get_chain_settings, Settings},
    state::DeploymentFile,
    utils::setup_client,
};
use eyre::Result;

#[tokio::test]
#[ignore = "requires a running devnet and compiled contract artifacts"]
async fn test_tokens_then_test_pools_seed_a_devnet() -> Result<()> {
    let rpc_url = std::env::var("RPC_URL")?;
    let priv_key = std::env::var("DEPLOYER_PRIVATE_KEY")?;
    let (provider, deployer) = setup_client(&priv_key, &rpc_url)?;

    // The devnet config is a base layer with preset admins, so this skips
    // governance and records everything else
    commands::run_deploy_all(provider.clone(), deployer, "devnet.yaml").await?;

    commands::run_test_tokens(provider.clone(), deployer, "devnet", None).await?;
    commands::run_test_pools(provider, deployer, "devnet").await?;

    let settings = Settings::from_env();
    let chain = get_chain_settings(&settings, "devnet.yaml")?;
    let config = DeploymentFile::for_chain(&settings, &chain).read()?;

    assert_eq!(config.tokens.len(), 2);
    assert_eq!(config.pools.len(), 1);

    let pool = &config.pools[0];
    assert_eq!(pool.symbol, "TST");
    assert_eq!(pool.tokens, config.tokens);

    Ok(())
}
