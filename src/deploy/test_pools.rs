//! Devnet-only helpers: mintable test tokens and a twocrypto test pool,
//! plus liquidity seeding and a smoke-test swap against it.

use alloy::providers::Provider;
use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol_data, SolType};
use tracing::info;

use crate::{
    constants::{TEST_ERC20_ARTIFACT, TWOCRYPTO_FACTORY_KEY},
    errors::ScriptError,
    solidity::{ICryptoFactory, ICryptoPool, TestERC20},
    utils::DeployContext,
};

/// Map a contract-interaction error into a [`ScriptError`]
fn interaction_err(e: impl ToString) -> ScriptError {
    ScriptError::ContractInteraction(e.to_string())
}

/// Pool parameters for a twocrypto deployment, defaulting to the standard
/// volatile-pair preset
#[derive(Debug, Clone)]
pub struct CryptoPoolParams {
    /// Index of the pool implementation to use
    pub implementation_id: U256,
    /// Amplification coefficient
    pub a: U256,
    /// Gamma coefficient
    pub gamma: U256,
    /// Fee at perfect balance, in 1e10 units
    pub mid_fee: U256,
    /// Fee at imbalance, in 1e10 units
    pub out_fee: U256,
    /// Fee gamma
    pub fee_gamma: U256,
    /// Profit threshold above which the pool rebalances
    pub allowed_extra_profit: U256,
    /// Price adjustment step
    pub adjustment_step: U256,
    /// Moving-average time window, in seconds
    pub ma_exp_time: U256,
    /// Initial price of coin 1 against coin 0, 1e18-scaled
    pub initial_price: U256,
}

impl Default for CryptoPoolParams {
    fn default() -> Self {
        Self {
            implementation_id: U256::ZERO,
            a: U256::from(400_000u64),
            gamma: U256::from(145_000_000_000_000u64),
            mid_fee: U256::from(26_000_000u64),
            out_fee: U256::from(45_000_000u64),
            fee_gamma: U256::from(230_000_000_000_000u64),
            allowed_extra_profit: U256::from(2_000_000_000_000u64),
            adjustment_step: U256::from(146_000_000_000u64),
            ma_exp_time: U256::from(866u64),
            initial_price: units(1),
        }
    }
}

/// `amount` scaled by the 18-decimal token unit
pub fn units(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(18u64))
}

/// Deploy two mintable test tokens and seed the receiver (the deployer by
/// default) with a million units of each
pub async fn deploy_tokens<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    receiver: Option<Address>,
) -> Result<(Address, Address), ScriptError> {
    let receiver = receiver.unwrap_or(ctx.deployer);

    let token0 = ctx
        .deploy_artifact(
            TEST_ERC20_ARTIFACT,
            <(sol_data::String, sol_data::String, sol_data::Uint<8>)>::abi_encode_params(&(
                "Test Token A".to_string(),
                "TSTA".to_string(),
                18u8,
            )),
        )
        .await?;
    let token1 = ctx
        .deploy_artifact(
            TEST_ERC20_ARTIFACT,
            <(sol_data::String, sol_data::String, sol_data::Uint<8>)>::abi_encode_params(&(
                "Test Token B".to_string(),
                "TSTB".to_string(),
                18u8,
            )),
        )
        .await?;

    for token in [token0, token1] {
        TestERC20::new(token, ctx.provider.clone())
            .mint(receiver, units(1_000_000))
            .send()
            .await
            .map_err(interaction_err)?
            .get_receipt()
            .await
            .map_err(interaction_err)?;
        info!("Deployed test token {} and minted to {}", token, receiver);
    }

    Ok((token0, token1))
}

/// Deploy a twocrypto pool for a coin pair through the recorded factory,
/// returning the pool and factory addresses
pub async fn deploy_pool<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    name: &str,
    symbol: &str,
    coins: [Address; 2],
) -> Result<(Address, Address), ScriptError> {
    let factory_address = ctx
        .state
        .get_contract(TWOCRYPTO_FACTORY_KEY)?
        .ok_or_else(|| {
            ScriptError::ContractInteraction(
                "twocrypto factory not deployed for this chain".to_string(),
            )
        })?;
    let factory = ICryptoFactory::new(factory_address, ctx.provider.clone());

    let params = CryptoPoolParams::default();
    factory
        .deploy_pool(
            name.to_string(),
            symbol.to_string(),
            coins,
            params.implementation_id,
            params.a,
            params.gamma,
            params.mid_fee,
            params.out_fee,
            params.fee_gamma,
            params.allowed_extra_profit,
            params.adjustment_step,
            params.ma_exp_time,
            params.initial_price,
        )
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;

    let count = factory.pool_count().call().await.map_err(interaction_err)?._0;
    let pool = factory
        .pool_list(count - U256::from(1u64))
        .call()
        .await
        .map_err(interaction_err)?
        ._0;
    info!("Deployed pool {} ({}) at {}", name, symbol, pool);

    Ok((pool, factory_address))
}

/// Approve and deposit an equal amount of both coins into a pool
pub async fn add_liquidity<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    pool: Address,
    token0: Address,
    token1: Address,
    amount: U256,
) -> Result<(), ScriptError> {
    for token in [token0, token1] {
        TestERC20::new(token, ctx.provider.clone())
            .approve(pool, amount)
            .send()
            .await
            .map_err(interaction_err)?
            .get_receipt()
            .await
            .map_err(interaction_err)?;
    }

    ICryptoPool::new(pool, ctx.provider.clone())
        .add_liquidity([amount, amount], U256::ZERO)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;
    info!("Added {} of each coin to pool {}", amount, pool);

    Ok(())
}

/// Swap `amount` of `token_in` against the pool's other coin
pub async fn swap<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    pool: Address,
    token_in: Address,
    amount: U256,
) -> Result<(), ScriptError> {
    TestERC20::new(token_in, ctx.provider.clone())
        .approve(pool, amount)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;

    let pool_contract = ICryptoPool::new(pool, ctx.provider.clone());
    let coin0 = pool_contract
        .coins(U256::ZERO)
        .call()
        .await
        .map_err(interaction_err)?
        ._0;
    let (i, j) = if coin0 == token_in { (0u64, 1u64) } else { (1u64, 0u64) };

    pool_contract
        .exchange(U256::from(i), U256::from(j), amount, U256::ZERO)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;
    info!("Swapped {} of {} against pool {}", amount, token_in, pool);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_are_1e18_scaled() {
        assert_eq!(units(0), U256::ZERO);
        assert_eq!(units(1), U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(
            units(10_000),
            U256::from(10_000u64) * U256::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn default_pool_params_use_the_volatile_preset() {
        let params = CryptoPoolParams::default();
        assert_eq!(params.a, U256::from(400_000u64));
        assert_eq!(params.ma_exp_time, U256::from(866u64));
        assert_eq!(params.initial_price, units(1));
        assert!(params.mid_fee < params.out_fee);
    }
}
