//! AMM infra deployment, one function per pool family.
//!
//! Each family ships a math library, a views contract, pool
//! implementation(s), and a factory. The factory is deployed with the fee
//! receiver and the deployer as interim admin, then pointed at the other
//! contracts; ownership moves to the DAO at the end of the pipeline.

use alloy::providers::Provider;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolValue;

use crate::{
    constants::{
        STABLESWAP_ARTIFACTS, STABLESWAP_FACTORY_KEY, STABLESWAP_IMPLEMENTATION_KEY,
        STABLESWAP_MATH_KEY, STABLESWAP_META_IMPLEMENTATION_KEY, STABLESWAP_VIEWS_KEY,
        TRICRYPTO_ARTIFACTS, TRICRYPTO_FACTORY_KEY, TRICRYPTO_IMPLEMENTATION_KEY,
        TRICRYPTO_MATH_KEY, TRICRYPTO_VIEWS_KEY, TWOCRYPTO_ARTIFACTS, TWOCRYPTO_FACTORY_KEY,
        TWOCRYPTO_IMPLEMENTATION_KEY, TWOCRYPTO_MATH_KEY, TWOCRYPTO_VIEWS_KEY,
    },
    errors::ScriptError,
    solidity::{ICryptoFactory, IStableswapFactory},
    utils::DeployContext,
};

/// Map a contract-interaction error into a [`ScriptError`]
fn interaction_err(e: impl ToString) -> ScriptError {
    ScriptError::ContractInteraction(e.to_string())
}

/// Deploy the stableswap infra, returning the factory address
pub async fn deploy_stableswap<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    fee_receiver: Address,
) -> Result<Address, ScriptError> {
    let [math_artifact, views_artifact, impl_artifact, meta_impl_artifact, factory_artifact] =
        STABLESWAP_ARTIFACTS;

    let math = ctx.deploy(STABLESWAP_MATH_KEY, math_artifact, Vec::new()).await?;
    let views = ctx
        .deploy(STABLESWAP_VIEWS_KEY, views_artifact, Vec::new())
        .await?;
    let implementation = ctx
        .deploy(STABLESWAP_IMPLEMENTATION_KEY, impl_artifact, Vec::new())
        .await?;
    let meta_implementation = ctx
        .deploy(STABLESWAP_META_IMPLEMENTATION_KEY, meta_impl_artifact, Vec::new())
        .await?;
    let factory = ctx
        .deploy(
            STABLESWAP_FACTORY_KEY,
            factory_artifact,
            (fee_receiver, ctx.deployer).abi_encode_params(),
        )
        .await?;

    let stableswap_factory = IStableswapFactory::new(factory, ctx.provider.clone());
    stableswap_factory
        .set_math_implementation(math)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;
    stableswap_factory
        .set_views_implementation(views)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;
    stableswap_factory
        .set_pool_implementations(U256::ZERO, implementation)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;
    stableswap_factory
        .set_metapool_implementations(U256::ZERO, meta_implementation)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;

    Ok(factory)
}

/// Deploy the tricrypto infra, returning the factory address
pub async fn deploy_tricrypto<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    fee_receiver: Address,
) -> Result<Address, ScriptError> {
    let [math_artifact, views_artifact, impl_artifact, factory_artifact] = TRICRYPTO_ARTIFACTS;

    let math = ctx.deploy(TRICRYPTO_MATH_KEY, math_artifact, Vec::new()).await?;
    let views = ctx.deploy(TRICRYPTO_VIEWS_KEY, views_artifact, Vec::new()).await?;
    let implementation = ctx
        .deploy(TRICRYPTO_IMPLEMENTATION_KEY, impl_artifact, Vec::new())
        .await?;
    let factory = ctx
        .deploy(
            TRICRYPTO_FACTORY_KEY,
            factory_artifact,
            (fee_receiver, ctx.deployer).abi_encode_params(),
        )
        .await?;

    wire_crypto_factory(ctx, factory, math, views, implementation).await?;
    Ok(factory)
}

/// Deploy the twocrypto infra, returning the factory address
pub async fn deploy_twocrypto<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    fee_receiver: Address,
) -> Result<Address, ScriptError> {
    let [math_artifact, views_artifact, impl_artifact, factory_artifact] = TWOCRYPTO_ARTIFACTS;

    let math = ctx.deploy(TWOCRYPTO_MATH_KEY, math_artifact, Vec::new()).await?;
    let views = ctx.deploy(TWOCRYPTO_VIEWS_KEY, views_artifact, Vec::new()).await?;
    let implementation = ctx
        .deploy(TWOCRYPTO_IMPLEMENTATION_KEY, impl_artifact, Vec::new())
        .await?;
    let factory = ctx
        .deploy(
            TWOCRYPTO_FACTORY_KEY,
            factory_artifact,
            (fee_receiver, ctx.deployer).abi_encode_params(),
        )
        .await?;

    wire_crypto_factory(ctx, factory, math, views, implementation).await?;
    Ok(factory)
}

/// Point a crypto factory at its math, views, and pool implementation
async fn wire_crypto_factory<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    factory: Address,
    math: Address,
    views: Address,
    implementation: Address,
) -> Result<(), ScriptError> {
    let crypto_factory = ICryptoFactory::new(factory, ctx.provider.clone());
    crypto_factory
        .set_math_implementation(math)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;
    crypto_factory
        .set_views_implementation(views)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;
    crypto_factory
        .set_pool_implementation(implementation, U256::ZERO)
        .send()
        .await
        .map_err(interaction_err)?
        .get_receipt()
        .await
        .map_err(interaction_err)?;

    Ok(())
}
