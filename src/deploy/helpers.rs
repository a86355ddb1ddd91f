//! Convenience contracts: the exchange router, the zaps, and the spot rate
//! provider.

use alloy::providers::Provider;
use alloy_primitives::Address;
use alloy_sol_types::SolValue;

use crate::{
    config::ChainSettings,
    constants::{
        DEPOSIT_AND_STAKE_ZAP_ARTIFACT, DEPOSIT_AND_STAKE_ZAP_KEY, META_ZAP_ARTIFACT,
        META_ZAP_KEY, RATE_PROVIDER_ARTIFACT, RATE_PROVIDER_KEY, ROUTER_ARTIFACT, ROUTER_KEY,
    },
    errors::ScriptError,
    utils::DeployContext,
};

/// Deploy the exchange router, bound to the chain's wrapped native token
pub async fn deploy_router<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    chain: &ChainSettings,
) -> Result<Address, ScriptError> {
    ctx.deploy(
        ROUTER_KEY,
        ROUTER_ARTIFACT,
        chain.wrapped_native_token.abi_encode(),
    )
    .await
}

/// Deploy the deposit-and-stake zap
pub async fn deploy_deposit_and_stake_zap<P: Provider + Clone>(
    ctx: &DeployContext<P>,
) -> Result<Address, ScriptError> {
    ctx.deploy(
        DEPOSIT_AND_STAKE_ZAP_KEY,
        DEPOSIT_AND_STAKE_ZAP_ARTIFACT,
        Vec::new(),
    )
    .await
}

/// Deploy the stableswap meta zap
pub async fn deploy_stable_swap_meta_zap<P: Provider + Clone>(
    ctx: &DeployContext<P>,
) -> Result<Address, ScriptError> {
    ctx.deploy(META_ZAP_KEY, META_ZAP_ARTIFACT, Vec::new()).await
}

/// Deploy the spot rate provider, pointed at the address provider
pub async fn deploy_rate_provider<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    address_provider: Address,
) -> Result<Address, ScriptError> {
    ctx.deploy(
        RATE_PROVIDER_KEY,
        RATE_PROVIDER_ARTIFACT,
        address_provider.abi_encode(),
    )
    .await
}
