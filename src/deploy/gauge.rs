//! Liquidity gauge infra: a reward-only gauge factory and the gauge
//! implementation it stamps out.

use alloy::providers::Provider;
use alloy_primitives::Address;

use crate::{
    constants::{
        GAUGE_FACTORY_ARTIFACT, GAUGE_FACTORY_KEY, GAUGE_IMPLEMENTATION_ARTIFACT,
        GAUGE_IMPLEMENTATION_KEY,
    },
    errors::ScriptError,
    solidity::IGaugeFactory,
    utils::DeployContext,
};

/// Deploy the gauge implementation and factory and wire them together,
/// returning the factory address
pub async fn deploy_liquidity_gauge_infra<P: Provider + Clone>(
    ctx: &DeployContext<P>,
) -> Result<Address, ScriptError> {
    let implementation = ctx
        .deploy(
            GAUGE_IMPLEMENTATION_KEY,
            GAUGE_IMPLEMENTATION_ARTIFACT,
            Vec::new(),
        )
        .await?;
    let factory = ctx
        .deploy(GAUGE_FACTORY_KEY, GAUGE_FACTORY_ARTIFACT, Vec::new())
        .await?;

    IGaugeFactory::new(factory, ctx.provider.clone())
        .set_implementation(implementation)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(factory)
}
