//! The on-chain directories: the address provider and the metaregistry,
//! plus the update passes that populate them once the rest of the stack is
//! deployed.

use alloy::providers::Provider;
use alloy_primitives::{Address, I256, U256};
use alloy_sol_types::SolValue;
use tracing::info;

use crate::{
    constants::{
        ADDRESS_PROVIDER_ARTIFACT, ADDRESS_PROVIDER_KEY, GAUGE_FACTORY_ID, GAUGE_FACTORY_KEY,
        METAREGISTRY_ARTIFACT, METAREGISTRY_ID, METAREGISTRY_KEY, RATE_PROVIDER_ID,
        RATE_PROVIDER_KEY, ROUTER_ID, ROUTER_KEY, STABLESWAP_FACTORY_ID, STABLESWAP_FACTORY_KEY,
        TRICRYPTO_FACTORY_ID, TRICRYPTO_FACTORY_KEY, TWOCRYPTO_FACTORY_ID, TWOCRYPTO_FACTORY_KEY,
    },
    errors::ScriptError,
    solidity::{IAddressProvider, IMetaRegistry},
    utils::DeployContext,
};

/// The directory entries published to the address provider once the full
/// stack is deployed: id, state key, human-readable description
const ADDRESS_PROVIDER_ENTRIES: [(u64, &str, &str); 7] = [
    (ROUTER_ID, ROUTER_KEY, "Exchange Router"),
    (METAREGISTRY_ID, METAREGISTRY_KEY, "Metaregistry"),
    (
        TRICRYPTO_FACTORY_ID,
        TRICRYPTO_FACTORY_KEY,
        "TricryptoNG Factory",
    ),
    (
        STABLESWAP_FACTORY_ID,
        STABLESWAP_FACTORY_KEY,
        "StableswapNG Factory",
    ),
    (
        TWOCRYPTO_FACTORY_ID,
        TWOCRYPTO_FACTORY_KEY,
        "TwocryptoNG Factory",
    ),
    (RATE_PROVIDER_ID, RATE_PROVIDER_KEY, "Spot Rate Provider"),
    (GAUGE_FACTORY_ID, GAUGE_FACTORY_KEY, "Liquidity Gauge Factory"),
];

/// Deploy the address provider
pub async fn deploy_address_provider<P: Provider + Clone>(
    ctx: &DeployContext<P>,
) -> Result<Address, ScriptError> {
    ctx.deploy(ADDRESS_PROVIDER_KEY, ADDRESS_PROVIDER_ARTIFACT, Vec::new())
        .await
}

/// Deploy the metaregistry, pointed at the gauge factory with the given
/// gauge type
pub async fn deploy_metaregistry<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    gauge_factory: Address,
    gauge_type: I256,
) -> Result<Address, ScriptError> {
    let args = (gauge_factory, gauge_type).abi_encode_params();
    ctx.deploy(METAREGISTRY_KEY, METAREGISTRY_ARTIFACT, args).await
}

/// Register each AMM factory as a handler with the metaregistry
pub async fn update_metaregistry<P: Provider + Clone>(
    ctx: &DeployContext<P>,
) -> Result<(), ScriptError> {
    let config = ctx.state.read()?;
    let metaregistry = IMetaRegistry::new(config.require(METAREGISTRY_KEY)?, ctx.provider.clone());

    for key in [
        STABLESWAP_FACTORY_KEY,
        TRICRYPTO_FACTORY_KEY,
        TWOCRYPTO_FACTORY_KEY,
    ] {
        let factory = config.require(key)?;
        metaregistry
            .add_registry_handler(factory)
            .send()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        info!("Registered {} with the metaregistry", key);
    }

    Ok(())
}

/// Publish the deployed component addresses to the address provider,
/// adding new ids and updating stale ones
pub async fn update_address_provider<P: Provider + Clone>(
    ctx: &DeployContext<P>,
) -> Result<(), ScriptError> {
    let config = ctx.state.read()?;
    let address_provider = IAddressProvider::new(
        config.require(ADDRESS_PROVIDER_KEY)?,
        ctx.provider.clone(),
    );

    for (id, key, description) in ADDRESS_PROVIDER_ENTRIES {
        let address = config.require(key)?;
        let id = U256::from(id);

        let current = address_provider
            .get_address(id)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            ._0;
        if current == address {
            continue;
        }

        if current == Address::ZERO {
            address_provider
                .add_new_id(id, address, description.to_string())
                .send()
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
                .get_receipt()
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
            info!("Added address provider id {}: {}", id, description);
        } else {
            address_provider
                .update_address(id, address)
                .send()
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
                .get_receipt()
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
            info!("Updated address provider id {}: {}", id, description);
        }
    }

    Ok(())
}
