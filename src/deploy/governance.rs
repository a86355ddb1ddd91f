//! Governance deployment: the xgov agents and relayer, the DAO vault, and
//! the final ownership handover to the DAO.

use alloy::providers::Provider;
use alloy_primitives::Address;
use alloy_sol_types::SolValue;
use tracing::info;

use crate::{
    config::{ChainSettings, RollupType},
    constants::{
        AGENT_ARTIFACT, DAO_VAULT_ARTIFACT, DAO_VAULT_KEY, EMERGENCY_AGENT_KEY,
        INFRA_OWNERSHIP_KEYS, OWNERSHIP_AGENT_KEY, PARAMETER_AGENT_KEY,
        RELAYER_ARTIFACT_ARBITRUM, RELAYER_ARTIFACT_OPTIMISM, RELAYER_ARTIFACT_POLYGON_ZKEVM,
        RELAYER_KEY,
    },
    errors::ScriptError,
    solidity::IOwnable,
    utils::DeployContext,
};

/// How the pipeline sources the three DAO admin roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernancePlan {
    /// The admins are already configured; no governance deployment runs and
    /// the governance post-deployment check is skipped
    UseConfigured([Address; 3]),
    /// Deploy the xgov agents and relayer to produce the admins
    DeployXgov,
}

/// Decide whether governance needs to be deployed for a chain.
///
/// Base layers never get an xgov relayer, so they must configure all three
/// admin roles up front; rollups deploy xgov whenever any role is missing.
pub fn governance_plan(chain: &ChainSettings) -> Result<GovernancePlan, ScriptError> {
    match (chain.rollup_type, chain.dao.all_admins()) {
        (_, Some(admins)) => Ok(GovernancePlan::UseConfigured(admins)),
        (RollupType::NotRollup, None) => Err(ScriptError::ChainConfig(
            "base-layer chains must configure all three DAO admin roles".to_string(),
        )),
        (_, None) => Ok(GovernancePlan::DeployXgov),
    }
}

/// How the pipeline sources the DAO vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultPlan {
    /// Reuse the vault address from the settings file
    UseConfigured(Address),
    /// Deploy a new vault owned by the ownership admin
    Deploy,
}

/// Decide whether a DAO vault needs to be deployed for a chain
pub fn vault_plan(chain: &ChainSettings) -> VaultPlan {
    match chain.dao.vault {
        Some(vault) => VaultPlan::UseConfigured(vault),
        None => VaultPlan::Deploy,
    }
}

/// The relayer artifact matching the chain's rollup stack
fn relayer_artifact(rollup_type: RollupType) -> Result<&'static str, ScriptError> {
    match rollup_type {
        RollupType::OpStack => Ok(RELAYER_ARTIFACT_OPTIMISM),
        RollupType::ArbOrbit => Ok(RELAYER_ARTIFACT_ARBITRUM),
        RollupType::PolygonCdk => Ok(RELAYER_ARTIFACT_POLYGON_ZKEVM),
        RollupType::NotRollup | RollupType::Zksync => Err(ScriptError::ChainConfig(format!(
            "no xgov relayer exists for rollup type {:?}",
            rollup_type
        ))),
    }
}

/// Deploy the xgov governance infra: one agent per DAO role plus the
/// rollup-specific message relayer wired to the three agents.
///
/// The agent addresses become the chain's DAO admins and are written back
/// into the settings snapshot in the state file, where the pipeline re-reads
/// them.
pub async fn deploy_xgov<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    chain: &ChainSettings,
) -> Result<[Address; 3], ScriptError> {
    let ownership = ctx
        .deploy(OWNERSHIP_AGENT_KEY, AGENT_ARTIFACT, Vec::new())
        .await?;
    let parameter = ctx
        .deploy(PARAMETER_AGENT_KEY, AGENT_ARTIFACT, Vec::new())
        .await?;
    let emergency = ctx
        .deploy(EMERGENCY_AGENT_KEY, AGENT_ARTIFACT, Vec::new())
        .await?;

    let relayer_args = (ownership, parameter, emergency).abi_encode_params();
    ctx.deploy(
        RELAYER_KEY,
        relayer_artifact(chain.rollup_type)?,
        relayer_args,
    )
    .await?;

    ctx.state.update(|config| {
        config.config.dao.ownership_admin = Some(ownership);
        config.config.dao.parameter_admin = Some(parameter);
        config.config.dao.emergency_admin = Some(emergency);
    })?;

    Ok([ownership, parameter, emergency])
}

/// Deploy the DAO fee vault, owned by the ownership admin
pub async fn deploy_dao_vault<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    owner: Address,
) -> Result<Address, ScriptError> {
    let vault = ctx
        .deploy(DAO_VAULT_KEY, DAO_VAULT_ARTIFACT, owner.abi_encode())
        .await?;

    ctx.state.update(|config| {
        config.config.dao.vault = Some(vault);
    })?;

    Ok(vault)
}

/// Transfer ownership of every deployed infra contract to the DAO
/// ownership admin. Contracts already owned by the admin are left alone.
pub async fn transfer_ownership<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    chain: &ChainSettings,
) -> Result<(), ScriptError> {
    let new_owner = chain.dao.ownership_admin.ok_or_else(|| {
        ScriptError::ChainConfig("ownership admin not set, cannot transfer ownership".to_string())
    })?;

    let config = ctx.state.read()?;
    for key in INFRA_OWNERSHIP_KEYS {
        let Some(address) = config.contracts.get(key).copied() else {
            continue;
        };

        let contract = IOwnable::new(address, ctx.provider.clone());
        let current = contract
            .owner()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            ._0;
        if current == new_owner {
            continue;
        }

        contract
            .transfer_ownership(new_owner)
            .send()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        info!("Transferred ownership of {} to {}", key, new_owner);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::DaoSettings;

    use super::*;

    fn chain(rollup_type: RollupType, dao: DaoSettings) -> ChainSettings {
        ChainSettings {
            chain: "testchain".to_string(),
            chain_id: 1,
            rollup_type,
            wrapped_native_token: Address::repeat_byte(0xee),
            is_testnet: false,
            file_name: None,
            dao,
        }
    }

    fn full_dao() -> DaoSettings {
        DaoSettings {
            ownership_admin: Some(Address::repeat_byte(1)),
            parameter_admin: Some(Address::repeat_byte(2)),
            emergency_admin: Some(Address::repeat_byte(3)),
            vault: None,
        }
    }

    #[test]
    fn preset_admins_skip_governance() {
        let plan = governance_plan(&chain(RollupType::ArbOrbit, full_dao())).unwrap();
        assert_eq!(
            plan,
            GovernancePlan::UseConfigured([
                Address::repeat_byte(1),
                Address::repeat_byte(2),
                Address::repeat_byte(3),
            ])
        );
    }

    #[test]
    fn base_layer_uses_configured_admins() {
        let plan = governance_plan(&chain(RollupType::NotRollup, full_dao())).unwrap();
        assert!(matches!(plan, GovernancePlan::UseConfigured(_)));
    }

    #[test]
    fn base_layer_without_admins_is_a_config_error() {
        let mut dao = full_dao();
        dao.emergency_admin = None;
        assert!(governance_plan(&chain(RollupType::NotRollup, dao)).is_err());
    }

    #[test]
    fn rollup_missing_any_admin_deploys_xgov() {
        for missing in 0..3 {
            let mut dao = full_dao();
            match missing {
                0 => dao.ownership_admin = None,
                1 => dao.parameter_admin = None,
                _ => dao.emergency_admin = None,
            }
            let plan = governance_plan(&chain(RollupType::OpStack, dao)).unwrap();
            assert_eq!(plan, GovernancePlan::DeployXgov);
        }
    }

    #[test]
    fn configured_vault_is_reused() {
        let mut dao = full_dao();
        dao.vault = Some(Address::repeat_byte(9));
        assert_eq!(
            vault_plan(&chain(RollupType::ArbOrbit, dao)),
            VaultPlan::UseConfigured(Address::repeat_byte(9))
        );
        assert_eq!(
            vault_plan(&chain(RollupType::ArbOrbit, full_dao())),
            VaultPlan::Deploy
        );
    }

    #[test]
    fn relayer_artifact_follows_rollup_type() {
        assert_eq!(
            relayer_artifact(RollupType::OpStack).unwrap(),
            RELAYER_ARTIFACT_OPTIMISM
        );
        assert_eq!(
            relayer_artifact(RollupType::ArbOrbit).unwrap(),
            RELAYER_ARTIFACT_ARBITRUM
        );
        assert!(relayer_artifact(RollupType::NotRollup).is_err());
        assert!(relayer_artifact(RollupType::Zksync).is_err());
    }
}
