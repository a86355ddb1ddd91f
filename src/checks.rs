//! Pre- and post-deployment checks.
//!
//! Both are hard gates: a failed check aborts the run and leaves
//! remediation to the operator.

use std::collections::BTreeMap;

use alloy::providers::Provider;
use alloy_primitives::Address;
use itertools::Itertools;
use tracing::info;

use crate::{
    constants::{
        EMERGENCY_AGENT_KEY, INFRA_OWNERSHIP_KEYS, OWNERSHIP_AGENT_KEY, PARAMETER_AGENT_KEY,
        XGOV_CHECK,
    },
    errors::ScriptError,
    solidity::IOwnable,
    utils::DeployContext,
};

/// Verify the RPC endpoint serves the configured chain and the deployer is
/// funded, before any deployment step runs
pub async fn pre_deploy(
    provider: &impl Provider,
    deployer: Address,
    chain_id: u64,
) -> Result<(), ScriptError> {
    let reported = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::PreDeployCheck(e.to_string()))?;
    if reported != chain_id {
        return Err(ScriptError::PreDeployCheck(format!(
            "RPC endpoint reports chain id {}, settings expect {}",
            reported, chain_id
        )));
    }

    let balance = provider
        .get_balance(deployer)
        .await
        .map_err(|e| ScriptError::PreDeployCheck(e.to_string()))?;
    if balance.is_zero() {
        return Err(ScriptError::PreDeployCheck(format!(
            "deployer {} has no funds on chain {}",
            deployer, chain_id
        )));
    }

    info!("Pre-deployment checks passed for chain {}", chain_id);
    Ok(())
}

/// Addresses recorded under more than one key in the state file
pub fn duplicate_addresses(contracts: &BTreeMap<String, Address>) -> Vec<Address> {
    contracts.values().copied().duplicates().collect()
}

/// Verify the recorded deployment after the pipeline finishes.
///
/// Every recorded contract must have code, no two keys may share an
/// address, the governance agents must match the admins in the settings
/// snapshot (unless the `xgov` check was skipped), and the infra contracts
/// must be owned by the DAO.
pub async fn post_deploy<P: Provider + Clone>(
    ctx: &DeployContext<P>,
    skipped: &[&str],
) -> Result<(), ScriptError> {
    let config = ctx.state.read()?;

    for (key, address) in &config.contracts {
        let code = ctx
            .provider
            .get_code_at(*address)
            .await
            .map_err(|e| ScriptError::PostDeployCheck(e.to_string()))?;
        if code.is_empty() {
            return Err(ScriptError::PostDeployCheck(format!(
                "{} recorded at {} but no code is deployed there",
                key, address
            )));
        }
    }

    let duplicates = duplicate_addresses(&config.contracts);
    if !duplicates.is_empty() {
        return Err(ScriptError::PostDeployCheck(format!(
            "multiple contract keys recorded at the same address: {:?}",
            duplicates
        )));
    }

    if !skipped.contains(&XGOV_CHECK) {
        let dao = &config.config.dao;
        let agents = [
            (OWNERSHIP_AGENT_KEY, dao.ownership_admin),
            (PARAMETER_AGENT_KEY, dao.parameter_admin),
            (EMERGENCY_AGENT_KEY, dao.emergency_admin),
        ];
        for (key, admin) in agents {
            let recorded = config.require(key)?;
            if admin != Some(recorded) {
                return Err(ScriptError::PostDeployCheck(format!(
                    "{} recorded at {} does not match the configured admin {:?}",
                    key, recorded, admin
                )));
            }
        }
    }

    let ownership_admin = config.config.dao.ownership_admin.ok_or_else(|| {
        ScriptError::PostDeployCheck("no ownership admin in the settings snapshot".to_string())
    })?;
    for key in INFRA_OWNERSHIP_KEYS {
        let Some(address) = config.contracts.get(key).copied() else {
            continue;
        };
        let owner = IOwnable::new(address, ctx.provider.clone())
            .owner()
            .call()
            .await
            .map_err(|e| ScriptError::PostDeployCheck(e.to_string()))?
            ._0;
        if owner != ownership_admin {
            return Err(ScriptError::PostDeployCheck(format!(
                "{} is owned by {}, expected the DAO ownership admin {}",
                key, owner, ownership_admin
            )));
        }
    }

    info!("Post-deployment checks passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_keys_sharing_an_address() {
        let mut contracts = BTreeMap::new();
        contracts.insert("a".to_string(), Address::repeat_byte(1));
        contracts.insert("b".to_string(), Address::repeat_byte(2));
        assert!(duplicate_addresses(&contracts).is_empty());

        contracts.insert("c".to_string(), Address::repeat_byte(1));
        assert_eq!(duplicate_addresses(&contracts), vec![Address::repeat_byte(1)]);
    }
}
