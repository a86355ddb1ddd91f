//! The per-chain deployment state file.
//!
//! Every deploy step records the address it produced here, and later steps
//! (and re-runs) read the file back instead of redeploying. The file is the
//! only idempotence guard in the scripts: a key that is already recorded is
//! never deployed again.

use std::{collections::BTreeMap, fs, path::PathBuf};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::{ChainSettings, Settings},
    constants::{DEBUG_DEPLOYMENTS_DIR, DEPLOYMENTS_DIR},
    errors::ScriptError,
};

/// A deployed test token recorded in the state file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The token contract address
    pub address: Address,
}

/// A deployed pool recorded in the state file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// The pool's LP token symbol
    pub symbol: String,
    /// The pool contract address
    pub address: Address,
    /// The factory the pool was deployed through
    pub factory: Address,
    /// The pool's coins
    pub tokens: Vec<Token>,
}

/// The persisted record of what has been deployed for a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// A snapshot of the chain settings, updated as governance and vault
    /// deployments fill in the DAO roles
    pub config: ChainSettings,
    /// Deployed contract addresses, by logical key
    #[serde(default)]
    pub contracts: BTreeMap<String, Address>,
    /// Test tokens deployed on devnets
    #[serde(default)]
    pub tokens: Vec<Token>,
    /// Pools deployed on devnets
    #[serde(default)]
    pub pools: Vec<Pool>,
}

impl DeploymentConfig {
    /// A fresh deployment record for a chain
    pub fn new(chain: ChainSettings) -> Self {
        Self {
            config: chain,
            contracts: BTreeMap::new(),
            tokens: Vec::new(),
            pools: Vec::new(),
        }
    }

    /// Look up a contract that must already be deployed
    pub fn require(&self, key: &str) -> Result<Address, ScriptError> {
        self.contracts.get(key).copied().ok_or_else(|| {
            ScriptError::ContractInteraction(format!("{} not found in deployment state", key))
        })
    }
}

/// A handle on the deployment state file for one chain
#[derive(Debug, Clone)]
pub struct DeploymentFile {
    /// Path of the YAML state file
    path: PathBuf,
}

impl DeploymentFile {
    /// The state file for a chain: `deployments/<stem>.yaml`, or
    /// `deployments/debug/<stem>.yaml` when deploying against a fork
    pub fn for_chain(settings: &Settings, chain: &ChainSettings) -> Self {
        let mut dir = settings.base_dir.join(DEPLOYMENTS_DIR);
        if settings.debug {
            dir = dir.join(DEBUG_DEPLOYMENTS_DIR);
        }

        Self {
            path: dir.join(format!("{}.yaml", chain.deployment_file_stem())),
        }
    }

    /// Whether the state file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the deployment record
    pub fn read(&self) -> Result<DeploymentConfig, ScriptError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", self.path.display(), e)))?;

        serde_yaml::from_str(&raw).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
    }

    /// Write the deployment record, creating parent directories as needed
    fn write(&self, config: &DeploymentConfig) -> Result<(), ScriptError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        }
        let raw = serde_yaml::to_string(config)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

        fs::write(&self.path, raw).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
    }

    /// Persist the chain settings into the state file, creating it if
    /// missing and preserving any recorded contracts otherwise
    pub fn dump_initial_chain_settings(&self, chain: &ChainSettings) -> Result<(), ScriptError> {
        let config = if self.exists() {
            let mut existing = self.read()?;
            existing.config = chain.clone();
            existing
        } else {
            DeploymentConfig::new(chain.clone())
        };

        self.write(&config)
    }

    /// Look up a recorded contract address, returning `None` when the key
    /// (or the whole file) does not exist yet
    pub fn get_contract(&self, key: &str) -> Result<Option<Address>, ScriptError> {
        if !self.exists() {
            return Ok(None);
        }

        Ok(self.read()?.contracts.get(key).copied())
    }

    /// Record a deployed contract address under its logical key
    pub fn record_contract(&self, key: &str, address: Address) -> Result<(), ScriptError> {
        self.update(|config| {
            config.contracts.insert(key.to_string(), address);
        })
    }

    /// Read-modify-write the deployment record
    pub fn update<F>(&self, mutate: F) -> Result<(), ScriptError>
    where
        F: FnOnce(&mut DeploymentConfig),
    {
        let mut config = self.read()?;
        mutate(&mut config);
        self.write(&config)
    }

    /// Remove a stale state file before a debug deployment, so that no step
    /// reads forked state referring to a deployment that does not exist
    pub fn remove_if_exists(&self) -> Result<(), ScriptError> {
        if self.exists() {
            info!(
                "Removing existing deployment file {} for debug deployment",
                self.path.display()
            );
            fs::remove_file(&self.path)
                .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DaoSettings, RollupType};

    use super::*;

    fn devnet_settings() -> ChainSettings {
        ChainSettings {
            chain: "devnet".to_string(),
            chain_id: 31337,
            rollup_type: RollupType::NotRollup,
            wrapped_native_token: Address::repeat_byte(0xee),
            is_testnet: true,
            file_name: None,
            dao: DaoSettings::default(),
        }
    }

    fn file_in(dir: &tempfile::TempDir, debug: bool) -> DeploymentFile {
        let settings = Settings {
            debug,
            base_dir: dir.path().to_path_buf(),
        };
        DeploymentFile::for_chain(&settings, &devnet_settings())
    }

    #[test]
    fn records_and_reads_back_contracts() {
        let dir = tempfile::tempdir().unwrap();
        let file = file_in(&dir, false);

        assert!(file.get_contract("helpers.router").unwrap().is_none());

        file.dump_initial_chain_settings(&devnet_settings()).unwrap();
        let router = Address::repeat_byte(0x42);
        file.record_contract("helpers.router", router).unwrap();

        assert_eq!(file.get_contract("helpers.router").unwrap(), Some(router));
        let config = file.read().unwrap();
        assert_eq!(config.require("helpers.router").unwrap(), router);
        assert!(config.require("helpers.rate_provider").is_err());
    }

    #[test]
    fn redumping_settings_preserves_recorded_contracts() {
        let dir = tempfile::tempdir().unwrap();
        let file = file_in(&dir, false);

        file.dump_initial_chain_settings(&devnet_settings()).unwrap();
        let vault = Address::repeat_byte(0x11);
        file.record_contract("governance.vault", vault).unwrap();
        file.update(|config| config.config.dao.vault = Some(vault))
            .unwrap();

        let mut chain = devnet_settings();
        chain.dao.vault = Some(vault);
        file.dump_initial_chain_settings(&chain).unwrap();

        let config = file.read().unwrap();
        assert_eq!(config.contracts.get("governance.vault"), Some(&vault));
        assert_eq!(config.config.dao.vault, Some(vault));
    }

    #[test]
    fn debug_file_lives_under_debug_dir_and_is_removable() {
        let dir = tempfile::tempdir().unwrap();
        let file = file_in(&dir, true);

        file.dump_initial_chain_settings(&devnet_settings()).unwrap();
        assert!(dir
            .path()
            .join(DEPLOYMENTS_DIR)
            .join(DEBUG_DEPLOYMENTS_DIR)
            .join("devnet.yaml")
            .exists());

        file.remove_if_exists().unwrap();
        assert!(!file.exists());
        // removing twice is fine
        file.remove_if_exists().unwrap();
    }
}
