//! Chain settings and environment configuration for the deploy scripts

use std::{env, fs, path::PathBuf};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{constants::CONFIGS_DIR, errors::ScriptError};

/// Environment-level settings shared by all commands
#[derive(Debug, Clone)]
pub struct Settings {
    /// Whether we are deploying against a local fork
    pub debug: bool,
    /// The directory containing the `configs/`, `contracts/` and `deployments/` trees
    pub base_dir: PathBuf,
}

impl Settings {
    /// Read the settings from the environment.
    ///
    /// `DEBUG` enables local-fork mode, `BASE_DIR` overrides the working root.
    pub fn from_env() -> Self {
        let debug = env::var("DEBUG")
            .map(|v| matches!(v.as_str(), "1" | "true" | "True"))
            .unwrap_or(false);
        let base_dir = env::var("BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self { debug, base_dir }
    }
}

/// The rollup stack the target chain runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollupType {
    /// A base-layer chain, not a rollup
    NotRollup,
    /// An OP-stack rollup
    OpStack,
    /// An Arbitrum Orbit rollup
    ArbOrbit,
    /// A Polygon CDK rollup
    PolygonCdk,
    /// A zksync-era rollup (currently unsupported)
    Zksync,
}

/// The DAO admin roles and vault configured for a chain.
///
/// On base layers these are set in the settings file; on rollups they are
/// filled in by the governance deployment and read back from the state file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoSettings {
    /// The ownership admin (receives infra ownership after deployment)
    #[serde(default)]
    pub ownership_admin: Option<Address>,
    /// The parameter admin
    #[serde(default)]
    pub parameter_admin: Option<Address>,
    /// The emergency admin
    #[serde(default)]
    pub emergency_admin: Option<Address>,
    /// The DAO fee vault
    #[serde(default)]
    pub vault: Option<Address>,
}

impl DaoSettings {
    /// Return all three admin addresses, or `None` if any role is unset
    pub fn all_admins(&self) -> Option<[Address; 3]> {
        Some([
            self.ownership_admin?,
            self.parameter_admin?,
            self.emergency_admin?,
        ])
    }
}

/// Per-chain settings, loaded from `configs/<chain>.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSettings {
    /// The chain name, e.g. `arbitrum-sepolia`
    pub chain: String,
    /// The chain id the RPC endpoint must report
    pub chain_id: u64,
    /// The rollup stack of the chain
    pub rollup_type: RollupType,
    /// The canonical wrapped native token on the chain
    pub wrapped_native_token: Address,
    /// Whether the chain is a test network
    #[serde(default)]
    pub is_testnet: bool,
    /// Explicit deployment file stem, derived from the chain name if unset
    #[serde(default)]
    pub file_name: Option<String>,
    /// The DAO admins and vault, where already known
    #[serde(default)]
    pub dao: DaoSettings,
}

impl ChainSettings {
    /// The stem of the per-chain deployment state file
    pub fn deployment_file_stem(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| self.chain.replace('-', "_"))
    }
}

/// Load the settings for a chain from its configuration file, resolved
/// by convention under `configs/`
pub fn get_chain_settings(
    settings: &Settings,
    chain_config_file: &str,
) -> Result<ChainSettings, ScriptError> {
    let path = settings.base_dir.join(CONFIGS_DIR).join(chain_config_file);
    let raw = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ChainConfig(format!("{}: {}", path.display(), e)))?;

    serde_yaml::from_str(&raw).map_err(|e| ScriptError::ChainConfig(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SAMPLE_CONFIG: &str = r#"
chain: arbitrum-sepolia
chain_id: 421614
rollup_type: arb-orbit
wrapped_native_token: "0x980B62Da83eFf3D4576C647993b0c1D7faf17c73"
is_testnet: true
dao:
  ownership_admin: "0x40907540d8a6C65c637785e8f8B742ae6b0b9968"
"#;

    #[test]
    fn parses_chain_settings() {
        let settings: ChainSettings = serde_yaml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(settings.chain, "arbitrum-sepolia");
        assert_eq!(settings.chain_id, 421614);
        assert_eq!(settings.rollup_type, RollupType::ArbOrbit);
        assert!(settings.is_testnet);
        assert!(settings.dao.ownership_admin.is_some());
        assert!(settings.dao.parameter_admin.is_none());
        assert!(settings.dao.vault.is_none());
    }

    #[test]
    fn deployment_file_stem_derives_from_chain_name() {
        let settings: ChainSettings = serde_yaml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(settings.deployment_file_stem(), "arbitrum_sepolia");

        let mut named = settings;
        named.file_name = Some("arbsep".to_string());
        assert_eq!(named.deployment_file_stem(), "arbsep");
    }

    #[test]
    fn all_admins_requires_every_role() {
        let mut dao = DaoSettings {
            ownership_admin: Some(Address::repeat_byte(1)),
            parameter_admin: Some(Address::repeat_byte(2)),
            emergency_admin: None,
            vault: None,
        };
        assert!(dao.all_admins().is_none());

        dao.emergency_admin = Some(Address::repeat_byte(3));
        let admins = dao.all_admins().unwrap();
        assert_eq!(admins[0], Address::repeat_byte(1));
        assert_eq!(admins[2], Address::repeat_byte(3));
    }

    #[test]
    fn loads_settings_from_configs_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIGS_DIR)).unwrap();
        fs::write(
            dir.path().join(CONFIGS_DIR).join("arbitrum-sepolia.yaml"),
            SAMPLE_CONFIG,
        )
        .unwrap();

        let settings = Settings {
            debug: false,
            base_dir: dir.path().to_path_buf(),
        };
        let chain = get_chain_settings(&settings, "arbitrum-sepolia.yaml").unwrap();
        assert_eq!(chain.chain_id, 421614);

        let missing = get_chain_settings(&settings, "unknown.yaml");
        assert!(missing.is_err());
    }
}
