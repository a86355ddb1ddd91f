//! Utilities for the deploy scripts: client setup, artifact loading, and the
//! shared deploy-and-record helper every deploy step goes through.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::Address;
use serde::Deserialize;
use tracing::info;

use crate::{
    config::Settings, constants::CONTRACTS_DIR, errors::ScriptError, state::DeploymentFile,
};

/// Set up the signing provider used for all deployment transactions,
/// returning it together with the deployer address
pub fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<(impl Provider + Clone, Address), ScriptError> {
    let url =
        Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);
    Ok((provider, deployer))
}

/// Parse a hex address from a CLI argument
pub fn parse_address(addr: &str) -> Result<Address, ScriptError> {
    Address::from_str(addr).map_err(|e| ScriptError::ContractInteraction(e.to_string()))
}

/// A compiled contract artifact as stored under `contracts/`.
///
/// Only the creation bytecode is needed to deploy; any other fields in the
/// artifact file (abi, metadata) are ignored.
#[derive(Deserialize)]
struct ContractArtifact {
    /// Hex-encoded creation bytecode
    bytecode: String,
}

/// Load the creation bytecode of a compiled contract artifact from
/// `<base_dir>/contracts/<artifact>.json`
pub fn load_artifact_bytecode(base_dir: &Path, artifact: &str) -> Result<Vec<u8>, ScriptError> {
    let path = base_dir
        .join(CONTRACTS_DIR)
        .join(format!("{}.json", artifact));
    let raw = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
    let parsed: ContractArtifact = serde_json::from_str(&raw)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    hex::decode(parsed.bytecode.trim_start_matches("0x"))
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
}

/// Everything a deploy step needs: a signing provider, the environment
/// settings, and the per-chain deployment state file
pub struct DeployContext<P> {
    /// The signing provider
    pub provider: P,
    /// The deployer EOA
    pub deployer: Address,
    /// Environment settings (debug flag, base directory)
    pub settings: Settings,
    /// The per-chain deployment state file
    pub state: DeploymentFile,
}

impl<P: Provider + Clone> DeployContext<P> {
    /// Deploy a contract and record its address in the state file.
    ///
    /// Keys that are already recorded are not redeployed; the recorded
    /// address is returned instead.
    pub async fn deploy(
        &self,
        key: &str,
        artifact: &str,
        constructor_args: Vec<u8>,
    ) -> Result<Address, ScriptError> {
        if let Some(address) = self.state.get_contract(key)? {
            info!("{} already deployed at {}, skipping", key, address);
            return Ok(address);
        }

        let address = self.deploy_artifact(artifact, constructor_args).await?;
        self.state.record_contract(key, address)?;
        info!("Deployed {} at {}", key, address);

        Ok(address)
    }

    /// Deploy a contract artifact without recording it, returning the
    /// deployed address
    pub async fn deploy_artifact(
        &self,
        artifact: &str,
        constructor_args: Vec<u8>,
    ) -> Result<Address, ScriptError> {
        let mut code = load_artifact_bytecode(&self.settings.base_dir, artifact)?;
        code.extend_from_slice(&constructor_args);

        let tx = TransactionRequest::default().with_deploy_code(code);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "deploy transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment("no contract address in receipt".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn loads_artifact_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        let artifact_dir = dir.path().join(CONTRACTS_DIR).join("helpers");
        fs::create_dir_all(&artifact_dir).unwrap();
        fs::write(
            artifact_dir.join("router.json"),
            r#"{"bytecode": "0x6001600155", "abi": []}"#,
        )
        .unwrap();

        let code = load_artifact_bytecode(dir.path(), "helpers/router").unwrap();
        assert_eq!(code, vec![0x60, 0x01, 0x60, 0x01, 0x55]);

        let missing = load_artifact_bytecode(dir.path(), "helpers/unknown");
        assert!(missing.is_err());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(parse_address("0x40907540d8a6C65c637785e8f8B742ae6b0b9968").is_ok());
        assert!(parse_address("not-an-address").is_err());
    }
}
