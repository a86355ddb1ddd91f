//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading or parsing a chain settings file
    ChainConfig(String),
    /// The target chain's rollup type is not supported
    UnsupportedRollup(String),
    /// A devnet-only command was invoked against a non-devnet chain
    DevnetOnly(String),
    /// Error reading the per-chain deployment state file
    ReadDeployments(String),
    /// Error writing the per-chain deployment state file
    WriteDeployments(String),
    /// Error loading a compiled contract artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A pre-deployment check failed
    PreDeployCheck(String),
    /// A post-deployment check failed
    PostDeployCheck(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ChainConfig(s) => write!(f, "error loading chain settings: {}", s),
            ScriptError::UnsupportedRollup(s) => write!(f, "unsupported rollup type: {}", s),
            ScriptError::DevnetOnly(s) => write!(f, "devnet-only command: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error loading artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::PreDeployCheck(s) => write!(f, "pre-deployment check failed: {}", s),
            ScriptError::PostDeployCheck(s) => write!(f, "post-deployment check failed: {}", s),
        }
    }
}

impl Error for ScriptError {}
