use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    chains::SupportedChain,
    contracts::DesiredContract,
    types::{Address, AddressError, DeploymentRegistry},
};

const RUN_LATEST: &str = "run-latest.json";

static DEPLOYMENTS: OnceLock<DeploymentRegistry> = OnceLock::new();

/// One chain's broadcast log, as written by `forge script --broadcast`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentArtifact {
    pub chain: SupportedChain,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// `null` for plain calls.
    #[serde(default)]
    pub contract_name: Option<String>,
    pub contract_address: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serde error in {path}: {source}")]
    SerdeError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Artifact {path} is tagged with chain {found}, expected {expected}")]
    ChainMismatch {
        path: PathBuf,
        expected: SupportedChain,
        found: SupportedChain,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    MalformedAddress(#[from] AddressError),

    #[error("Deployment registry is already initialized")]
    AlreadyInitialized,
}

pub fn artifact_path(broadcast_dir: &Path, script: &str, chain: SupportedChain) -> PathBuf {
    broadcast_dir
        .join(script)
        .join(chain.id().to_string())
        .join(RUN_LATEST)
}

pub fn read_artifact(
    path: &Path,
    expected: SupportedChain,
) -> Result<DeploymentArtifact, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: DeploymentArtifact =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::SerdeError {
            path: path.to_path_buf(),
            source,
        })?;

    if artifact.chain != expected {
        return Err(LoadError::ChainMismatch {
            path: path.to_path_buf(),
            expected,
            found: artifact.chain,
        });
    }

    Ok(artifact)
}

/// Reads the latest broadcast of `script` for every supported chain.
pub fn load_artifacts(
    broadcast_dir: &Path,
    script: &str,
) -> Result<Vec<DeploymentArtifact>, LoadError> {
    SupportedChain::ALL
        .into_iter()
        .map(|chain| -> Result<DeploymentArtifact, LoadError> {
            let path = artifact_path(broadcast_dir, script, chain);
            let artifact = read_artifact(&path, chain)?;
            debug!(
                chain = %chain,
                path = %path.display(),
                transactions = artifact.transactions.len(),
                "Loaded deployment artifact"
            );
            Ok(artifact)
        })
        .collect()
}

/// Folds artifacts, in order, into one registry.
///
/// Every address is validated before its contract name is looked at, so a
/// malformed address fails the build even on an ignored record. Later records
/// for the same contract and chain replace earlier ones.
pub fn build_registry(
    artifacts: &[DeploymentArtifact],
) -> Result<DeploymentRegistry, RegistryError> {
    let mut registry = DeploymentRegistry::default();

    for artifact in artifacts {
        for transaction in &artifact.transactions {
            let address = Address::parse(&transaction.contract_address)?;

            let Some(contract) = transaction
                .contract_name
                .as_deref()
                .and_then(DesiredContract::from_name)
            else {
                debug!(
                    contract = ?transaction.contract_name,
                    chain_id = artifact.chain.id(),
                    "Skipping contract that is not tracked"
                );
                continue;
            };

            if let Some(previous) = registry.insert(contract, artifact.chain, address) {
                warn!(
                    contract = %contract,
                    chain_id = artifact.chain.id(),
                    previous = %previous,
                    "Overwriting existing deployment address"
                );
            }
        }
    }

    Ok(registry)
}

/// Installs the process-wide registry. Only the first call succeeds.
pub fn init(registry: DeploymentRegistry) -> Result<&'static DeploymentRegistry, RegistryError> {
    DEPLOYMENTS
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInitialized)?;

    let registry = DEPLOYMENTS.get().ok_or(RegistryError::AlreadyInitialized)?;
    info!(contracts = registry.len(), "Deployment registry ready");

    Ok(registry)
}

pub fn deployments() -> Option<&'static DeploymentRegistry> {
    DEPLOYMENTS.get()
}
