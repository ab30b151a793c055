use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::contracts::DesiredContract;

/// The part of a forge build artifact we care about.
#[derive(Debug, Deserialize)]
struct CompiledContract {
    abi: Value,
}

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub fn compiled_path(out_dir: &Path, contract: DesiredContract) -> PathBuf {
    out_dir
        .join(format!("{}.sol", contract.name()))
        .join(format!("{}.json", contract.name()))
}

pub fn binding_path(abi_dir: &Path, contract: DesiredContract) -> PathBuf {
    abi_dir.join(format!("{}.ts", contract.name()))
}

fn render_binding(abi: &Value) -> Result<String, serde_json::Error> {
    Ok(format!("export const abi = {} as const;\n", serde_json::to_string(abi)?))
}

pub fn extract(
    out_dir: &Path,
    abi_dir: &Path,
    contract: DesiredContract,
) -> Result<PathBuf, AbiError> {
    let file = File::open(compiled_path(out_dir, contract))?;
    let compiled: CompiledContract = serde_json::from_reader(BufReader::new(file))?;

    let output_path = binding_path(abi_dir, contract);
    fs::write(&output_path, render_binding(&compiled.abi)?)?;

    Ok(output_path)
}

/// Writes a TypeScript ABI module for every tracked contract.
///
/// A failing contract is logged and does not stop the others.
pub fn extract_all(
    out_dir: &Path,
    abi_dir: &Path,
) -> Result<Vec<(DesiredContract, Result<PathBuf, AbiError>)>, AbiError> {
    fs::create_dir_all(abi_dir)?;

    let results = DesiredContract::ALL
        .into_iter()
        .map(|contract| {
            let res = extract(out_dir, abi_dir, contract);
            match &res {
                Ok(path) => info!(path = %path.display(), "Successfully wrote ABI"),
                Err(err) => error!(contract = %contract, error = %err, "Failed to process ABI"),
            }
            (contract, res)
        })
        .collect();

    Ok(results)
}
