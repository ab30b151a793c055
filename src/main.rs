mod abis;
mod chains;
mod contracts;
mod deployments;
mod types;
mod write;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use chains::SupportedChain;

const BROADCAST_DIR: &str = "broadcast";
const DEPLOY_SCRIPT: &str = "Deploy.s.sol";
const FORGE_OUT_DIR: &str = "out";
const ABI_DIR: &str = "ts/abis";
const TARGET_FOLDER: &str = "ts/generated";

/// Generates ABI bindings and the multi-chain deployment registry.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder holding `forge script --broadcast` logs
    #[arg(long, default_value = BROADCAST_DIR)]
    broadcast_dir: PathBuf,

    /// Deploy script whose latest run is read for every chain
    #[arg(long, default_value = DEPLOY_SCRIPT)]
    script: String,

    /// Forge build output folder
    #[arg(long, default_value = FORGE_OUT_DIR)]
    out_dir: PathBuf,

    /// Folder for generated ABI modules
    #[arg(long, default_value = ABI_DIR)]
    abi_dir: PathBuf,

    /// Folder for the generated registry
    #[arg(long, default_value = TARGET_FOLDER)]
    target: PathBuf,

    /// Do not regenerate ABI modules
    #[arg(long)]
    skip_abis: bool,

    /// Print the addresses deployed on this chain id
    #[arg(long)]
    chain: Option<SupportedChain>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if !args.skip_abis {
        abis::extract_all(&args.out_dir, &args.abi_dir).with_context(|| {
            format!("Failed to prepare ABI folder {}", args.abi_dir.display())
        })?;
    }

    let artifacts = deployments::load_artifacts(&args.broadcast_dir, &args.script)
        .context("Failed to load deployment artifacts")?;

    let registry =
        deployments::build_registry(&artifacts).context("Failed to build deployment registry")?;
    let registry = deployments::init(registry)?;

    let (json_path, ts_path) =
        write::write(&args.target, registry).context("Failed to write deployment registry")?;
    info!(
        json = %json_path.display(),
        ts = %ts_path.display(),
        contracts = registry.len(),
        "Wrote deployment registry"
    );

    for (contract, chains) in registry.contracts() {
        info!(contract = %contract, chains = chains.len(), "Registered deployments");
    }

    if let (Some(chain), Some(registry)) = (args.chain, deployments::deployments()) {
        for (contract, address) in registry.on_chain(chain) {
            println!("{contract}: {address}");
        }
        info!(chain = %chain, "Listed deployments");
    }

    Ok(())
}
