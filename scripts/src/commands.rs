//! Implementations of the various deploy scripts

use std::{path::Path, str::FromStr};

use alloy::primitives::Address;
use tracing::{error, info};

use crate::{
    artifacts::{export_abi, load_artifact},
    cli::{DeployArgs, ExportAbiArgs, VerifyArgs},
    constants::{ARTIFACTS_DIR, BUILD_OUTPUT_DIRS, NUM_VERIFY_CONFIRMATIONS},
    deployments::{parse_addr_from_deployments_file, write_deployed_address},
    errors::ScriptError,
    purge::{purge_dir, Filesystem, OsFilesystem, PurgeOutcome},
    utils::{compile_contracts, deploy_calldata, deploy_contract, setup_client, verify_contract},
};

/// Purges each build output directory under `project_root`, one after the
/// other, stopping at the first failure
pub fn clear_build_outputs<F: Filesystem + ?Sized>(
    fs: &F,
    project_root: &Path,
) -> Result<Vec<PurgeOutcome>, ScriptError> {
    BUILD_OUTPUT_DIRS
        .iter()
        .map(|dir| purge_dir(fs, &project_root.join(dir)))
        .collect()
}

/// Clears the build outputs of the project in the working directory
pub fn clear() -> Result<(), ScriptError> {
    let outcomes = clear_build_outputs(&OsFilesystem, Path::new("."))?;

    let removed = outcomes
        .iter()
        .filter(|outcome| **outcome == PurgeOutcome::Removed)
        .count();
    info!("Cleared {removed} of {} build output directories", outcomes.len());

    Ok(())
}

/// Compiles & deploys the contract, then records its address and optionally
/// submits it for verification
pub async fn deploy(args: DeployArgs) -> Result<(), ScriptError> {
    if args.clean {
        clear()?;
    }

    if !args.skip_build {
        compile_contracts()?;
    }

    let owner = Address::from_str(&args.owner)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
    let artifact = load_artifact(Path::new(ARTIFACTS_DIR), &args.contract)?;
    let client = setup_client(&args.priv_key, &args.rpc_url)?;

    // The block explorer needs a few blocks to index the deployment
    let confirmations = if args.verify_network.is_some() {
        args.confirmations.max(NUM_VERIFY_CONFIRMATIONS)
    } else {
        args.confirmations
    };

    info!("{} deployment in progress...", artifact.contract_name);
    let calldata = deploy_calldata(&artifact, owner);
    let address = deploy_contract(&client, calldata, confirmations).await?;
    info!("{} deployed at {address:#x}", artifact.contract_name);

    write_deployed_address(&args.deployments_path, &artifact.contract_name, address)?;

    if let Some(network) = args.verify_network {
        if let Err(e) = verify_contract(&network, address, &[args.owner]) {
            error!("{e}");
        }
    }

    Ok(())
}

/// The address to verify: the one given explicitly, or else the one recorded
/// for the contract in the deployments file
pub fn resolve_verify_address(args: &VerifyArgs) -> Result<Address, ScriptError> {
    match &args.address {
        Some(address) => Address::from_str(address)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string())),
        None => parse_addr_from_deployments_file(&args.deployments_path, &args.contract),
    }
}

/// Submits an already-deployed contract for verification
pub fn verify(args: VerifyArgs) -> Result<(), ScriptError> {
    let address = resolve_verify_address(&args)?;

    verify_contract(&args.network, address, &args.constructor_args)
}

/// Exports the ABI of a compiled contract
pub fn export_contract_abi(args: ExportAbiArgs) -> Result<(), ScriptError> {
    let artifact = load_artifact(Path::new(ARTIFACTS_DIR), &args.contract)?;
    let out_path = export_abi(&artifact, &args.out_dir)?;
    info!("{} ABI written to {}", artifact.contract_name, out_path.display());

    Ok(())
}
