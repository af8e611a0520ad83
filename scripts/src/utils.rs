//! Utilities for the deploy scripts.

use std::{
    process::{Command, Stdio},
    str::FromStr,
};

use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    sol_types::SolValue,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::{
    artifacts::ContractArtifact,
    constants::{COMPILE_TASK, HARDHAT_COMMAND, NETWORK_FLAG, NPX_COMMAND, VERIFY_TASK},
    errors::ScriptError,
};

/// Sets up the client with which to send transactions, signing with the
/// given private key against the given RPC url
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DynProvider, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    Ok(DynProvider::new(provider))
}

/// Runs the command to completion with its output inherited, mapping a
/// failure to spawn or a non-zero exit status into an error built by `to_err`
fn command_success_or(
    mut cmd: Command,
    to_err: fn(String) -> ScriptError,
    err_msg: &str,
) -> Result<(), ScriptError> {
    cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    let status = cmd.status().map_err(|e| to_err(e.to_string()))?;

    if !status.success() {
        Err(to_err(format!("{err_msg} ({status})")))
    } else {
        Ok(())
    }
}

/// Compiles the Solidity contracts, populating the artifacts & cache directories.
///
/// Assumes that `npx` is available and the working directory is the project root.
pub fn compile_contracts() -> Result<(), ScriptError> {
    let mut build_cmd = Command::new(NPX_COMMAND);
    build_cmd.arg(HARDHAT_COMMAND).arg(COMPILE_TASK);

    command_success_or(
        build_cmd,
        ScriptError::ContractCompilation,
        "Failed to compile contracts",
    )
}

/// Builds the block explorer verification command for a deployed contract
pub fn verify_command(network: &str, address: Address, constructor_args: &[String]) -> Command {
    let mut verify_cmd = Command::new(NPX_COMMAND);
    verify_cmd
        .arg(HARDHAT_COMMAND)
        .arg(VERIFY_TASK)
        .arg(NETWORK_FLAG)
        .arg(network)
        .arg(format!("{address:#x}"))
        .args(constructor_args);

    verify_cmd
}

/// Submits the source & metadata of a deployed contract to the block explorer
pub fn verify_contract(
    network: &str,
    address: Address,
    constructor_args: &[String],
) -> Result<(), ScriptError> {
    info!("Block explorer verification in progress...");
    command_success_or(
        verify_command(network, address, constructor_args),
        ScriptError::ContractVerification,
        "Failed to verify contract",
    )?;
    info!("Block explorer verification done");

    Ok(())
}

/// Builds the deployment calldata: the creation bytecode followed by the
/// ABI-encoded constructor argument
pub fn deploy_calldata(artifact: &ContractArtifact, constructor_arg: Address) -> Bytes {
    let mut calldata = artifact.bytecode.to_vec();
    calldata.extend_from_slice(&constructor_arg.abi_encode());
    calldata.into()
}

/// Sends a contract creation transaction and waits for `confirmations` blocks,
/// returning the address of the deployed contract
pub async fn deploy_contract(
    client: &DynProvider,
    calldata: Bytes,
    confirmations: u64,
) -> Result<Address, ScriptError> {
    let tx = TransactionRequest::default().with_deploy_code(calldata);

    let receipt = client
        .send_transaction(tx)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .with_required_confirmations(confirmations)
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "transaction {:#x} reverted",
            receipt.transaction_hash()
        )));
    }

    receipt.contract_address().ok_or_else(|| {
        ScriptError::ContractDeployment("receipt has no contract address".to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy::primitives::{Address, Bytes};
    use serde_json::json;

    use super::{deploy_calldata, verify_command};
    use crate::artifacts::ContractArtifact;

    const OWNER: &str = "0xf1d5A4481F44fe0818b6E7Ef4A60c0c9b29E3118";

    #[test]
    fn test_deploy_calldata_appends_constructor_arg() {
        let artifact = ContractArtifact {
            contract_name: "PrivateDoc".to_string(),
            abi: json!([]),
            bytecode: Bytes::from(vec![0x60, 0x80]),
        };
        let owner = Address::from_str(OWNER).unwrap();

        let calldata = deploy_calldata(&artifact, owner);

        assert_eq!(calldata.len(), 2 + 32);
        assert_eq!(&calldata[..2], &[0x60, 0x80]);
        assert!(calldata[2..14].iter().all(|b| *b == 0));
        assert_eq!(&calldata[14..], owner.as_slice());
    }

    #[test]
    fn test_verify_command_args() {
        let owner = Address::from_str(OWNER).unwrap();
        let cmd = verify_command("goerli", owner, &[OWNER.to_string()]);

        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(cmd.get_program(), "npx");
        assert_eq!(
            args,
            vec![
                "hardhat".to_string(),
                "verify".to_string(),
                "--network".to_string(),
                "goerli".to_string(),
                format!("{owner:#x}"),
                OWNER.to_string(),
            ]
        );
    }
}
