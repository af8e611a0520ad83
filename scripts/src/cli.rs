//! Definitions of CLI arguments and commands for the deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{clear, deploy, export_contract_abi, verify},
    constants::{
        DEFAULT_ABI_OUT_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_PRIVATE_DOC_OWNER, DEFAULT_RPC_URL,
        NUM_DEPLOY_CONFIRMATIONS, PRIVATE_DOC_CONTRACT_NAME,
    },
    errors::ScriptError,
};

/// Build, deploy & verify the PrivateDoc contract
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The scripts available from the CLI
#[derive(Subcommand)]
pub enum Command {
    /// Delete the artifacts, cache & typechain-types directories
    Clear,
    /// Compile & deploy a contract, recording its address in the deployments file
    Deploy(DeployArgs),
    /// Verify an already-deployed contract on the block explorer
    Verify(VerifyArgs),
    /// Write a contract's ABI to a standalone JSON file
    ExportAbi(ExportAbiArgs),
}

impl Command {
    /// Runs the selected script
    pub async fn run(self) -> Result<(), ScriptError> {
        match self {
            Command::Clear => clear(),
            Command::Deploy(args) => deploy(args).await,
            Command::Verify(args) => verify(args),
            Command::ExportAbi(args) => export_contract_abi(args),
        }
    }
}

/// Arguments for the `deploy` script
#[derive(Args)]
pub struct DeployArgs {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// The contract to deploy
    #[arg(short, long, default_value = PRIVATE_DOC_CONTRACT_NAME)]
    pub contract: String,

    /// Address passed to the contract constructor
    #[arg(short, long, default_value = DEFAULT_PRIVATE_DOC_OWNER)]
    pub owner: String,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Number of confirmations to wait for after the deployment is mined
    #[arg(long, default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Clear the build outputs before compiling
    #[arg(long)]
    pub clean: bool,

    /// Deploy the existing artifacts without compiling first
    #[arg(long)]
    pub skip_build: bool,

    /// Verify the deployed contract on the block explorer of this network.
    /// Verification failures are logged but do not fail the deployment.
    #[arg(long)]
    pub verify_network: Option<String>,
}

/// Arguments for the `verify` script
#[derive(Args)]
pub struct VerifyArgs {
    /// The network the contract is deployed on
    #[arg(short, long)]
    pub network: String,

    /// The address of the deployed contract. Defaults to the address
    /// recorded for `--contract` in the deployments file
    #[arg(short, long)]
    pub address: Option<String>,

    /// The contract whose recorded address to verify
    #[arg(long, default_value = PRIVATE_DOC_CONTRACT_NAME)]
    pub contract: String,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Arguments the contract was constructed with
    #[arg(short, long)]
    pub constructor_args: Vec<String>,
}

/// Arguments for the `export-abi` script
#[derive(Args)]
pub struct ExportAbiArgs {
    /// The contract whose ABI to export
    #[arg(short, long, default_value = PRIVATE_DOC_CONTRACT_NAME)]
    pub contract: String,

    /// Directory to write the ABI file to
    #[arg(short, long, default_value = DEFAULT_ABI_OUT_DIR)]
    pub out_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{Cli, Command};
    use crate::constants::{DEFAULT_PRIVATE_DOC_OWNER, PRIVATE_DOC_CONTRACT_NAME};

    const TEST_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcaa3d4e8a9f1e3b1f";

    #[test]
    fn test_parse_clear() {
        let cli = Cli::try_parse_from(["scripts", "clear"]).unwrap();
        assert!(matches!(cli.command, Command::Clear));
    }

    #[test]
    fn test_clear_takes_no_args() {
        assert!(Cli::try_parse_from(["scripts", "clear", "artifacts"]).is_err());
    }

    #[test]
    fn test_parse_deploy_defaults() {
        let cli = Cli::try_parse_from(["scripts", "deploy", "--priv-key", TEST_PKEY]).unwrap();
        let Command::Deploy(args) = cli.command else {
            panic!("expected deploy command");
        };

        assert_eq!(args.contract, PRIVATE_DOC_CONTRACT_NAME);
        assert_eq!(args.owner, DEFAULT_PRIVATE_DOC_OWNER);
        assert_eq!(args.deployments_path, Path::new("deployments.json"));
        assert_eq!(args.confirmations, 1);
        assert!(!args.clean);
        assert!(!args.skip_build);
        assert!(args.verify_network.is_none());
    }

    #[test]
    fn test_parse_verify_constructor_args() {
        let cli = Cli::try_parse_from([
            "scripts",
            "verify",
            "--network",
            "goerli",
            "--address",
            DEFAULT_PRIVATE_DOC_OWNER,
            "--constructor-args",
            "a",
            "--constructor-args",
            "b",
        ])
        .unwrap();
        let Command::Verify(args) = cli.command else {
            panic!("expected verify command");
        };

        assert_eq!(args.network, "goerli");
        assert_eq!(args.address.as_deref(), Some(DEFAULT_PRIVATE_DOC_OWNER));
        assert_eq!(args.constructor_args, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_verify_without_address() {
        let cli = Cli::try_parse_from(["scripts", "verify", "--network", "goerli"]).unwrap();
        let Command::Verify(args) = cli.command else {
            panic!("expected verify command");
        };

        assert!(args.address.is_none());
        assert_eq!(args.contract, PRIVATE_DOC_CONTRACT_NAME);
        assert_eq!(args.deployments_path, Path::new("deployments.json"));
    }
}
