//! Constants used in the deploy scripts

/// The directory the build framework writes compiled contract artifacts to
pub const ARTIFACTS_DIR: &str = "artifacts";

/// The directory the build framework keeps its incremental build state in
pub const CACHE_DIR: &str = "cache";

/// The directory typed contract bindings are generated into
pub const TYPECHAIN_DIR: &str = "typechain-types";

/// The build output directories cleared by the `clear` command, in the order
/// they are purged
pub const BUILD_OUTPUT_DIRS: [&str; 3] = [ARTIFACTS_DIR, CACHE_DIR, TYPECHAIN_DIR];

/// The subdirectory of the artifacts directory holding per-source artifacts
pub const CONTRACTS_PATH_SEGMENT: &str = "contracts";

/// The extension of Solidity source files
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of JSON files
pub const JSON_EXTENSION: &str = "json";

/// The name of the contract deployed by default
pub const PRIVATE_DOC_CONTRACT_NAME: &str = "PrivateDoc";

/// The default constructor argument of the `PrivateDoc` contract
pub const DEFAULT_PRIVATE_DOC_OWNER: &str = "0xf1d5A4481F44fe0818b6E7Ef4A60c0c9b29E3118";

/// The default RPC URL, a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default directory exported ABIs are written to
pub const DEFAULT_ABI_OUT_DIR: &str = "abi";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The number of confirmations to wait for before submitting a contract to the
/// block explorer, so that the explorer has indexed the deployment
pub const NUM_VERIFY_CONFIRMATIONS: u64 = 6;

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The Node.js package runner used to invoke the build framework
pub const NPX_COMMAND: &str = "npx";

/// The name of the build framework's CLI
pub const HARDHAT_COMMAND: &str = "hardhat";

/// The build framework's compile task
pub const COMPILE_TASK: &str = "compile";

/// The build framework's block explorer verification task
pub const VERIFY_TASK: &str = "verify";

/// The flag selecting the network of the verification task
pub const NETWORK_FLAG: &str = "--network";
