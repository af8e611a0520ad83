//! Loading of compiled contract artifacts and ABI export

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::primitives::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    constants::{CONTRACTS_PATH_SEGMENT, JSON_EXTENSION, SOLIDITY_EXTENSION},
    errors::ScriptError,
};

/// The subset of a compiled-artifact file used by the scripts
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    /// The name of the contract
    contract_name: String,
    /// The contract's ABI
    abi: Value,
    /// The hex-encoded creation bytecode
    bytecode: String,
}

/// A compiled contract
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The contract's ABI, as emitted by the compiler
    pub abi: Value,
    /// The contract's creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

/// The path of the artifact for `contract_name`, assuming the contract is
/// declared in a source file of the same name
pub fn artifact_path(artifacts_dir: &Path, contract_name: &str) -> PathBuf {
    artifacts_dir
        .join(CONTRACTS_PATH_SEGMENT)
        .join(format!("{contract_name}.{SOLIDITY_EXTENSION}"))
        .join(format!("{contract_name}.{JSON_EXTENSION}"))
}

/// Parses the artifact for `contract_name` out of `artifacts_dir`
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, ScriptError> {
    let path = artifact_path(artifacts_dir, contract_name);
    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;

    parse_artifact(&contents)
}

/// Parses the JSON contents of an artifact file
pub fn parse_artifact(contents: &str) -> Result<ContractArtifact, ScriptError> {
    let raw: RawArtifact =
        serde_json::from_str(contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    if !raw.abi.is_array() {
        return Err(ScriptError::ArtifactParsing(format!(
            "ABI of `{}` is not an array",
            raw.contract_name
        )));
    }

    let bytecode =
        Bytes::from_str(&raw.bytecode).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    // Abstract contracts and interfaces compile to empty bytecode
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "`{}` has no creation bytecode",
            raw.contract_name
        )));
    }

    Ok(ContractArtifact {
        contract_name: raw.contract_name,
        abi: raw.abi,
        bytecode,
    })
}

/// Writes the ABI of `artifact` to `<out_dir>/<contract name>.json`,
/// creating `out_dir` if needed, and returns the path written to
pub fn export_abi(artifact: &ContractArtifact, out_dir: &Path) -> Result<PathBuf, ScriptError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| ScriptError::WriteFile(format!("{}: {}", out_dir.display(), e)))?;

    let out_path = out_dir.join(format!("{}.{JSON_EXTENSION}", artifact.contract_name));
    let abi_json = serde_json::to_string_pretty(&artifact.abi)
        .map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    fs::write(&out_path, abi_json)
        .map_err(|e| ScriptError::WriteFile(format!("{}: {}", out_path.display(), e)))?;

    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use super::{artifact_path, parse_artifact};
    use crate::errors::ScriptError;

    fn artifact_json(bytecode: &str, abi: serde_json::Value) -> String {
        json!({
            "_format": "hh-sol-artifact-1",
            "contractName": "PrivateDoc",
            "sourceName": "contracts/PrivateDoc.sol",
            "abi": abi,
            "bytecode": bytecode,
            "deployedBytecode": "0x",
            "linkReferences": {},
            "deployedLinkReferences": {}
        })
        .to_string()
    }

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            artifact_path(Path::new("artifacts"), "PrivateDoc"),
            Path::new("artifacts/contracts/PrivateDoc.sol/PrivateDoc.json")
        );
    }

    #[test]
    fn test_parse_artifact() {
        let abi = json!([{ "type": "constructor", "inputs": [{ "name": "owner", "type": "address" }] }]);
        let artifact = parse_artifact(&artifact_json("0x6080604052", abi.clone())).unwrap();

        assert_eq!(artifact.contract_name, "PrivateDoc");
        assert_eq!(artifact.abi, abi);
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_parse_artifact_rejects_empty_bytecode() {
        let res = parse_artifact(&artifact_json("0x", json!([])));
        assert!(matches!(res, Err(ScriptError::ArtifactParsing(_))));
    }

    #[test]
    fn test_parse_artifact_rejects_malformed_json() {
        let res = parse_artifact("{ \"contractName\": \"PrivateDoc\" }");
        assert!(matches!(res, Err(ScriptError::ArtifactParsing(_))));
    }
}
