//! Reading and writing deployed contract addresses in the deployments file

use std::{fs, path::Path, str::FromStr};

use alloy::primitives::Address;
use serde_json::{Map, Value};

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// Parses the deployments file into a JSON value
fn read_deployments_json(file_path: &Path) -> Result<Value, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", file_path.display(), e)))?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Reads the address stored under `contract_key` in the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &Path,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    let parsed_json = read_deployments_json(file_path)?;

    let addr_str = parsed_json[DEPLOYMENTS_KEY][contract_key]
        .as_str()
        .ok_or_else(|| {
            ScriptError::ReadFile(format!(
                "no address for `{contract_key}` in deployments file"
            ))
        })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Records `address` under `contract_key` in the deployments file, creating
/// the file if it does not exist and preserving every other entry
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut parsed_json = if file_path.exists() {
        read_deployments_json(file_path)?
    } else {
        Value::Object(Map::new())
    };

    let root = parsed_json.as_object_mut().ok_or_else(|| {
        ScriptError::WriteFile("deployments file is not a JSON object".to_string())
    })?;
    let deployments = root
        .entry(DEPLOYMENTS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| {
            ScriptError::WriteFile(format!("`{DEPLOYMENTS_KEY}` is not a JSON object"))
        })?;

    deployments.insert(
        contract_key.to_string(),
        Value::String(format!("{address:#x}")),
    );

    let contents = serde_json::to_string_pretty(&parsed_json)
        .map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    fs::write(file_path, contents)
        .map_err(|e| ScriptError::WriteFile(format!("{}: {}", file_path.display(), e)))
}
