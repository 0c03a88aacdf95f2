//! Reading and writing deployed addresses in a `deployments.json` file

use std::{fs, path::Path, str::FromStr};

use alloy::primitives::Address;
use serde_json::{json, Value};

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// Read a deployed address from the deployments file
pub fn read_deployment(file_path: &Path, contract_key: &str) -> Result<Address, ScriptError> {
    let parsed_json = read_json(file_path)?;

    let addr_str = parsed_json[DEPLOYMENTS_KEY][contract_key]
        .as_str()
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!(
                "key {contract_key} not found in {}",
                file_path.display()
            ))
        })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Write a deployed address to the deployments file, creating it if needed.
/// Other entries in the file are preserved.
pub fn write_deployment(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut parsed_json = if file_path.exists() {
        read_json(file_path).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?
    } else {
        json!({})
    };

    if !parsed_json.is_object() {
        return Err(ScriptError::WriteDeployments(format!(
            "{} is not a JSON object",
            file_path.display()
        )));
    }
    if !parsed_json[DEPLOYMENTS_KEY].is_object() {
        parsed_json[DEPLOYMENTS_KEY] = json!({});
    }
    parsed_json[DEPLOYMENTS_KEY][contract_key] = Value::String(format!("{address:#x}"));

    let contents = serde_json::to_string_pretty(&parsed_json)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}

/// Read and parse the deployments file
fn read_json(file_path: &Path) -> Result<Value, ScriptError> {
    let contents = fs::read_to_string(file_path).map_err(|e| {
        ScriptError::ReadDeployments(format!("{}: {e}", file_path.display()))
    })?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let token = Address::repeat_byte(0xaa);
        let rs = Address::repeat_byte(0xbb);

        write_deployment(&path, "secure_estate_contract", token).unwrap();
        write_deployment(&path, "real_tok_contract", rs).unwrap();

        assert_eq!(read_deployment(&path, "secure_estate_contract").unwrap(), token);
        assert_eq!(read_deployment(&path, "real_tok_contract").unwrap(), rs);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(&format!("0x{}", "bb".repeat(20))));
    }

    #[test]
    fn test_write_preserves_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        fs::write(&path, r#"{ "network": "devnet", "deployments": { "other": "x" } }"#).unwrap();

        write_deployment(&path, "real_tok_contract", Address::ZERO).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["network"], "devnet");
        assert_eq!(parsed["deployments"]["other"], "x");
        assert_eq!(read_deployment(&path, "real_tok_contract").unwrap(), Address::ZERO);
    }

    #[test]
    fn test_read_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        write_deployment(&path, "secure_estate_contract", Address::ZERO).unwrap();

        let err = read_deployment(&path, "real_tok_contract").unwrap_err();
        assert!(matches!(err, ScriptError::ReadDeployments(_)));
    }
}
