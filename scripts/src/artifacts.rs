//! Loading of compiled contract artifacts and construction of deploy code

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    primitives::{hex, Bytes},
};
use ignore::WalkBuilder;
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{ARTIFACT_EXTENSION, BUILD_INFO_DIR, HARDHAT_SOURCES_DIR, SOLIDITY_EXTENSION},
    errors::ScriptError,
};

/// A compiled contract's ABI and creation bytecode
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The contract's creation bytecode
    pub bytecode: Bytes,
}

/// The subset of an artifact file we care about
#[derive(Deserialize)]
struct RawArtifact {
    /// The contract's ABI
    abi: JsonAbi,
    /// The contract's creation bytecode
    bytecode: RawBytecode,
}

/// Hardhat emits the bytecode as a bare hex string, foundry nests it
/// under an `object` key
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Hardhat layout
    Hex(String),
    /// Foundry layout
    Object {
        /// The hex-encoded bytecode
        object: String,
    },
}

impl RawBytecode {
    /// The hex-encoded bytecode, regardless of layout
    fn as_hex(&self) -> &str {
        match self {
            RawBytecode::Hex(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

impl ContractArtifact {
    /// Parse an artifact from the contents of its JSON file
    pub fn from_json(contract_name: &str, json: &str) -> Result<Self, ScriptError> {
        let raw: RawArtifact =
            serde_json::from_str(json).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        let bytecode = hex::decode(raw.bytecode.as_hex())
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{contract_name} has no creation bytecode, is it abstract?"
            )));
        }

        Ok(Self {
            contract_name: contract_name.to_string(),
            abi: raw.abi,
            bytecode: bytecode.into(),
        })
    }

    /// Build the deploy code for this contract: the creation bytecode followed
    /// by the ABI-encoded constructor arguments
    pub fn deploy_code(&self, constructor_args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        let encoded_args = match &self.abi.constructor {
            Some(constructor) => constructor
                .abi_encode_input(constructor_args)
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?,
            None if constructor_args.is_empty() => Vec::new(),
            None => {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{} has no constructor but {} arguments were given",
                    self.contract_name,
                    constructor_args.len()
                )))
            }
        };

        let mut code = self.bytecode.to_vec();
        code.extend(encoded_args);
        Ok(code.into())
    }
}

/// The candidate paths of a contract's artifact within the artifacts directory,
/// in search order
pub fn artifact_candidates(artifacts_dir: &Path, contract_name: &str) -> Vec<PathBuf> {
    let source_dir = format!("{contract_name}.{SOLIDITY_EXTENSION}");
    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");

    vec![
        artifacts_dir
            .join(HARDHAT_SOURCES_DIR)
            .join(&source_dir)
            .join(&file_name),
        artifacts_dir.join(&source_dir).join(&file_name),
        artifacts_dir.join(&file_name),
    ]
}

/// Find every artifact named after the contract anywhere under the artifacts
/// directory, skipping debug files and build info
pub fn find_artifacts(artifacts_dir: &Path, contract_name: &str) -> Vec<PathBuf> {
    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");

    WalkBuilder::new(artifacts_dir)
        .standard_filters(false)
        .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| entry.file_name().to_str() == Some(file_name.as_str()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Locate and parse the artifact for the given contract.
///
/// The conventional hardhat and foundry paths are tried first. Failing those,
/// the contract may live in a source file of a different name, so the whole
/// directory is searched and exactly one match is required.
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, ScriptError> {
    let path = match artifact_candidates(artifacts_dir, contract_name)
        .into_iter()
        .find(|p| p.is_file())
    {
        Some(path) => path,
        None => {
            let mut matches = find_artifacts(artifacts_dir, contract_name);
            match matches.len() {
                0 => {
                    return Err(ScriptError::ArtifactParsing(format!(
                        "no artifact found for {contract_name} in {}",
                        artifacts_dir.display()
                    )))
                }
                1 => matches.remove(0),
                _ => {
                    let paths: Vec<_> = matches.iter().map(|p| p.display().to_string()).collect();
                    return Err(ScriptError::ArtifactParsing(format!(
                        "multiple artifacts found for {contract_name}: {}",
                        paths.join(", ")
                    )));
                }
            }
        }
    };
    debug!(contract = contract_name, path = %path.display(), "loading artifact");

    let json =
        fs::read_to_string(&path).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
    ContractArtifact::from_json(contract_name, &json)
}
