//! Type definitions used throughout the scripts

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, TxHash},
};

/// A request to deploy a single named contract
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRequest {
    /// The name of the contract, as it appears in the compilation artifacts
    pub contract_name: String,
    /// The constructor arguments, in declaration order
    pub constructor_args: Vec<DynSolValue>,
}

impl DeploymentRequest {
    /// Create a request to deploy a contract with no constructor arguments
    pub fn new(contract_name: &str) -> Self {
        Self::with_args(contract_name, Vec::new())
    }

    /// Create a request to deploy a contract with the given constructor arguments
    pub fn with_args(contract_name: &str, constructor_args: Vec<DynSolValue>) -> Self {
        Self {
            contract_name: contract_name.to_string(),
            constructor_args,
        }
    }
}

/// A deployment that has been submitted but not yet confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    /// The name of the contract being deployed
    pub contract_name: String,
    /// The hash of the contract creation transaction
    pub tx_hash: TxHash,
}

/// A deployment that has been confirmed on-chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDeployment {
    /// The name of the deployed contract
    pub contract_name: String,
    /// The address at which the contract was deployed
    pub address: Address,
    /// The hash of the contract creation transaction
    pub tx_hash: TxHash,
}

/// The confirmed deployments produced by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    /// The `SecureEstate` token contract
    pub token: ConfirmedDeployment,
    /// The `RealTok` contract, constructed with the token contract's address
    pub rs: ConfirmedDeployment,
}
