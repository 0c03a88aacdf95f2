//! The contract deployment capability consumed by the deployment runner,
//! and its JSON-RPC backed implementation

use std::{path::PathBuf, time::Duration};

use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::Address,
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::{
    artifacts::load_artifact,
    constants::{
        DEFAULT_CONFIRMATION_TIMEOUT, DEFAULT_NUM_DEPLOY_CONFIRMATIONS, DEFAULT_POLL_INTERVAL,
    },
    errors::ScriptError,
    types::{ConfirmedDeployment, DeploymentRequest, PendingDeployment},
};

/// A capability to deploy named contracts and await their confirmation
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    /// Submit a deployment of the requested contract, returning a handle to
    /// the pending deployment
    async fn deploy(&self, request: &DeploymentRequest) -> Result<PendingDeployment, ScriptError>;

    /// Wait until the given deployment is confirmed, returning the address of
    /// the deployed contract
    async fn await_confirmation(
        &self,
        pending: PendingDeployment,
    ) -> Result<ConfirmedDeployment, ScriptError>;
}

impl<D: ContractDeployer + ?Sized> ContractDeployer for &D {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<PendingDeployment, ScriptError> {
        (**self).deploy(request).await
    }

    async fn await_confirmation(
        &self,
        pending: PendingDeployment,
    ) -> Result<ConfirmedDeployment, ScriptError> {
        (**self).await_confirmation(pending).await
    }
}

/// A [`ContractDeployer`] that sends contract creation transactions through
/// an RPC provider, reading creation bytecode from compiled artifacts
pub struct RpcDeployer {
    /// The signing provider used to send transactions
    provider: DynProvider,
    /// The directory containing compiled contract artifacts
    artifacts_dir: PathBuf,
    /// The number of blocks, including the inclusion block, after which a
    /// deployment is considered confirmed
    confirmations: u64,
    /// The maximum time to wait for a deployment to confirm
    timeout: Duration,
    /// The interval between receipt polls
    poll_interval: Duration,
}

impl RpcDeployer {
    /// Create a new deployer with the default confirmation policy
    pub fn new(provider: DynProvider, artifacts_dir: PathBuf) -> Self {
        Self {
            provider,
            artifacts_dir,
            confirmations: DEFAULT_NUM_DEPLOY_CONFIRMATIONS,
            timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the number of confirmations to wait for
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        // A deployment is never confirmed before it is mined
        self.confirmations = confirmations.max(1);
        self
    }

    /// Set the maximum time to wait for a deployment to confirm
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the interval between receipt polls
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Check a mined receipt, returning whether it has enough confirmations
    async fn is_confirmed(
        &self,
        contract_name: &str,
        receipt: &TransactionReceipt,
    ) -> Result<bool, ScriptError> {
        if !receipt.status() {
            return Err(ScriptError::DeploymentReverted(format!(
                "{contract_name} (tx {:#x})",
                receipt.transaction_hash()
            )));
        }

        let Some(mined_in) = receipt.block_number() else {
            return Ok(false);
        };
        let latest = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let confirmations = latest.saturating_sub(mined_in) + 1;
        debug!(contract_name, confirmations, "deployment mined");
        Ok(confirmations >= self.confirmations)
    }

    /// Poll until the receipt is mined and deep enough, returning the address
    /// of the deployed contract
    async fn poll_until_confirmed(
        &self,
        pending: &PendingDeployment,
    ) -> Result<Address, ScriptError> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(pending.tx_hash)
                .await
                .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

            if let Some(receipt) = receipt {
                if self.is_confirmed(&pending.contract_name, &receipt).await? {
                    return receipt.contract_address().ok_or_else(|| {
                        ScriptError::ContractDeployment(format!(
                            "receipt for {} has no contract address",
                            pending.contract_name
                        ))
                    });
                }
            }

            sleep(self.poll_interval).await;
        }
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<PendingDeployment, ScriptError> {
        let artifact = load_artifact(&self.artifacts_dir, &request.contract_name)?;
        let deploy_code = artifact.deploy_code(&request.constructor_args)?;

        let tx = TransactionRequest::default().with_deploy_code(deploy_code);
        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let tx_hash = *pending_tx.tx_hash();
        info!(
            contract = %request.contract_name,
            tx_hash = %tx_hash,
            "sent deployment transaction"
        );

        Ok(PendingDeployment {
            contract_name: request.contract_name.clone(),
            tx_hash,
        })
    }

    async fn await_confirmation(
        &self,
        pending: PendingDeployment,
    ) -> Result<ConfirmedDeployment, ScriptError> {
        let address = timeout(self.timeout, self.poll_until_confirmed(&pending))
            .await
            .map_err(|_| {
                ScriptError::ConfirmationTimeout(format!(
                    "{} (tx {:#x}) after {:?}",
                    pending.contract_name, pending.tx_hash, self.timeout
                ))
            })??;

        Ok(ConfirmedDeployment {
            contract_name: pending.contract_name,
            address,
            tx_hash: pending.tx_hash,
        })
    }
}
