//! The ordered two-step deployment of the token and real-estate contracts

use std::io::{self, Write};

use alloy::dyn_abi::DynSolValue;
use tracing::{info, warn};

use crate::{
    constants::{
        REAL_TOK_CONTRACT_NAME, RS_LOG_LABEL, SECURE_ESTATE_CONTRACT_NAME, TOKEN_LOG_LABEL,
    },
    deployer::ContractDeployer,
    errors::ScriptError,
    types::{ConfirmedDeployment, DeploymentRequest, DeploymentSummary},
};

/// Runs the deployment sequence against a [`ContractDeployer`].
///
/// `SecureEstate` is deployed and confirmed first; `RealTok` is then deployed
/// with the confirmed `SecureEstate` address as its only constructor argument.
/// The first failure aborts the sequence. Nothing is retried.
pub struct DeploymentRunner<D> {
    /// The deployer used for each step
    deployer: D,
}

impl<D: ContractDeployer> DeploymentRunner<D> {
    /// Create a runner over the given deployer
    pub fn new(deployer: D) -> Self {
        Self { deployer }
    }

    /// Run the deployment sequence, printing each deployed address to stdout
    pub async fn run(&self) -> Result<DeploymentSummary, ScriptError> {
        self.run_with_output(&mut io::stdout()).await
    }

    /// Run the deployment sequence, printing each deployed address to `out`
    pub async fn run_with_output<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<DeploymentSummary, ScriptError> {
        let token_request = DeploymentRequest::new(SECURE_ESTATE_CONTRACT_NAME);
        let token = self.deploy_step(&token_request, TOKEN_LOG_LABEL, out).await?;

        let rs_request = DeploymentRequest::with_args(
            REAL_TOK_CONTRACT_NAME,
            vec![DynSolValue::Address(token.address)],
        );
        let rs = self.deploy_step(&rs_request, RS_LOG_LABEL, out).await?;

        Ok(DeploymentSummary { token, rs })
    }

    /// Deploy a single contract, wait for it to confirm, and report its address
    async fn deploy_step<W: Write>(
        &self,
        request: &DeploymentRequest,
        label: &str,
        out: &mut W,
    ) -> Result<ConfirmedDeployment, ScriptError> {
        info!(contract = %request.contract_name, "deploying contract");
        let pending = self.deployer.deploy(request).await?;
        let confirmed = self.deployer.await_confirmation(pending).await?;

        info!(
            contract = %confirmed.contract_name,
            address = %confirmed.address,
            tx_hash = %confirmed.tx_hash,
            "deployment confirmed"
        );
        // A failed write does not fail a step that has already confirmed
        if let Err(e) = writeln!(out, "{}", deployed_line(label, &confirmed)) {
            warn!(
                contract = %confirmed.contract_name,
                address = %confirmed.address,
                error = %e,
                "failed to report deployed address"
            );
        }

        Ok(confirmed)
    }
}

/// The line reported for a confirmed deployment, with the address in its
/// EIP-55 checksummed form
pub fn deployed_line(label: &str, confirmed: &ConfirmedDeployment) -> String {
    format!("{label} Contract deployed to {}", confirmed.address)
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Mutex};

    use alloy::primitives::{address, Address, TxHash};

    use super::*;
    use crate::types::PendingDeployment;

    /// A deployer that hands out sequential addresses and fails on a chosen
    /// contract
    struct SequentialDeployer {
        /// The contract whose deployment fails, if any
        fail_on: Option<&'static str>,
        /// The requests received, in order
        requests: Mutex<Vec<DeploymentRequest>>,
    }

    impl SequentialDeployer {
        /// Create a deployer failing confirmation of `fail_on`, if given
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                fail_on,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// The requests received so far
        fn requests(&self) -> Vec<DeploymentRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ContractDeployer for SequentialDeployer {
        async fn deploy(
            &self,
            request: &DeploymentRequest,
        ) -> Result<PendingDeployment, ScriptError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            let n = requests.len() as u8;

            Ok(PendingDeployment {
                contract_name: request.contract_name.clone(),
                tx_hash: TxHash::repeat_byte(n),
            })
        }

        async fn await_confirmation(
            &self,
            pending: PendingDeployment,
        ) -> Result<ConfirmedDeployment, ScriptError> {
            if self.fail_on == Some(pending.contract_name.as_str()) {
                return Err(ScriptError::ConfirmationTimeout(pending.contract_name));
            }

            Ok(ConfirmedDeployment {
                address: Address::repeat_byte(pending.tx_hash[0]),
                contract_name: pending.contract_name,
                tx_hash: pending.tx_hash,
            })
        }
    }

    /// A writer that always fails
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_deployed_line_is_checksummed() {
        let confirmed = ConfirmedDeployment {
            contract_name: "SecureEstate".to_string(),
            address: address!("5fbdb2315678afecb367f032d93f642f64180aa3"),
            tx_hash: TxHash::ZERO,
        };

        assert_eq!(
            deployed_line("Token", &confirmed),
            "Token Contract deployed to 0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[tokio::test]
    async fn test_failed_write_does_not_fail_run() {
        let deployer = SequentialDeployer::new(None);
        let summary = DeploymentRunner::new(&deployer)
            .run_with_output(&mut BrokenPipe)
            .await
            .unwrap();

        assert_eq!(summary.rs.address, Address::repeat_byte(2));
        assert_eq!(deployer.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_second_step_receives_confirmed_address() {
        let deployer = SequentialDeployer::new(None);
        let mut out = Vec::new();

        let summary = DeploymentRunner::new(&deployer).run_with_output(&mut out).await.unwrap();
        let requests = deployer.requests();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], DeploymentRequest::new("SecureEstate"));
        assert_eq!(
            requests[1].constructor_args,
            vec![DynSolValue::Address(summary.token.address)]
        );
        assert_eq!(summary.rs.address, Address::repeat_byte(2));
    }

    #[tokio::test]
    async fn test_confirmation_failure_stops_sequence() {
        let deployer = SequentialDeployer::new(Some("SecureEstate"));
        let mut out = Vec::new();

        let err = DeploymentRunner::new(&deployer).run_with_output(&mut out).await.unwrap_err();
        let requests = deployer.requests();

        assert_eq!(err, ScriptError::ConfirmationTimeout("SecureEstate".to_string()));
        // Submitted but never confirmed, so nothing reported and no second step
        assert_eq!(requests.len(), 1);
        assert!(out.is_empty());
    }
}
