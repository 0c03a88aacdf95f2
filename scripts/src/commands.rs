//! Implementation of the deploy command

use std::path::Path;

use tracing::info;

use crate::{
    cli::Cli,
    constants::{REAL_TOK_CONTRACT_KEY, SECURE_ESTATE_CONTRACT_KEY},
    deployer::RpcDeployer,
    deployments::{read_deployment, write_deployment},
    errors::ScriptError,
    runner::DeploymentRunner,
    types::DeploymentSummary,
    utils::setup_client,
};

/// Deploy both contracts over RPC as configured by the CLI arguments,
/// recording the addresses in the deployments file if one is given
pub async fn deploy_contracts(args: &Cli) -> Result<DeploymentSummary, ScriptError> {
    let client = setup_client(&args.priv_key, &args.rpc_url)?;
    info!(rpc_url = %args.rpc_url, artifacts = %args.artifacts_dir.display(), "client ready");

    let deployer = RpcDeployer::new(client, args.artifacts_dir.clone())
        .with_confirmations(args.confirmations)
        .with_timeout(args.timeout())
        .with_poll_interval(args.poll_interval());

    let summary = DeploymentRunner::new(deployer).run().await?;

    if let Some(path) = &args.deployments_path {
        record_deployments(path, &summary)?;
    }

    Ok(summary)
}

/// Write both confirmed addresses to the deployments file, reading each back
/// to check it was recorded
pub fn record_deployments(path: &Path, summary: &DeploymentSummary) -> Result<(), ScriptError> {
    for (key, address) in [
        (SECURE_ESTATE_CONTRACT_KEY, summary.token.address),
        (REAL_TOK_CONTRACT_KEY, summary.rs.address),
    ] {
        write_deployment(path, key, address)?;

        let recorded = read_deployment(path, key)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        if recorded != address {
            return Err(ScriptError::WriteDeployments(format!(
                "{key} recorded as {recorded}, expected {address}"
            )));
        }
    }
    info!(path = %path.display(), "recorded deployments");

    Ok(())
}
