//! Definitions of CLI arguments for the deploy script

use std::{path::PathBuf, time::Duration};

use clap::{error::ErrorKind, Parser};

use crate::constants::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_NUM_DEPLOY_CONFIRMATIONS,
    DEFAULT_PKEY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RPC_URL, FAILURE_EXIT_CODE, SUCCESS_EXIT_CODE,
};

/// Deploy the SecureEstate token contract, then the RealTok contract bound
/// to it.
///
/// Every argument has a default, so running without arguments deploys to a
/// local devnet node with its first default account.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(
        short,
        long,
        env = "PKEY",
        default_value = DEFAULT_PKEY,
        hide_default_value = true,
        hide_env_values = true
    )]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Number of blocks, including the inclusion block, to wait for on each
    /// deployment
    #[arg(
        short,
        long,
        env = "CONFIRMATIONS",
        default_value_t = DEFAULT_NUM_DEPLOY_CONFIRMATIONS
    )]
    pub confirmations: u64,

    /// Seconds to wait for each deployment to confirm
    #[arg(
        long,
        env = "DEPLOY_TIMEOUT_SECS",
        default_value_t = DEFAULT_CONFIRMATION_TIMEOUT_SECS
    )]
    pub timeout_secs: u64,

    /// Milliseconds between polls for a deployment receipt
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// Path to a `deployments.json` file in which to record the deployed
    /// addresses
    #[arg(short, long, env = "DEPLOYMENTS_PATH")]
    pub deployments_path: Option<PathBuf>,
}

impl Cli {
    /// The maximum time to wait for each deployment to confirm
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The interval between receipt polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// The exit code for a failed argument parse. Help and version output exit
/// successfully, every malformed flag or environment value is a failed run.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => SUCCESS_EXIT_CODE,
        _ => FAILURE_EXIT_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["estate-scripts"]).unwrap();

        assert_eq!(cli.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(cli.artifacts_dir, PathBuf::from(DEFAULT_ARTIFACTS_DIR));
        assert_eq!(cli.confirmations, DEFAULT_NUM_DEPLOY_CONFIRMATIONS);
        assert_eq!(cli.timeout(), Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS));
        assert!(cli.deployments_path.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "estate-scripts",
            "--rpc-url",
            "http://localhost:9545",
            "-c",
            "3",
            "--poll-interval-ms",
            "50",
            "-d",
            "deployments.json",
        ])
        .unwrap();

        assert_eq!(cli.rpc_url, "http://localhost:9545");
        assert_eq!(cli.confirmations, 3);
        assert_eq!(cli.poll_interval(), Duration::from_millis(50));
        assert_eq!(cli.deployments_path, Some(PathBuf::from("deployments.json")));
    }

    #[test]
    fn test_malformed_value_fails_run() {
        let err = Cli::try_parse_from(["estate-scripts", "--confirmations", "abc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(parse_error_exit_code(&err), FAILURE_EXIT_CODE);

        let err = Cli::try_parse_from(["estate-scripts", "--no-such-flag"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_help_and_version_succeed() {
        let err = Cli::try_parse_from(["estate-scripts", "--help"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), SUCCESS_EXIT_CODE);

        let err = Cli::try_parse_from(["estate-scripts", "--version"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), SUCCESS_EXIT_CODE);
    }
}
