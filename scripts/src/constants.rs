//! Constants used in the deploy scripts

use std::time::Duration;

// -------------
// | Contracts |
// -------------

/// The name of the token contract, deployed first
pub const SECURE_ESTATE_CONTRACT_NAME: &str = "SecureEstate";

/// The name of the real-estate contract, deployed second with the token
/// contract's address as its constructor argument
pub const REAL_TOK_CONTRACT_NAME: &str = "RealTok";

/// The label used when logging the token contract's deployment
pub const TOKEN_LOG_LABEL: &str = "Token";

/// The label used when logging the real-estate contract's deployment
pub const RS_LOG_LABEL: &str = "RS";

// ---------------
// | Deployments |
// ---------------

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The SecureEstate contract key in the `deployments.json` file
pub const SECURE_ESTATE_CONTRACT_KEY: &str = "secure_estate_contract";

/// The RealTok contract key in the `deployments.json` file
pub const REAL_TOK_CONTRACT_KEY: &str = "real_tok_contract";

// -------------
// | Artifacts |
// -------------

/// The directory in which hardhat nests per-source artifact directories
pub const HARDHAT_SOURCES_DIR: &str = "contracts";

/// The extension of a Solidity source file, used to name artifact directories
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The directory in which hardhat stores full compiler input and output,
/// never searched for contract artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The extension of a compilation artifact
pub const ARTIFACT_EXTENSION: &str = "json";

// ----------
// | Client |
// ----------

/// The default private key, the first default account of a local Anvil or
/// Hardhat node
pub const DEFAULT_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default RPC URL, a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default directory containing compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The default number of confirmations to wait for on each deployment
pub const DEFAULT_NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The default number of seconds to wait for a deployment to confirm
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

/// The default number of milliseconds between receipt polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// The default interval between receipt polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

/// The default time to wait for a deployment to confirm
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration =
    Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS);

// --------------
// | Exit codes |
// --------------

/// The process exit code reported when every deployment succeeds
pub const SUCCESS_EXIT_CODE: i32 = 0;

/// The process exit code reported when any deployment fails
pub const FAILURE_EXIT_CODE: i32 = 1;
