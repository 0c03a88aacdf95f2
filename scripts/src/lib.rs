//! Scripts for deploying the SecureEstate token and RealTok contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod deployer;
pub mod deployments;
pub mod errors;
pub mod runner;
pub mod types;
pub mod utils;
