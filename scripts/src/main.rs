use std::process;

use clap::Parser;
use estate_scripts::{
    cli::{parse_error_exit_code, Cli},
    commands::deploy_contracts,
    utils::exit_code,
};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout, parse errors to stderr
            let _ = e.print();
            process::exit(parse_error_exit_code(&e));
        },
    };

    // Logs go to stderr, stdout only carries the deployed addresses
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .init();

    let result = deploy_contracts(&cli).await;
    if let Err(e) = &result {
        error!(error = %e, "deployment failed");
        eprintln!("{e}");
    }

    process::exit(exit_code(&result));
}
