//! Rentals Application CLI

use std::process;

use clap::Parser;
use rentals_app::{config, logging};
use tracing::error;

mod cli;

#[tokio::main]
pub async fn main() {
    config::load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = logging::init(cli.logging()) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        error!(%error, "command failed");

        #[expect(clippy::print_stderr, reason = "failures are reported to the user")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
