use clap::{Parser, Subcommand};
use rentals_app::config::LoggingConfig;

mod db;
mod payment_methods;

#[derive(Debug, Parser)]
#[command(name = "rentals-app", about = "Rentals CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    PaymentMethods(payment_methods::PaymentMethodsCommand),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::PaymentMethods(command) => payment_methods::run(command).await,
        }
    }
}
