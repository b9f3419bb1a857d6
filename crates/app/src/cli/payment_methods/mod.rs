use clap::{Args, Subcommand};

mod list;

#[derive(Debug, Args)]
pub(crate) struct PaymentMethodsCommand {
    #[command(subcommand)]
    command: PaymentMethodsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PaymentMethodsSubcommand {
    /// List the payment methods available to a tenant
    List(list::ListPaymentMethodsArgs),
}

pub(crate) async fn run(command: PaymentMethodsCommand) -> Result<(), String> {
    match command.command {
        PaymentMethodsSubcommand::List(args) => list::run(args).await,
    }
}
