use clap::Args;
use rentals_app::{config::DatabaseConfig, context::AppContext, tenants::TenantId};

#[derive(Debug, Args)]
pub(crate) struct ListPaymentMethodsArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Tenant whose payment methods should be listed
    #[arg(long)]
    tenant: TenantId,
}

#[expect(clippy::print_stdout, reason = "listing is the command output")]
pub(crate) async fn run(args: ListPaymentMethodsArgs) -> Result<(), String> {
    let context = AppContext::init(&args.database)
        .await
        .map_err(|error| format!("failed to initialise application: {error}"))?;

    let methods = context
        .payments_service
        .available_payment_methods(&args.tenant)
        .await
        .map_err(|error| format!("failed to list payment methods: {error}"))?;

    context.close().await;

    for method in methods {
        println!("uuid: {}", method.uuid);
        println!("name: {}", method.data.name);
        println!("owner: {}", method.tenant);
        println!("system_default: {}", method.data.is_system_default);
        println!();
    }

    Ok(())
}
