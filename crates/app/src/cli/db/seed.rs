use clap::Args;
use rentals_app::{
    config::DatabaseConfig,
    context::AppContext,
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseConfig,
}

#[expect(clippy::print_stdout, reason = "seed summary is the command output")]
pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    let context = AppContext::from_db(Db::new(pool));

    let report = context
        .seed()
        .await
        .map_err(|error| format!("failed to seed defaults: {error}"))?;

    context.close().await;

    if report.skipped {
        println!("defaults already present");
    } else {
        println!("inserted: {}", report.inserted);
        println!("already_present: {}", report.already_present);
    }

    Ok(())
}
