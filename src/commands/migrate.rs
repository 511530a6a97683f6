//! Local database migration commands.

use clap::{Args, Subcommand};

use crate::output;
use quotaguard_core::config::AppConfig;
use quotaguard_core::error::AppError;
use quotaguard_database::DatabasePool;

/// Arguments for migration commands
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run pending migrations
    Run,
    /// Check database connectivity
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    crate::app::ensure_database_dir(&config.database.url).await?;
    let db = DatabasePool::connect(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running migrations...");
            quotaguard_database::migration::run_migrations(db.pool()).await?;
            output::print_success("Migrations completed");
            Ok(())
        }
        MigrateCommand::Check => {
            if db.health_check().await? {
                output::print_success(&format!("Database reachable at {}", config.database.url));
                Ok(())
            } else {
                Err(AppError::database("Database health check failed"))
            }
        }
    };
    db.close().await;
    result
}
