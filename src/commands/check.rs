//! Dry-run quota checks.

use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;

/// Arguments for check commands
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Resource to check
    #[command(subcommand)]
    pub command: CheckCommand,
}

/// Check subcommands
#[derive(Debug, Subcommand)]
pub enum CheckCommand {
    /// Could this device be registered?
    Device {
        /// Device identifier
        device_id: String,
    },
    /// Could another group be created?
    Group,
    /// Could another account be linked?
    Account,
}

/// Execute check commands
pub async fn execute(args: &CheckArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let quota = ctx.engine.quota();
    let decision = match &args.command {
        CheckCommand::Device { device_id } => quota.can_add_device(device_id).await,
        CheckCommand::Group => quota.can_add_group().await,
        CheckCommand::Account => quota.can_add_account().await,
    };
    output::print_decision(&decision, format);
    Ok(())
}
