//! CLI command definitions and dispatch.

pub mod account;
pub mod check;
pub mod device;
pub mod group;
pub mod migrate;
pub mod status;
pub mod sync;
pub mod tiers;
pub mod usage;

use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::output::OutputFormat;
use quotaguard_core::config::AppConfig;
use quotaguard_core::error::AppError;
use quotaguard_core::types::Principal;

/// Quotaguard license and entitlement enforcement
#[derive(Debug, Parser)]
#[command(name = "quotaguard", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and environment overlays
    #[arg(short = 'c', long = "config-dir", default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to merge on top of `default.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Act as this user instead of the configured session
    #[arg(long, requires = "account_id")]
    pub email: Option<String>,

    /// Account id for `--email`
    #[arg(long, requires = "email")]
    pub account_id: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the cached entitlement status
    Status(status::StatusArgs),
    /// Pull the remote entitlement into the local cache
    Sync(sync::SyncArgs),
    /// Browse the tier catalog
    Tiers(tiers::TiersArgs),
    /// Ask whether one more resource may be added
    Check(check::CheckArgs),
    /// Registered device management
    Device(device::DeviceArgs),
    /// Local group management
    Group(group::GroupArgs),
    /// Linked account management
    Account(account::AccountArgs),
    /// Show used versus allowed for every resource
    Usage,
    /// Local database migration management
    Migrate(migrate::MigrateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Migrate(args) = &self.command {
            return migrate::execute(args, &config).await;
        }

        let ctx = AppContext::build(&config, self.principal()).await?;
        let result = match &self.command {
            Commands::Status(args) => status::execute(args, &ctx, self.format).await,
            Commands::Sync(args) => sync::execute(args, &ctx, self.format).await,
            Commands::Tiers(args) => tiers::execute(args, &ctx, self.format).await,
            Commands::Check(args) => check::execute(args, &ctx, self.format).await,
            Commands::Device(args) => device::execute(args, &ctx, self.format).await,
            Commands::Group(args) => group::execute(args, &ctx, self.format).await,
            Commands::Account(args) => account::execute(args, &ctx, self.format).await,
            Commands::Usage => usage::execute(&ctx, self.format).await,
            Commands::Migrate(_) => Ok(()),
        };
        ctx.db.close().await;
        result
    }

    fn principal(&self) -> Option<Principal> {
        match (&self.email, &self.account_id) {
            (Some(email), Some(account_id)) => Some(Principal::new(email, account_id)),
            _ => None,
        }
    }
}

/// Ask for confirmation on stdin unless `force` is set.
pub fn confirm(prompt: &str, force: bool) -> Result<bool, AppError> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
