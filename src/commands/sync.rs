//! Remote-to-local entitlement sync.

use clap::Args;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;

/// Arguments for the sync command
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Also drop the cached tier catalog
    #[arg(long)]
    pub refresh_tiers: bool,
}

/// Execute the sync command
pub async fn execute(args: &SyncArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    if args.refresh_tiers {
        ctx.engine.catalog().clear_cache().await;
    }

    match ctx.engine.sync().sync_snapshot(None, None).await {
        Some(snapshot) => {
            if format == OutputFormat::Json {
                output::print_json(&snapshot);
                return Ok(());
            }
            let tier_name = ctx.engine.catalog().display_name(&snapshot.tier).await;
            output::print_success(&format!("Synced {} ({tier_name})", snapshot.user_email));
            output::print_kv("Expires", &output::optional(snapshot.expiration.as_ref()));
            output::print_kv("Max Devices", &output::format_limit(snapshot.max_devices));
            output::print_kv("Max Groups", &output::format_limit(snapshot.max_groups));
            output::print_kv("Max Accounts", &output::format_limit(snapshot.max_accounts));
            Ok(())
        }
        None => Err(AppError::remote_unavailable(
            "Sync failed; the cached entitlement was left unchanged",
        )),
    }
}
