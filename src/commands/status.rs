//! Cached entitlement status.

use clap::Args;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;
use quotaguard_core::types::EntitlementStatus;

/// Arguments for the status command
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Sync with the remote store before reading the cache
    #[arg(long)]
    pub refresh: bool,
}

/// Execute the status command
pub async fn execute(
    args: &StatusArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if args.refresh && !ctx.engine.sync().sync(None, None).await {
        output::print_warning("Sync failed; showing the last cached status");
    }

    let status = ctx.engine.status().check_status(None, None).await;
    let tier_name = ctx.engine.catalog().display_name(&status.tier).await;
    print_status(&status, &tier_name, format);
    Ok(())
}

/// Print a status in the selected format
pub fn print_status(status: &EntitlementStatus, tier_name: &str, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(status);
        return;
    }

    println!("Entitlement Status:");
    output::print_kv("Tier", tier_name);
    output::print_kv("Active", &status.is_active.to_string());
    output::print_kv("Expired", &status.expired.to_string());
    output::print_kv("Expires", &output::optional(status.expiration.as_ref()));
    output::print_kv("Days Left", &output::optional(status.days_until_expiration));
    output::print_kv("Max Devices", &output::format_limit(status.max_devices));
    output::print_kv("Max Groups", &output::format_limit(status.max_groups));
    output::print_kv("Max Accounts", &output::format_limit(status.max_accounts));
    output::print_kv(
        "Actions per Account",
        &status
            .max_account_actions
            .map_or_else(|| "-".to_string(), output::format_limit),
    );
    if !status.from_cache {
        output::print_warning("No cached entitlement; run `quotaguard sync`");
    }
}
