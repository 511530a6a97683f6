//! Tier catalog browsing.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;
use quotaguard_core::types::TierDefinition;

/// Arguments for tier commands
#[derive(Debug, Args)]
pub struct TiersArgs {
    /// Tier subcommand
    #[command(subcommand)]
    pub command: TiersCommand,
}

/// Tier subcommands
#[derive(Debug, Subcommand)]
pub enum TiersCommand {
    /// List purchasable tiers, cheapest first
    List,
    /// Show one tier
    Show {
        /// Tier key
        key: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct TierRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Devices")]
    devices: String,
    #[tabled(rename = "Groups")]
    groups: String,
    #[tabled(rename = "Accounts")]
    accounts: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "USD")]
    price_usd: String,
}

impl From<&TierDefinition> for TierRow {
    fn from(tier: &TierDefinition) -> Self {
        Self {
            key: tier.tier_key.clone(),
            name: tier.display_name.clone(),
            devices: output::format_limit(tier.max_devices),
            groups: output::format_limit(tier.max_groups),
            accounts: output::format_limit(tier.max_accounts),
            period: tier
                .period_days
                .map_or_else(|| "-".to_string(), |days| format!("{days}d")),
            price_usd: format!("{:.2}", tier.price_usd),
        }
    }
}

/// Execute tier commands
pub async fn execute(args: &TiersArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let catalog = ctx.engine.catalog();

    match &args.command {
        TiersCommand::List => {
            let tiers = catalog.get_all_tiers().await;
            if format == OutputFormat::Json {
                output::print_json(&tiers);
            } else {
                let rows: Vec<TierRow> = tiers.iter().map(TierRow::from).collect();
                output::print_list(&rows, format);
            }
        }
        TiersCommand::Show { key } => {
            let tier = catalog
                .get_tier(key)
                .await
                .ok_or_else(|| AppError::not_found(format!("Tier '{key}' not found")))?;

            if format == OutputFormat::Json {
                output::print_json(&tier);
                return Ok(());
            }
            println!("Tier {}:", tier.tier_key);
            output::print_kv("Name", &tier.display_name);
            output::print_kv("Max Devices", &output::format_limit(tier.max_devices));
            output::print_kv("Max Groups", &output::format_limit(tier.max_groups));
            output::print_kv("Max Accounts", &output::format_limit(tier.max_accounts));
            output::print_kv(
                "Actions per Account",
                &tier
                    .max_account_actions
                    .map_or_else(|| "-".to_string(), output::format_limit),
            );
            output::print_kv("Period (days)", &output::optional(tier.period_days));
            output::print_kv("Price (USD)", &format!("{:.2}", tier.price_usd));
            output::print_kv("Price (KHR)", &format!("{:.0}", tier.price_khr));
            if !tier.features.is_empty() {
                output::print_kv("Features", &tier.features.join(", "));
            }
        }
    }

    Ok(())
}
