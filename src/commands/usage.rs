//! Used-versus-allowed report.

use serde::Serialize;
use tabled::Tabled;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;
use quotaguard_core::types::ResourceUsage;

#[derive(Debug, Serialize, Tabled)]
struct UsageRow {
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

impl From<&ResourceUsage> for UsageRow {
    fn from(usage: &ResourceUsage) -> Self {
        Self {
            resource: format!("{}s", usage.kind),
            used: output::optional(usage.used),
            limit: output::format_limit(usage.limit),
        }
    }
}

/// Execute the usage command
pub async fn execute(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let summary = ctx.engine.quota().usage_summary().await;
    if format == OutputFormat::Json {
        output::print_json(&summary);
        return Ok(());
    }

    let tier_name = ctx.engine.catalog().display_name(&summary.tier).await;
    println!("Usage on {tier_name}:");
    if !summary.active {
        output::print_warning("Entitlement is not active");
    }
    let rows: Vec<UsageRow> = summary.resources.iter().map(UsageRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
