//! Linked account management, guarded by the account quota.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;
use quotaguard_database::models::LinkedAccount;

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Link an external account if the quota allows it
    Link {
        /// Provider name
        provider: String,
        /// Provider-side identifier
        external_id: String,
        /// Label shown in listings
        #[arg(long)]
        name: Option<String>,
    },
    /// List linked accounts
    List,
    /// Unlink an account
    Unlink {
        /// Provider name
        provider: String,
        /// Provider-side identifier
        external_id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "External ID")]
    external_id: String,
    #[tabled(rename = "Name")]
    display_name: String,
    #[tabled(rename = "Linked")]
    created_at: String,
}

impl From<LinkedAccount> for AccountRow {
    fn from(account: LinkedAccount) -> Self {
        Self {
            id: account.id,
            provider: account.provider,
            external_id: account.external_id,
            display_name: account.display_name.unwrap_or_default(),
            created_at: account.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute account commands
pub async fn execute(
    args: &AccountArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let accounts = ctx.primary.accounts();

    match &args.command {
        AccountCommand::Link {
            provider,
            external_id,
            name,
        } => {
            let decision = ctx.engine.quota().can_add_account().await;
            if !decision.allowed {
                output::print_decision(&decision, format);
                return Ok(());
            }
            let account = accounts
                .create(provider, external_id, name.as_deref())
                .await?;
            output::print_success(&format!(
                "Linked {} account '{}'",
                account.provider, account.external_id
            ));
        }
        AccountCommand::List => {
            let rows: Vec<AccountRow> = accounts
                .find_all()
                .await?
                .into_iter()
                .map(AccountRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        AccountCommand::Unlink {
            provider,
            external_id,
            force,
        } => {
            if !super::confirm(&format!("Unlink {provider} account '{external_id}'?"), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            if accounts.delete(provider, external_id).await? {
                output::print_success(&format!("Unlinked {provider} account '{external_id}'"));
            } else {
                output::print_warning(&format!("No {provider} account '{external_id}' is linked"));
            }
        }
    }

    Ok(())
}
