//! Local group management, guarded by the group quota.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;
use quotaguard_database::models::Group;

/// Arguments for group commands
#[derive(Debug, Args)]
pub struct GroupArgs {
    /// Group subcommand
    #[command(subcommand)]
    pub command: GroupCommand,
}

/// Group subcommands
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Create a group if the quota allows it
    Create {
        /// Group name
        name: String,
    },
    /// List groups
    List,
    /// Delete a group
    Delete {
        /// Group name
        name: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<Group> for GroupRow {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            created_at: group.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute group commands
pub async fn execute(args: &GroupArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let groups = ctx.primary.groups();

    match &args.command {
        GroupCommand::Create { name } => {
            let decision = ctx.engine.quota().can_add_group().await;
            if !decision.allowed {
                output::print_decision(&decision, format);
                return Ok(());
            }
            let group = groups.create(name).await?;
            output::print_success(&format!("Created group '{}' (id {})", group.name, group.id));
        }
        GroupCommand::List => {
            let rows: Vec<GroupRow> = groups
                .find_all()
                .await?
                .into_iter()
                .map(GroupRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        GroupCommand::Delete { name, force } => {
            if !super::confirm(&format!("Delete group '{name}'?"), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            if groups.delete_by_name(name).await? {
                output::print_success(&format!("Deleted group '{name}'"));
            } else {
                output::print_warning(&format!("No group named '{name}'"));
            }
        }
    }

    Ok(())
}
