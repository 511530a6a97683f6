//! Registered device management.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::app::AppContext;
use crate::output::{self, OutputFormat};
use quotaguard_core::error::AppError;

/// Arguments for device commands
#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Device subcommand
    #[command(subcommand)]
    pub command: DeviceCommand,
}

/// Device subcommands
#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Register a device if the quota allows it
    Add {
        /// Device identifier
        device_id: String,
    },
    /// Unregister a device
    Remove {
        /// Device identifier
        device_id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// List registered devices
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct DeviceRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Device")]
    device_id: String,
}

/// Execute device commands
pub async fn execute(args: &DeviceArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        DeviceCommand::Add { device_id } => {
            let decision = ctx.engine.quota().register_device(device_id).await;
            output::print_decision(&decision, format);
        }
        DeviceCommand::Remove { device_id, force } => {
            if !super::confirm(&format!("Unregister device '{device_id}'?"), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            if ctx.engine.devices().remove_device(device_id).await {
                output::print_success(&removed_message(device_id));
            } else {
                return Err(AppError::remote_unavailable(format!(
                    "Could not unregister device '{device_id}'; run `quotaguard sync` and retry"
                )));
            }
        }
        DeviceCommand::List => {
            let devices = ctx
                .engine
                .devices()
                .list_devices()
                .await
                .ok_or_else(|| AppError::remote_unavailable("Could not read the device list"))?;
            let rows: Vec<DeviceRow> = devices
                .into_iter()
                .enumerate()
                .map(|(i, device_id)| DeviceRow {
                    position: i + 1,
                    device_id,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

fn removed_message(device_id: &str) -> String {
    format!("Device '{device_id}' unregistered")
}
