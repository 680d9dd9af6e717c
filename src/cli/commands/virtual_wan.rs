//! `vwanctl wan` subcommands.

use super::CommandContext;
use clap::{Args, Subcommand};
use vwanctl::error::{Error, Result};
use vwanctl::gateway::VirtualWanGateway;

/// Virtual WAN operations.
#[derive(Subcommand, Debug, Clone)]
pub enum WanCommand {
    /// Fetch one virtual WAN, or list them
    Get(GetWanArgs),
}

impl WanCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            WanCommand::Get(args) => args.execute(ctx).await,
        }
    }
}

/// Arguments for `wan get`.
#[derive(Args, Debug, Clone)]
pub struct GetWanArgs {
    /// The resource name; omit to list
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// The resource group name; omit to list subscription-wide
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,
}

impl GetWanArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let wans = VirtualWanGateway::new(&ctx.client);

        match &self.name {
            Some(name) => {
                let resource_group = self.resource_group.as_deref().ok_or_else(|| {
                    Error::invalid_parameter(
                        "--resource-group",
                        "--resource-group must be specified when --name is",
                    )
                })?;
                let wan = wans.get(resource_group, name).await?;
                ctx.output.result(&wan)?;
            }
            None => {
                let list = wans.list(self.resource_group.as_deref()).await?;
                ctx.output.result(&list)?;
            }
        }
        Ok(())
    }
}
