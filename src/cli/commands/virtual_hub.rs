//! `vwanctl hub` subcommands.

use super::{parse_tags, run_pending, CommandContext, ConfirmArgs, TargetArgs, WanRefArgs};
use clap::{Args, Subcommand};
use vwanctl::error::{Error, Result};
use vwanctl::gateway::{VirtualHubGateway, VirtualWanGateway};
use vwanctl::models::HubVirtualNetworkConnection;
use vwanctl::ops::virtual_hub::{NewVirtualHub, RemoveVirtualHub, SetVirtualHub};

/// Virtual hub operations.
#[derive(Subcommand, Debug, Clone)]
pub enum HubCommand {
    /// Fetch one virtual hub, or list them
    Get(GetHubArgs),
    /// Create a virtual hub
    New(NewHubArgs),
    /// Update a virtual hub
    Set(SetHubArgs),
    /// Delete a virtual hub
    Remove(RemoveHubArgs),
}

impl HubCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            HubCommand::Get(args) => args.execute(ctx).await,
            HubCommand::New(args) => args.execute(ctx).await,
            HubCommand::Set(args) => args.execute(ctx).await,
            HubCommand::Remove(args) => args.execute(ctx).await,
        }
    }
}

/// Arguments for `hub get`.
#[derive(Args, Debug, Clone)]
pub struct GetHubArgs {
    /// The resource name; omit to list
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// The resource group name; omit to list subscription-wide
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,
}

impl GetHubArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);

        match &self.name {
            Some(name) => {
                let resource_group = self.resource_group.as_deref().ok_or_else(|| {
                    Error::invalid_parameter(
                        "--resource-group",
                        "--resource-group must be specified when --name is",
                    )
                })?;
                let hub = hubs.get(resource_group, name).await?;
                ctx.output.result(&hub)?;
            }
            None => {
                let list = hubs.list(self.resource_group.as_deref()).await?;
                ctx.output.result(&list)?;
            }
        }
        Ok(())
    }
}

/// Arguments for `hub new`.
#[derive(Args, Debug, Clone)]
pub struct NewHubArgs {
    /// The resource name
    #[arg(short = 'n', long)]
    pub name: String,

    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: String,

    /// The resource location
    #[arg(short = 'l', long)]
    pub location: String,

    /// The address space for this virtual hub, a CIDR prefix
    #[arg(long)]
    pub address_prefix: String,

    #[command(flatten)]
    pub wan: WanRefArgs,

    /// Resource tags as key=value, repeatable
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl NewHubArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);
        let wans = VirtualWanGateway::new(&ctx.client);

        let change = NewVirtualHub {
            resource_group: self.resource_group.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            address_prefix: self.address_prefix.clone(),
            wan: self.wan.to_required_reference()?,
            tags: parse_tags(&self.tags)?,
        }
        .plan(&hubs, &wans)
        .await?;

        let hub = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&hub)?;
        Ok(())
    }
}

/// Arguments for `hub set`.
#[derive(Args, Debug, Clone)]
pub struct SetHubArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub wan: WanRefArgs,

    /// New address space for this virtual hub, a CIDR prefix
    #[arg(long)]
    pub address_prefix: Option<String>,

    /// Path to a JSON array of hub virtual network connections that
    /// replaces the hub's connection list
    #[arg(long, value_name = "PATH")]
    pub connections_file: Option<std::path::PathBuf>,

    /// Resource tags as key=value, repeatable; replaces existing tags
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl SetHubArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);
        let wans = VirtualWanGateway::new(&ctx.client);

        let connections: Option<Vec<HubVirtualNetworkConnection>> =
            match &self.connections_file {
                Some(path) => {
                    let content = std::fs::read_to_string(path)?;
                    Some(serde_json::from_str(&content)?)
                }
                None => None,
            };

        let change = SetVirtualHub {
            target: self.target.to_reference()?,
            wan: self.wan.to_required_reference()?,
            address_prefix: self.address_prefix.clone(),
            connections,
            tags: parse_tags(&self.tags)?,
        }
        .plan(&hubs, &wans)
        .await?;

        let hub = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&hub)?;
        Ok(())
    }
}

/// Arguments for `hub remove`.
#[derive(Args, Debug, Clone)]
pub struct RemoveHubArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl RemoveHubArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);

        let change = RemoveVirtualHub {
            target: self.target.to_reference()?,
        }
        .plan(&hubs)?;

        let removed = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result_bool(removed);
        Ok(())
    }
}
