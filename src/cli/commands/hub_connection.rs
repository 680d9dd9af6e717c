//! `vwanctl hub-connection` subcommands.

use super::{run_pending, CommandContext, ConfirmArgs, HubChildTargetArgs};
use clap::{Args, Subcommand};
use vwanctl::error::Result;
use vwanctl::gateway::VirtualHubGateway;
use vwanctl::ops::hub_connection::{self, NewHubConnection, RemoveHubConnection, SetHubConnection};

/// Hub virtual network connection operations.
#[derive(Subcommand, Debug, Clone)]
pub enum HubConnectionCommand {
    /// Fetch one connection, or list a hub's connections
    Get(GetHubConnectionArgs),
    /// Create a connection inside a virtual hub
    New(NewHubConnectionArgs),
    /// Update a connection
    Set(SetHubConnectionArgs),
    /// Remove a connection from its hub
    Remove(RemoveHubConnectionArgs),
}

impl HubConnectionCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            HubConnectionCommand::Get(args) => args.execute(ctx).await,
            HubConnectionCommand::New(args) => args.execute(ctx).await,
            HubConnectionCommand::Set(args) => args.execute(ctx).await,
            HubConnectionCommand::Remove(args) => args.execute(ctx).await,
        }
    }
}

/// Arguments for `hub-connection get`.
#[derive(Args, Debug, Clone)]
pub struct GetHubConnectionArgs {
    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: String,

    /// Name of the parent virtual hub
    #[arg(long)]
    pub hub_name: String,

    /// The connection name; omit to list the hub's connections
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}

impl GetHubConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);
        let connections = hub_connection::get(
            &hubs,
            &self.resource_group,
            &self.hub_name,
            self.name.as_deref(),
        )
        .await?;

        if self.name.is_some() {
            ctx.output.result(&connections[0])?;
        } else {
            ctx.output.result(&connections)?;
        }
        Ok(())
    }
}

/// Arguments for `hub-connection new`.
#[derive(Args, Debug, Clone)]
pub struct NewHubConnectionArgs {
    /// The connection name
    #[arg(short = 'n', long)]
    pub name: String,

    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: String,

    /// Name of the parent virtual hub
    #[arg(long)]
    pub hub_name: String,

    /// Resource id of the virtual network to connect
    #[arg(long)]
    pub remote_virtual_network_id: Option<String>,

    /// Enable internet security for this connection
    #[arg(long)]
    pub enable_internet_security: bool,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl NewHubConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);

        let change = NewHubConnection {
            resource_group: self.resource_group.clone(),
            hub_name: self.hub_name.clone(),
            name: self.name.clone(),
            remote_virtual_network_id: self.remote_virtual_network_id.clone(),
            enable_internet_security: self.enable_internet_security,
        }
        .plan(&hubs)
        .await?;

        let connection = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&connection)?;
        Ok(())
    }
}

/// Arguments for `hub-connection set`.
#[derive(Args, Debug, Clone)]
pub struct SetHubConnectionArgs {
    #[command(flatten)]
    pub target: HubChildTargetArgs,

    /// Enable internet security for this connection; omitting the flag
    /// disables it
    #[arg(long)]
    pub enable_internet_security: bool,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl SetHubConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);

        let change = SetHubConnection {
            target: self.target.to_reference()?,
            enable_internet_security: self.enable_internet_security,
        }
        .plan(&hubs)
        .await?;

        let connection = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&connection)?;
        Ok(())
    }
}

/// Arguments for `hub-connection remove`.
#[derive(Args, Debug, Clone)]
pub struct RemoveHubConnectionArgs {
    #[command(flatten)]
    pub target: HubChildTargetArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl RemoveHubConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let hubs = VirtualHubGateway::new(&ctx.client);

        let change = RemoveHubConnection {
            target: self.target.to_reference()?,
        }
        .plan(&hubs)
        .await?;

        let removed = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result_bool(removed);
        Ok(())
    }
}
