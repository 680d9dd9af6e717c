//! `vwanctl vpn-connection` subcommands.

use super::{run_pending, CommandContext, ConfirmArgs, GatewayChildTargetArgs};
use clap::{Args, Subcommand};
use vwanctl::error::Result;
use vwanctl::gateway::VpnGatewayGateway;
use vwanctl::ops::vpn_connection::{
    self, NewVpnConnection, RemoveVpnConnection, SetVpnConnection,
};
use vwanctl::secret::Sensitive;

/// VPN connection operations.
#[derive(Subcommand, Debug, Clone)]
pub enum VpnConnectionCommand {
    /// Fetch one connection, or list a gateway's connections
    Get(GetVpnConnectionArgs),
    /// Create a connection on a VPN gateway
    New(NewVpnConnectionArgs),
    /// Update a connection
    Set(SetVpnConnectionArgs),
    /// Remove a connection from its gateway
    Remove(RemoveVpnConnectionArgs),
}

impl VpnConnectionCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            VpnConnectionCommand::Get(args) => args.execute(ctx).await,
            VpnConnectionCommand::New(args) => args.execute(ctx).await,
            VpnConnectionCommand::Set(args) => args.execute(ctx).await,
            VpnConnectionCommand::Remove(args) => args.execute(ctx).await,
        }
    }
}

/// Arguments for `vpn-connection get`.
#[derive(Args, Debug, Clone)]
pub struct GetVpnConnectionArgs {
    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: String,

    /// Name of the parent VPN gateway
    #[arg(long)]
    pub gateway_name: String,

    /// The connection name; omit to list the gateway's connections
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}

impl GetVpnConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateways = VpnGatewayGateway::new(&ctx.client);
        let connections = vpn_connection::get(
            &gateways,
            &self.resource_group,
            &self.gateway_name,
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

/// Arguments for `vpn-connection new`.
#[derive(Args, Debug, Clone)]
pub struct NewVpnConnectionArgs {
    /// The connection name
    #[arg(short = 'n', long)]
    pub name: String,

    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: String,

    /// Name of the parent VPN gateway
    #[arg(long)]
    pub gateway_name: String,

    /// Resource id of the VPN site this connection reaches
    #[arg(long)]
    pub remote_vpn_site_id: Option<String>,

    /// Pre-shared key for the connection
    #[arg(long)]
    pub shared_key: Option<String>,

    /// Expected bandwidth in Mbps
    #[arg(long)]
    pub connection_bandwidth_in_mbps: Option<u32>,

    /// Enable BGP on this connection
    #[arg(long)]
    pub enable_bgp: bool,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl NewVpnConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateways = VpnGatewayGateway::new(&ctx.client);

        let change = NewVpnConnection {
            resource_group: self.resource_group.clone(),
            gateway_name: self.gateway_name.clone(),
            name: self.name.clone(),
            remote_vpn_site_id: self.remote_vpn_site_id.clone(),
            shared_key: self.shared_key.clone().map(Sensitive::new),
            connection_bandwidth_in_mbps: self.connection_bandwidth_in_mbps,
            enable_bgp: self.enable_bgp,
        }
        .plan(&gateways)
        .await?;

        let connection = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&connection)?;
        Ok(())
    }
}

/// Arguments for `vpn-connection set`.
#[derive(Args, Debug, Clone)]
pub struct SetVpnConnectionArgs {
    #[command(flatten)]
    pub target: GatewayChildTargetArgs,

    /// New resource id of the VPN site this connection reaches
    #[arg(long)]
    pub remote_vpn_site_id: Option<String>,

    /// New pre-shared key for the connection
    #[arg(long)]
    pub shared_key: Option<String>,

    /// New expected bandwidth in Mbps
    #[arg(long)]
    pub connection_bandwidth_in_mbps: Option<u32>,

    /// Whether BGP is enabled on this connection
    #[arg(long, value_name = "BOOL")]
    pub enable_bgp: Option<bool>,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl SetVpnConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateways = VpnGatewayGateway::new(&ctx.client);

        let change = SetVpnConnection {
            target: self.target.to_reference()?,
            remote_vpn_site_id: self.remote_vpn_site_id.clone(),
            shared_key: self.shared_key.clone().map(Sensitive::new),
            connection_bandwidth_in_mbps: self.connection_bandwidth_in_mbps,
            enable_bgp: self.enable_bgp,
        }
        .plan(&gateways)
        .await?;

        let connection = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&connection)?;
        Ok(())
    }
}

/// Arguments for `vpn-connection remove`.
#[derive(Args, Debug, Clone)]
pub struct RemoveVpnConnectionArgs {
    #[command(flatten)]
    pub target: GatewayChildTargetArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl RemoveVpnConnectionArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateways = VpnGatewayGateway::new(&ctx.client);

        let change = RemoveVpnConnection {
            target: self.target.to_reference()?,
        }
        .plan(&gateways)
        .await?;

        let removed = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result_bool(removed);
        Ok(())
    }
}
