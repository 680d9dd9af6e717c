//! `vwanctl vpn-gateway` subcommands.

use super::CommandContext;
use clap::{Args, Subcommand};
use vwanctl::error::{Error, Result};
use vwanctl::gateway::VpnGatewayGateway;

/// VPN gateway operations.
///
/// Gateways are read here as the parents of VPN connections; their own
/// provisioning is out of scope for this tool.
#[derive(Subcommand, Debug, Clone)]
pub enum VpnGatewayCommand {
    /// Fetch one VPN gateway, or list them
    Get(GetVpnGatewayArgs),
}

impl VpnGatewayCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            VpnGatewayCommand::Get(args) => args.execute(ctx).await,
        }
    }
}

/// Arguments for `vpn-gateway get`.
#[derive(Args, Debug, Clone)]
pub struct GetVpnGatewayArgs {
    /// The resource name; omit to list
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// The resource group name; omit to list subscription-wide
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,
}

impl GetVpnGatewayArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateways = VpnGatewayGateway::new(&ctx.client);

        match &self.name {
            Some(name) => {
                let resource_group = self.resource_group.as_deref().ok_or_else(|| {
                    Error::invalid_parameter(
                        "--resource-group",
                        "--resource-group must be specified when --name is",
                    )
                })?;
                let gateway = gateways.get(resource_group, name).await?;
                ctx.output.result(&gateway)?;
            }
            None => {
                let list = gateways.list(self.resource_group.as_deref()).await?;
                ctx.output.result(&list)?;
            }
        }
        Ok(())
    }
}
