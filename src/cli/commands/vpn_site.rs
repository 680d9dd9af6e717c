//! `vwanctl vpn-site` subcommands.

use super::{parse_tags, run_pending, CommandContext, ConfirmArgs, TargetArgs, WanRefArgs};
use clap::{Args, Subcommand};
use vwanctl::error::{Error, Result};
use vwanctl::gateway::{VirtualWanGateway, VpnSiteGateway};
use vwanctl::ops::vpn_site::{BgpInput, DeviceInput, NewVpnSite, RemoveVpnSite, SetVpnSite};
use vwanctl::secret::Sensitive;

/// VPN site operations.
#[derive(Subcommand, Debug, Clone)]
pub enum VpnSiteCommand {
    /// Fetch one VPN site, or list them
    Get(GetVpnSiteArgs),
    /// Create a VPN site
    New(NewVpnSiteArgs),
    /// Update a VPN site
    Set(SetVpnSiteArgs),
    /// Delete a VPN site
    Remove(RemoveVpnSiteArgs),
}

impl VpnSiteCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            VpnSiteCommand::Get(args) => args.execute(ctx).await,
            VpnSiteCommand::New(args) => args.execute(ctx).await,
            VpnSiteCommand::Set(args) => args.execute(ctx).await,
            VpnSiteCommand::Remove(args) => args.execute(ctx).await,
        }
    }
}

/// BGP flags shared by `new` and `set`.
#[derive(Args, Debug, Clone)]
pub struct BgpArgs {
    /// The BGP ASN for this site
    #[arg(long)]
    pub bgp_asn: Option<u32>,

    /// The BGP peering address for this site
    #[arg(long)]
    pub bgp_peering_address: Option<String>,

    /// The BGP peering weight for this site
    #[arg(long)]
    pub bgp_peering_weight: Option<u32>,
}

impl BgpArgs {
    fn to_input(&self) -> BgpInput {
        BgpInput {
            asn: self.bgp_asn,
            peering_address: self.bgp_peering_address.clone(),
            peering_weight: self.bgp_peering_weight,
        }
    }
}

/// Device-description flags shared by `new` and `set`.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// The device model of the remote VPN device
    #[arg(long)]
    pub device_model: Option<String>,

    /// The device vendor of the remote VPN device
    #[arg(long)]
    pub device_vendor: Option<String>,

    /// The link speed of the remote VPN device in Mbps
    #[arg(long)]
    pub link_speed_in_mbps: Option<u32>,
}

impl DeviceArgs {
    fn to_input(&self) -> DeviceInput {
        DeviceInput {
            model: self.device_model.clone(),
            vendor: self.device_vendor.clone(),
            link_speed_in_mbps: self.link_speed_in_mbps,
        }
    }
}

/// Arguments for `vpn-site get`.
#[derive(Args, Debug, Clone)]
pub struct GetVpnSiteArgs {
    /// The resource name; omit to list
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// The resource group name; omit to list subscription-wide
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,
}

impl GetVpnSiteArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let sites = VpnSiteGateway::new(&ctx.client);

        match &self.name {
            Some(name) => {
                let resource_group = self.resource_group.as_deref().ok_or_else(|| {
                    Error::invalid_parameter(
                        "--resource-group",
                        "--resource-group must be specified when --name is",
                    )
                })?;
                let site = sites.get(resource_group, name).await?;
                ctx.output.result(&site)?;
            }
            None => {
                let list = sites.list(self.resource_group.as_deref()).await?;
                ctx.output.result(&list)?;
            }
        }
        Ok(())
    }
}

/// Arguments for `vpn-site new`.
#[derive(Args, Debug, Clone)]
pub struct NewVpnSiteArgs {
    /// The resource name
    #[arg(short = 'n', long)]
    pub name: String,

    /// The resource group name
    #[arg(short = 'g', long)]
    pub resource_group: String,

    /// The resource location
    #[arg(short = 'l', long)]
    pub location: String,

    /// Public IP address of the on-premises VPN device
    #[arg(long)]
    pub ip_address: String,

    /// Address prefix reachable behind the site, repeatable
    #[arg(long = "address-space", value_name = "CIDR")]
    pub address_space: Vec<String>,

    #[command(flatten)]
    pub wan: WanRefArgs,

    #[command(flatten)]
    pub bgp: BgpArgs,

    #[command(flatten)]
    pub device: DeviceArgs,

    /// Pre-shared key for the site
    #[arg(long)]
    pub site_key: Option<String>,

    /// Mark this site as a security site
    #[arg(long)]
    pub security_site: bool,

    /// Resource tags as key=value, repeatable
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl NewVpnSiteArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let sites = VpnSiteGateway::new(&ctx.client);
        let wans = VirtualWanGateway::new(&ctx.client);

        let change = NewVpnSite {
            resource_group: self.resource_group.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            ip_address: self.ip_address.clone(),
            address_space: self.address_space.clone(),
            wan: self.wan.to_required_reference()?,
            bgp: self.bgp.to_input(),
            device: self.device.to_input(),
            site_key: self.site_key.clone().map(Sensitive::new),
            is_security_site: self.security_site,
            tags: parse_tags(&self.tags)?,
        }
        .plan(&sites, &wans)
        .await?;

        let site = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&site)?;
        Ok(())
    }
}

/// Arguments for `vpn-site set`.
#[derive(Args, Debug, Clone)]
pub struct SetVpnSiteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// New public IP address of the on-premises VPN device
    #[arg(long)]
    pub ip_address: Option<String>,

    /// Address prefixes replacing the site's address space, repeatable
    #[arg(long = "address-space", value_name = "CIDR")]
    pub address_space: Vec<String>,

    #[command(flatten)]
    pub bgp: BgpArgs,

    #[command(flatten)]
    pub device: DeviceArgs,

    /// New pre-shared key for the site
    #[arg(long)]
    pub site_key: Option<String>,

    /// Whether this site is a security site
    #[arg(long, value_name = "BOOL")]
    pub security_site: Option<bool>,

    /// Resource tags as key=value, repeatable; replaces existing tags
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl SetVpnSiteArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let sites = VpnSiteGateway::new(&ctx.client);

        let change = SetVpnSite {
            target: self.target.to_reference()?,
            ip_address: self.ip_address.clone(),
            address_space: if self.address_space.is_empty() {
                None
            } else {
                Some(self.address_space.clone())
            },
            bgp: self.bgp.to_input(),
            device: self.device.to_input(),
            site_key: self.site_key.clone().map(Sensitive::new),
            is_security_site: self.security_site,
            tags: parse_tags(&self.tags)?,
        }
        .plan(&sites)
        .await?;

        let site = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result(&site)?;
        Ok(())
    }
}

/// Arguments for `vpn-site remove`.
#[derive(Args, Debug, Clone)]
pub struct RemoveVpnSiteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

impl RemoveVpnSiteArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let sites = VpnSiteGateway::new(&ctx.client);

        let change = RemoveVpnSite {
            target: self.target.to_reference()?,
        }
        .plan(&sites)?;

        let removed = run_pending(ctx, &self.confirm, change).await?;
        ctx.output.result_bool(removed);
        Ok(())
    }
}
