//! Local display models for Virtual WAN resources.
//!
//! These are the objects commands print and operators feed back in via
//! `--in-file`. They mirror what the management API returns but flattened:
//! no `properties` envelope, resource group pulled out of the id, tags as a
//! plain map. The gateways own the conversion to and from the wire shape.

mod virtual_hub;
mod virtual_wan;
mod vpn_gateway;
mod vpn_site;

pub use virtual_hub::{HubVirtualNetworkConnection, VirtualHub};
pub use virtual_wan::VirtualWan;
pub use vpn_gateway::{VpnConnection, VpnGateway};
pub use vpn_site::{validate_ip_address, BgpSettings, DeviceProperties, VpnSite};
