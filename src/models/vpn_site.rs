//! VPN site display model.

use crate::error::{Error, Result};
use crate::secret::Sensitive;
use crate::tags::TagMap;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// An on-premises endpoint intended to connect into a Virtual WAN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnSite {
    /// Fully qualified resource id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name
    pub name: String,
    /// Resource group the site lives in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Azure region
    pub location: String,
    /// Public IP of the on-premises VPN device
    pub ip_address: String,
    /// CIDR prefixes reachable behind the site
    #[serde(default)]
    pub address_space: Vec<String>,
    /// BGP settings, present only when the site peers over BGP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgp_settings: Option<BgpSettings>,
    /// On-premises device description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_properties: Option<DeviceProperties>,
    /// Pre-shared key for the site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_key: Option<Sensitive>,
    /// Whether the site is a security site
    #[serde(default)]
    pub is_security_site: bool,
    /// Weak reference to the owning Virtual WAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_wan_id: Option<String>,
    /// Last provisioning state reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    /// Resource tags
    #[serde(default)]
    pub tags: TagMap,
}

/// BGP peering settings for a VPN site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpSettings {
    /// Autonomous system number
    #[serde(default)]
    pub asn: u32,
    /// Peering address of the on-premises BGP speaker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peering_address: Option<String>,
    /// Peering weight
    #[serde(default)]
    pub peering_weight: u32,
}

/// Description of the on-premises VPN device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    /// Device model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    /// Device vendor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_vendor: Option<String>,
    /// Link speed in Mbps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_speed_in_mbps: Option<u32>,
}

/// Validate that a string parses as an IPv4 or IPv6 literal.
pub fn validate_ip_address(value: &str) -> Result<()> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| Error::InvalidIpAddress(value.to_string()))
}
