//! VPN gateway display model and its embedded connections.

use crate::secret::Sensitive;
use crate::tags::TagMap;
use serde::{Deserialize, Serialize};

/// A VPN gateway deployed inside a virtual hub.
///
/// VPN connections follow the same ownership pattern as hub virtual network
/// connections: embedded in the gateway, rewritten with the whole parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnGateway {
    /// Fully qualified resource id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name
    pub name: String,
    /// Resource group the gateway lives in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Azure region
    pub location: String,
    /// Weak reference to the hub the gateway is deployed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_hub_id: Option<String>,
    /// Gateway scale unit
    #[serde(default)]
    pub vpn_gateway_scale_unit: u32,
    /// Embedded VPN connections, in wire order
    #[serde(default)]
    pub connections: Vec<VpnConnection>,
    /// Last provisioning state reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    /// Resource tags
    #[serde(default)]
    pub tags: TagMap,
}

impl VpnGateway {
    /// Find an embedded connection by case-insensitive name.
    pub fn find_connection(&self, name: &str) -> Option<&VpnConnection> {
        self.connections
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Mutable variant of [`find_connection`](Self::find_connection).
    pub fn find_connection_mut(&mut self, name: &str) -> Option<&mut VpnConnection> {
        self.connections
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Remove the connection with the given name, case-insensitively.
    ///
    /// Returns the removed connection, or `None` when nothing matched.
    pub fn remove_connection(&mut self, name: &str) -> Option<VpnConnection> {
        let index = self
            .connections
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))?;
        Some(self.connections.remove(index))
    }
}

/// A site-to-site connection terminated on a VPN gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnConnection {
    /// Fully qualified resource id, present once the gateway has been written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Connection name, unique within the gateway (case-insensitive)
    pub name: String,
    /// Id of the VPN site this connection reaches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_vpn_site_id: Option<String>,
    /// Pre-shared key for the connection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_key: Option<Sensitive>,
    /// Expected bandwidth in Mbps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_bandwidth_in_mbps: Option<u32>,
    /// Whether BGP is enabled on the connection
    #[serde(default)]
    pub enable_bgp: bool,
    /// Last provisioning state reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}
