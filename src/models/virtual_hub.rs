//! Virtual hub display model and its embedded connections.

use crate::tags::TagMap;
use serde::{Deserialize, Serialize};

/// A virtual hub: the regional routing hub a Virtual WAN is built from.
///
/// Hub virtual network connections have no independent lifecycle; they live
/// inside the hub's connection list and are created and destroyed by
/// rewriting the whole hub. Connection names are unique within a hub,
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHub {
    /// Fully qualified resource id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name
    pub name: String,
    /// Resource group the hub lives in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Azure region
    pub location: String,
    /// Hub address space, a single CIDR prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_prefix: Option<String>,
    /// Weak reference to the owning Virtual WAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_wan_id: Option<String>,
    /// Embedded hub virtual network connections, in wire order
    #[serde(default)]
    pub connections: Vec<HubVirtualNetworkConnection>,
    /// Last provisioning state reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    /// Resource tags
    #[serde(default)]
    pub tags: TagMap,
}

impl VirtualHub {
    /// Find an embedded connection by case-insensitive name.
    pub fn find_connection(&self, name: &str) -> Option<&HubVirtualNetworkConnection> {
        self.connections
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Mutable variant of [`find_connection`](Self::find_connection).
    pub fn find_connection_mut(&mut self, name: &str) -> Option<&mut HubVirtualNetworkConnection> {
        self.connections
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Remove the connection with the given name, case-insensitively.
    ///
    /// Returns the removed connection, or `None` when no connection matched
    /// (the list is left untouched).
    pub fn remove_connection(&mut self, name: &str) -> Option<HubVirtualNetworkConnection> {
        let index = self
            .connections
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))?;
        Some(self.connections.remove(index))
    }
}

/// A connection between a virtual hub and a virtual network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubVirtualNetworkConnection {
    /// Fully qualified resource id, present once the hub has been written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Connection name, unique within the hub (case-insensitive)
    pub name: String,
    /// Id of the remote virtual network this connection attaches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_virtual_network_id: Option<String>,
    /// Whether internet-bound traffic from the spoke is secured via the hub
    #[serde(default)]
    pub enable_internet_security: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub_with(names: &[&str]) -> VirtualHub {
        VirtualHub {
            id: None,
            name: "hub1".into(),
            resource_group: Some("rg1".into()),
            location: "westeurope".into(),
            address_prefix: Some("10.1.0.0/16".into()),
            virtual_wan_id: None,
            connections: names
                .iter()
                .map(|n| HubVirtualNetworkConnection {
                    id: None,
                    name: (*n).into(),
                    remote_virtual_network_id: None,
                    enable_internet_security: false,
                })
                .collect(),
            provisioning_state: None,
            tags: TagMap::new(),
        }
    }

    #[test]
    fn test_find_connection_is_case_insensitive() {
        let hub = hub_with(&["Conn1", "conn2"]);
        assert!(hub.find_connection("CONN1").is_some());
        assert!(hub.find_connection("conn3").is_none());
    }

    #[test]
    fn test_remove_connection_removes_exactly_one() {
        let mut hub = hub_with(&["conn1", "Conn2", "conn3"]);
        let removed = hub.remove_connection("CONN2").unwrap();
        assert_eq!(removed.name, "Conn2");
        assert_eq!(hub.connections.len(), 2);
        assert!(hub.find_connection("conn2").is_none());
        assert!(hub.find_connection("conn1").is_some());
        assert!(hub.find_connection("conn3").is_some());
    }

    #[test]
    fn test_remove_missing_connection_leaves_hub_unchanged() {
        let mut hub = hub_with(&["conn1", "conn2"]);
        assert!(hub.remove_connection("other").is_none());
        assert_eq!(hub.connections.len(), 2);
    }
}
