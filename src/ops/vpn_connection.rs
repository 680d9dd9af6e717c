//! Operations on VPN connections.
//!
//! Same parent-rewrite pattern as hub virtual network connections, with the
//! VPN gateway as the parent.

use super::{parent_fetch, PendingChange, TargetReference};
use crate::error::{Error, Result};
use crate::gateway::VpnGatewayGateway;
use crate::models::{VpnConnection, VpnGateway};
use crate::secret::Sensitive;
use async_trait::async_trait;

const PARENT_KIND: &str = "VPN gateway";
const CHILD_KIND: &str = "VPN connection";

async fn fetch_parent(
    gateways: &VpnGatewayGateway<'_>,
    resource_group: &str,
    gateway_name: &str,
) -> Result<VpnGateway> {
    parent_fetch(
        gateways.get(resource_group, gateway_name).await,
        PARENT_KIND,
        gateway_name,
    )
}

/// Fetch one connection, or all of a gateway's connections when no name given.
pub async fn get(
    gateways: &VpnGatewayGateway<'_>,
    resource_group: &str,
    gateway_name: &str,
    name: Option<&str>,
) -> Result<Vec<VpnConnection>> {
    let gateway = fetch_parent(gateways, resource_group, gateway_name).await?;
    match name {
        Some(name) => {
            let connection = gateway
                .find_connection(name)
                .cloned()
                .ok_or_else(|| Error::child_not_found(CHILD_KIND, name, gateway_name))?;
            Ok(vec![connection])
        }
        None => Ok(gateway.connections),
    }
}

/// Parameters for `vpn-connection new`.
pub struct NewVpnConnection {
    pub resource_group: String,
    pub gateway_name: String,
    pub name: String,
    pub remote_vpn_site_id: Option<String>,
    pub shared_key: Option<Sensitive>,
    pub connection_bandwidth_in_mbps: Option<u32>,
    pub enable_bgp: bool,
}

impl NewVpnConnection {
    /// Fetch the gateway and append the new connection.
    pub async fn plan<'a>(
        self,
        gateways: &'a VpnGatewayGateway<'a>,
    ) -> Result<PendingVpnConnectionUpsert<'a>> {
        let mut gateway = fetch_parent(gateways, &self.resource_group, &self.gateway_name).await?;

        if gateway.find_connection(&self.name).is_some() {
            return Err(Error::invalid_parameter(
                "--name",
                format!(
                    "a connection named '{}' already exists on gateway '{}'",
                    self.name, self.gateway_name
                ),
            ));
        }

        gateway.connections.push(VpnConnection {
            id: None,
            name: self.name.clone(),
            remote_vpn_site_id: self.remote_vpn_site_id,
            shared_key: self.shared_key,
            connection_bandwidth_in_mbps: self.connection_bandwidth_in_mbps,
            enable_bgp: self.enable_bgp,
            provisioning_state: None,
        });

        Ok(PendingVpnConnectionUpsert {
            gateway_client: gateways,
            resource_group: self.resource_group,
            gateway_name: self.gateway_name,
            connection_name: self.name.clone(),
            summary: format!("Create VPN connection '{}'", self.name),
            gateway,
        })
    }
}

/// Parameters for `vpn-connection set`.
pub struct SetVpnConnection {
    pub target: TargetReference,
    pub remote_vpn_site_id: Option<String>,
    pub shared_key: Option<Sensitive>,
    pub connection_bandwidth_in_mbps: Option<u32>,
    pub enable_bgp: Option<bool>,
}

impl SetVpnConnection {
    /// Fetch the gateway, locate the connection, overlay supplied fields.
    pub async fn plan<'a>(
        self,
        gateways: &'a VpnGatewayGateway<'a>,
    ) -> Result<PendingVpnConnectionUpsert<'a>> {
        let resolved = self.target.resolve()?;
        let gateway_name = resolved.require_parent("--gateway-name")?.to_string();
        let mut gateway = fetch_parent(gateways, &resolved.resource_group, &gateway_name).await?;

        let connection = gateway
            .find_connection_mut(&resolved.name)
            .ok_or_else(|| Error::child_not_found(CHILD_KIND, &resolved.name, &gateway_name))?;

        if let Some(site_id) = self.remote_vpn_site_id {
            connection.remote_vpn_site_id = Some(site_id);
        }
        if let Some(shared_key) = self.shared_key {
            connection.shared_key = Some(shared_key);
        }
        if let Some(bandwidth) = self.connection_bandwidth_in_mbps {
            connection.connection_bandwidth_in_mbps = Some(bandwidth);
        }
        if let Some(enable_bgp) = self.enable_bgp {
            connection.enable_bgp = enable_bgp;
        }
        let connection_name = connection.name.clone();

        Ok(PendingVpnConnectionUpsert {
            gateway_client: gateways,
            resource_group: resolved.resource_group,
            gateway_name,
            connection_name,
            summary: format!("Update VPN connection '{}'", resolved.name),
            gateway,
        })
    }
}

/// A gateway write that exists to upsert one embedded connection.
pub struct PendingVpnConnectionUpsert<'a> {
    gateway_client: &'a VpnGatewayGateway<'a>,
    resource_group: String,
    gateway_name: String,
    connection_name: String,
    summary: String,
    gateway: VpnGateway,
}

#[async_trait]
impl PendingChange for PendingVpnConnectionUpsert<'_> {
    type Output = VpnConnection;

    fn summary(&self) -> String {
        self.summary.clone()
    }

    async fn commit(self) -> Result<VpnConnection> {
        let tags = self.gateway.tags.clone();
        self.gateway_client
            .create_or_update(&self.resource_group, &self.gateway_name, &self.gateway, &tags)
            .await?;

        let refreshed = self
            .gateway_client
            .get(&self.resource_group, &self.gateway_name)
            .await?;
        refreshed
            .find_connection(&self.connection_name)
            .cloned()
            .ok_or_else(|| {
                Error::child_not_found(CHILD_KIND, &self.connection_name, &self.gateway_name)
            })
    }
}

/// Parameters for `vpn-connection remove`.
pub struct RemoveVpnConnection {
    pub target: TargetReference,
}

impl RemoveVpnConnection {
    /// Fetch the gateway and drop the connection from its list.
    ///
    /// A name that matches nothing leaves the gateway untouched and fails
    /// with `ChildNotFound`.
    pub async fn plan<'a>(
        self,
        gateways: &'a VpnGatewayGateway<'a>,
    ) -> Result<PendingVpnConnectionRemoval<'a>> {
        let resolved = self.target.resolve()?;
        let gateway_name = resolved.require_parent("--gateway-name")?.to_string();
        let mut gateway = fetch_parent(gateways, &resolved.resource_group, &gateway_name).await?;

        let removed = gateway
            .remove_connection(&resolved.name)
            .ok_or_else(|| Error::child_not_found(CHILD_KIND, &resolved.name, &gateway_name))?;

        Ok(PendingVpnConnectionRemoval {
            gateway_client: gateways,
            resource_group: resolved.resource_group,
            gateway_name,
            removed_name: removed.name,
            gateway,
        })
    }
}

/// A gateway write that exists to drop one embedded connection.
pub struct PendingVpnConnectionRemoval<'a> {
    gateway_client: &'a VpnGatewayGateway<'a>,
    resource_group: String,
    gateway_name: String,
    removed_name: String,
    gateway: VpnGateway,
}

#[async_trait]
impl PendingChange for PendingVpnConnectionRemoval<'_> {
    type Output = bool;

    fn summary(&self) -> String {
        format!("Remove VPN connection '{}'", self.removed_name)
    }

    async fn commit(self) -> Result<bool> {
        let tags = self.gateway.tags.clone();
        self.gateway_client
            .create_or_update(&self.resource_group, &self.gateway_name, &self.gateway, &tags)
            .await?;
        Ok(true)
    }
}
