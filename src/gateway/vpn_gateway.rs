//! Gateway for VPN gateway resources.
//!
//! VPN connections are embedded in the gateway body the same way hub virtual
//! network connections are embedded in a hub: every write replaces the whole
//! parent.

use super::{group_from_id, ArmClient, SubResource};
use crate::error::Result;
use crate::models::{VpnConnection, VpnGateway};
use crate::secret::Sensitive;
use crate::tags;
use crate::tags::TagMap;
use serde::{Deserialize, Serialize};

const COLLECTION: &str = "vpnGateways";
const KIND: &str = "VPN gateway";

/// Wire shape of a VPN gateway resource.
#[derive(Debug, Serialize, Deserialize)]
struct VpnGatewayResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<TagMap>,
    #[serde(default)]
    properties: VpnGatewayProperties,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VpnGatewayProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    virtual_hub: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vpn_gateway_scale_unit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    connections: Option<Vec<VpnConnectionResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provisioning_state: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VpnConnectionResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    #[serde(default)]
    properties: VpnConnectionProperties,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VpnConnectionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_vpn_site: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shared_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    connection_bandwidth_in_mbps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_bgp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provisioning_state: Option<String>,
}

fn connection_to_model(resource: VpnConnectionResource) -> VpnConnection {
    VpnConnection {
        id: resource.id,
        name: resource.name,
        remote_vpn_site_id: resource.properties.remote_vpn_site.and_then(|r| r.id),
        shared_key: resource.properties.shared_key.map(Sensitive::new),
        connection_bandwidth_in_mbps: resource.properties.connection_bandwidth_in_mbps,
        enable_bgp: resource.properties.enable_bgp.unwrap_or(false),
        provisioning_state: resource.properties.provisioning_state,
    }
}

fn connection_to_wire(connection: &VpnConnection) -> VpnConnectionResource {
    VpnConnectionResource {
        id: connection.id.clone(),
        name: connection.name.clone(),
        properties: VpnConnectionProperties {
            remote_vpn_site: SubResource::from_id(connection.remote_vpn_site_id.as_ref()),
            shared_key: connection.shared_key.as_ref().map(|k| k.expose().to_string()),
            connection_bandwidth_in_mbps: connection.connection_bandwidth_in_mbps,
            enable_bgp: Some(connection.enable_bgp),
            provisioning_state: None,
        },
    }
}

fn to_model(resource: VpnGatewayResource, resource_group: Option<&str>) -> VpnGateway {
    let resource_group = resource_group
        .map(str::to_string)
        .or_else(|| group_from_id(resource.id.as_deref()));
    VpnGateway {
        name: resource.name.clone().unwrap_or_default(),
        id: resource.id,
        resource_group,
        location: resource.location,
        virtual_hub_id: resource.properties.virtual_hub.and_then(|h| h.id),
        vpn_gateway_scale_unit: resource.properties.vpn_gateway_scale_unit.unwrap_or(0),
        connections: resource
            .properties
            .connections
            .unwrap_or_default()
            .into_iter()
            .map(connection_to_model)
            .collect(),
        provisioning_state: resource.properties.provisioning_state,
        tags: tags::decode(resource.tags),
    }
}

fn to_wire(gateway: &VpnGateway, tags: &TagMap) -> Result<VpnGatewayResource> {
    Ok(VpnGatewayResource {
        id: gateway.id.clone(),
        name: Some(gateway.name.clone()),
        location: gateway.location.clone(),
        tags: tags::encode(Some(tags))?,
        properties: VpnGatewayProperties {
            virtual_hub: SubResource::from_id(gateway.virtual_hub_id.as_ref()),
            vpn_gateway_scale_unit: Some(gateway.vpn_gateway_scale_unit),
            connections: Some(gateway.connections.iter().map(connection_to_wire).collect()),
            provisioning_state: None,
        },
    })
}

/// CRUD operations for VPN gateways.
pub struct VpnGatewayGateway<'a> {
    client: &'a ArmClient,
}

impl<'a> VpnGatewayGateway<'a> {
    pub fn new(client: &'a ArmClient) -> Self {
        Self { client }
    }

    /// Fetch one gateway. Fails with `NotFound` when the API reports none.
    pub async fn get(&self, resource_group: &str, name: &str) -> Result<VpnGateway> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        let resource: VpnGatewayResource = self.client.get_resource(&path, KIND, name).await?;
        Ok(to_model(resource, Some(resource_group)))
    }

    /// List gateways in a resource group, or subscription-wide when none given.
    pub async fn list(&self, resource_group: Option<&str>) -> Result<Vec<VpnGateway>> {
        let path = self.client.collection_path(resource_group, COLLECTION);
        let resources: Vec<VpnGatewayResource> = self.client.list_resources(&path).await?;
        Ok(resources.into_iter().map(|r| to_model(r, None)).collect())
    }

    /// Replace the full gateway resource, connections included.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        gateway: &VpnGateway,
        tags: &TagMap,
    ) -> Result<VpnGateway> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        let body = to_wire(gateway, tags)?;
        let resource: VpnGatewayResource = self.client.put_resource(&path, &body).await?;
        Ok(to_model(resource, Some(resource_group)))
    }
}
