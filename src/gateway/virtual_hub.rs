//! Gateway for virtual hub resources.
//!
//! Hub virtual network connections ride along inside the hub body; every
//! write replaces the full resource, so callers always send the complete
//! fetched-then-mutated hub.

use super::{group_from_id, ArmClient, SubResource};
use crate::error::Result;
use crate::models::{HubVirtualNetworkConnection, VirtualHub};
use crate::tags;
use crate::tags::TagMap;
use serde::{Deserialize, Serialize};

const COLLECTION: &str = "virtualHubs";
const KIND: &str = "Virtual hub";

/// Wire shape of a virtual hub resource.
#[derive(Debug, Serialize, Deserialize)]
struct VirtualHubResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<TagMap>,
    #[serde(default)]
    properties: VirtualHubProperties,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VirtualHubProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    address_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    virtual_wan: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    virtual_network_connections: Option<Vec<HubVnetConnectionResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provisioning_state: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HubVnetConnectionResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    #[serde(default)]
    properties: HubVnetConnectionProperties,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HubVnetConnectionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_virtual_network: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_internet_security: Option<bool>,
}

fn connection_to_model(resource: HubVnetConnectionResource) -> HubVirtualNetworkConnection {
    HubVirtualNetworkConnection {
        id: resource.id,
        name: resource.name,
        remote_virtual_network_id: resource
            .properties
            .remote_virtual_network
            .and_then(|r| r.id),
        enable_internet_security: resource.properties.enable_internet_security.unwrap_or(false),
    }
}

fn connection_to_wire(connection: &HubVirtualNetworkConnection) -> HubVnetConnectionResource {
    HubVnetConnectionResource {
        id: connection.id.clone(),
        name: connection.name.clone(),
        properties: HubVnetConnectionProperties {
            remote_virtual_network: SubResource::from_id(
                connection.remote_virtual_network_id.as_ref(),
            ),
            enable_internet_security: Some(connection.enable_internet_security),
        },
    }
}

fn to_model(resource: VirtualHubResource, resource_group: Option<&str>) -> VirtualHub {
    let resource_group = resource_group
        .map(str::to_string)
        .or_else(|| group_from_id(resource.id.as_deref()));
    VirtualHub {
        name: resource.name.clone().unwrap_or_default(),
        id: resource.id,
        resource_group,
        location: resource.location,
        address_prefix: resource.properties.address_prefix,
        virtual_wan_id: resource.properties.virtual_wan.and_then(|w| w.id),
        connections: resource
            .properties
            .virtual_network_connections
            .unwrap_or_default()
            .into_iter()
            .map(connection_to_model)
            .collect(),
        provisioning_state: resource.properties.provisioning_state,
        tags: tags::decode(resource.tags),
    }
}

fn to_wire(hub: &VirtualHub, tags: &TagMap) -> crate::error::Result<VirtualHubResource> {
    Ok(VirtualHubResource {
        id: hub.id.clone(),
        name: Some(hub.name.clone()),
        location: hub.location.clone(),
        tags: tags::encode(Some(tags))?,
        properties: VirtualHubProperties {
            address_prefix: hub.address_prefix.clone(),
            virtual_wan: SubResource::from_id(hub.virtual_wan_id.as_ref()),
            virtual_network_connections: Some(
                hub.connections.iter().map(connection_to_wire).collect(),
            ),
            provisioning_state: None,
        },
    })
}

/// CRUD operations for virtual hubs.
#[derive(Debug)]
pub struct VirtualHubGateway<'a> {
    client: &'a ArmClient,
}

impl<'a> VirtualHubGateway<'a> {
    pub fn new(client: &'a ArmClient) -> Self {
        Self { client }
    }

    /// Fetch one hub. Fails with `NotFound` when the API reports none.
    pub async fn get(&self, resource_group: &str, name: &str) -> Result<VirtualHub> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        let resource: VirtualHubResource = self.client.get_resource(&path, KIND, name).await?;
        Ok(to_model(resource, Some(resource_group)))
    }

    /// List hubs in a resource group, or subscription-wide when none given.
    pub async fn list(&self, resource_group: Option<&str>) -> Result<Vec<VirtualHub>> {
        let path = self.client.collection_path(resource_group, COLLECTION);
        let resources: Vec<VirtualHubResource> = self.client.list_resources(&path).await?;
        Ok(resources.into_iter().map(|r| to_model(r, None)).collect())
    }

    /// Replace the full hub resource. Fields not carried over from a fetched
    /// model are lost, so callers must fetch-mutate-write the entire object.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        hub: &VirtualHub,
        tags: &TagMap,
    ) -> Result<VirtualHub> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        let body = to_wire(hub, tags)?;
        let resource: VirtualHubResource = self.client.put_resource(&path, &body).await?;
        Ok(to_model(resource, Some(resource_group)))
    }

    /// Delete a hub. Deleting an absent hub is a no-op.
    pub async fn delete(&self, resource_group: &str, name: &str) -> Result<()> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        self.client.delete_resource(&path).await
    }
}
