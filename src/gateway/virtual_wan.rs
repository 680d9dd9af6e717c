//! Gateway for Virtual WAN resources.
//!
//! WANs are only read here: commands resolve hub and site back-references
//! against them and list them for the operator. Creation and teardown of the
//! WAN itself is out of scope for this tool.

use super::{group_from_id, ArmClient};
use crate::error::Result;
use crate::models::VirtualWan;
use crate::tags;
use crate::tags::TagMap;
use serde::{Deserialize, Serialize};

const COLLECTION: &str = "virtualWans";
const KIND: &str = "Virtual WAN";

/// Wire shape of a Virtual WAN resource.
#[derive(Debug, Serialize, Deserialize)]
struct VirtualWanResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<TagMap>,
    #[serde(default)]
    properties: VirtualWanProperties,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VirtualWanProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    provisioning_state: Option<String>,
}

fn to_model(resource: VirtualWanResource, resource_group: Option<&str>) -> VirtualWan {
    let resource_group = resource_group
        .map(str::to_string)
        .or_else(|| group_from_id(resource.id.as_deref()));
    VirtualWan {
        name: resource.name.clone().unwrap_or_default(),
        id: resource.id,
        resource_group,
        location: resource.location,
        provisioning_state: resource.properties.provisioning_state,
        tags: tags::decode(resource.tags),
    }
}

/// Read operations for Virtual WANs.
pub struct VirtualWanGateway<'a> {
    client: &'a ArmClient,
}

impl<'a> VirtualWanGateway<'a> {
    pub fn new(client: &'a ArmClient) -> Self {
        Self { client }
    }

    /// Fetch one WAN. Fails with `NotFound` when the API reports none.
    pub async fn get(&self, resource_group: &str, name: &str) -> Result<VirtualWan> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        let resource: VirtualWanResource = self.client.get_resource(&path, KIND, name).await?;
        Ok(to_model(resource, Some(resource_group)))
    }

    /// List WANs in a resource group, or subscription-wide when none given.
    pub async fn list(&self, resource_group: Option<&str>) -> Result<Vec<VirtualWan>> {
        let path = self.client.collection_path(resource_group, COLLECTION);
        let resources: Vec<VirtualWanResource> = self.client.list_resources(&path).await?;
        Ok(resources.into_iter().map(|r| to_model(r, None)).collect())
    }
}
