//! Operations on virtual hubs.

use super::{PendingChange, TargetReference, WanReference};
use crate::error::Result;
use crate::gateway::{VirtualHubGateway, VirtualWanGateway};
use crate::models::{HubVirtualNetworkConnection, VirtualHub};
use crate::tags::TagMap;
use async_trait::async_trait;

/// Parameters for `hub new`.
pub struct NewVirtualHub {
    pub resource_group: String,
    pub name: String,
    pub location: String,
    pub address_prefix: String,
    pub wan: WanReference,
    pub tags: Option<TagMap>,
}

impl NewVirtualHub {
    /// Assemble the hub to create. Fails before any write on an
    /// unresolvable WAN reference.
    pub async fn plan<'a>(
        self,
        hubs: &'a VirtualHubGateway<'a>,
        wans: &VirtualWanGateway<'_>,
    ) -> Result<PendingHubUpsert<'a>> {
        let wan = self.wan.resolve(wans).await?;

        let tags = self.tags.unwrap_or_default();
        let hub = VirtualHub {
            id: None,
            name: self.name.clone(),
            resource_group: Some(self.resource_group.clone()),
            location: self.location,
            address_prefix: Some(self.address_prefix),
            virtual_wan_id: wan.id,
            connections: Vec::new(),
            provisioning_state: None,
            tags: tags.clone(),
        };

        Ok(PendingHubUpsert {
            gateway: hubs,
            resource_group: self.resource_group,
            name: self.name.clone(),
            summary: format!("Create virtual hub '{}'", self.name),
            hub,
            tags,
        })
    }
}

/// Parameters for `hub set`.
///
/// A WAN reference is always required: the hub is re-linked to its WAN on
/// every update and cannot be written without one.
pub struct SetVirtualHub {
    pub target: TargetReference,
    pub wan: WanReference,
    pub address_prefix: Option<String>,
    pub connections: Option<Vec<HubVirtualNetworkConnection>>,
    pub tags: Option<TagMap>,
}

impl SetVirtualHub {
    /// Fetch the hub and overlay the requested changes.
    pub async fn plan<'a>(
        self,
        hubs: &'a VirtualHubGateway<'a>,
        wans: &VirtualWanGateway<'_>,
    ) -> Result<PendingHubUpsert<'a>> {
        let resolved = self.target.resolve()?;
        let mut hub = hubs.get(&resolved.resource_group, &resolved.name).await?;

        let wan = self.wan.resolve(wans).await?;
        hub.virtual_wan_id = wan.id;

        if let Some(prefix) = self.address_prefix {
            if !prefix.trim().is_empty() {
                hub.address_prefix = Some(prefix);
            }
        }
        if let Some(connections) = self.connections {
            if !connections.is_empty() {
                hub.connections = connections;
            }
        }

        let tags = self.tags.unwrap_or_else(|| hub.tags.clone());
        Ok(PendingHubUpsert {
            gateway: hubs,
            resource_group: resolved.resource_group,
            name: resolved.name.clone(),
            summary: format!("Update virtual hub '{}'", resolved.name),
            hub,
            tags,
        })
    }
}

/// A fully assembled hub write awaiting confirmation.
pub struct PendingHubUpsert<'a> {
    gateway: &'a VirtualHubGateway<'a>,
    resource_group: String,
    name: String,
    summary: String,
    hub: VirtualHub,
    tags: TagMap,
}

#[async_trait]
impl PendingChange for PendingHubUpsert<'_> {
    type Output = VirtualHub;

    fn summary(&self) -> String {
        self.summary.clone()
    }

    async fn commit(self) -> Result<VirtualHub> {
        self.gateway
            .create_or_update(&self.resource_group, &self.name, &self.hub, &self.tags)
            .await
    }
}

/// Parameters for `hub remove`.
pub struct RemoveVirtualHub {
    pub target: TargetReference,
}

impl RemoveVirtualHub {
    pub fn plan<'a>(self, hubs: &'a VirtualHubGateway<'a>) -> Result<PendingHubDelete<'a>> {
        let resolved = self.target.resolve()?;
        Ok(PendingHubDelete {
            gateway: hubs,
            resource_group: resolved.resource_group,
            name: resolved.name,
        })
    }
}

/// A planned hub deletion awaiting confirmation.
pub struct PendingHubDelete<'a> {
    gateway: &'a VirtualHubGateway<'a>,
    resource_group: String,
    name: String,
}

#[async_trait]
impl PendingChange for PendingHubDelete<'_> {
    type Output = bool;

    fn summary(&self) -> String {
        format!("Remove virtual hub '{}'", self.name)
    }

    async fn commit(self) -> Result<bool> {
        self.gateway
            .delete(&self.resource_group, &self.name)
            .await?;
        Ok(true)
    }
}
