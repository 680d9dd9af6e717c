//! Operations on hub virtual network connections.
//!
//! Connections have no lifecycle of their own: every operation fetches the
//! parent hub, edits its embedded connection list, and writes the whole hub
//! back. The write is not atomic with respect to concurrent edits of the
//! same hub by other actors.

use super::{parent_fetch, PendingChange, TargetReference};
use crate::error::{Error, Result};
use crate::gateway::VirtualHubGateway;
use crate::models::{HubVirtualNetworkConnection, VirtualHub};
use async_trait::async_trait;

const PARENT_KIND: &str = "virtual hub";
const CHILD_KIND: &str = "hub virtual network connection";

/// Fetch the parent hub of a connection, surfacing `ParentNotFound`.
async fn fetch_parent(
    hubs: &VirtualHubGateway<'_>,
    resource_group: &str,
    hub_name: &str,
) -> Result<VirtualHub> {
    parent_fetch(hubs.get(resource_group, hub_name).await, PARENT_KIND, hub_name)
}

/// Fetch one connection, or all of a hub's connections when no name given.
pub async fn get(
    hubs: &VirtualHubGateway<'_>,
    resource_group: &str,
    hub_name: &str,
    name: Option<&str>,
) -> Result<Vec<HubVirtualNetworkConnection>> {
    let hub = fetch_parent(hubs, resource_group, hub_name).await?;
    match name {
        Some(name) => {
            let connection = hub
                .find_connection(name)
                .cloned()
                .ok_or_else(|| Error::child_not_found(CHILD_KIND, name, hub_name))?;
            Ok(vec![connection])
        }
        None => Ok(hub.connections),
    }
}

/// Parameters for `hub-connection new`.
pub struct NewHubConnection {
    pub resource_group: String,
    pub hub_name: String,
    pub name: String,
    pub remote_virtual_network_id: Option<String>,
    pub enable_internet_security: bool,
}

impl NewHubConnection {
    /// Fetch the hub and append the new connection.
    ///
    /// Connection names are unique within a hub, case-insensitively; a
    /// duplicate is an argument error, not an overwrite.
    pub async fn plan<'a>(
        self,
        hubs: &'a VirtualHubGateway<'a>,
    ) -> Result<PendingConnectionUpsert<'a>> {
        let mut hub = fetch_parent(hubs, &self.resource_group, &self.hub_name).await?;

        if hub.find_connection(&self.name).is_some() {
            return Err(Error::invalid_parameter(
                "--name",
                format!(
                    "a connection named '{}' already exists in hub '{}'",
                    self.name, self.hub_name
                ),
            ));
        }

        hub.connections.push(HubVirtualNetworkConnection {
            id: None,
            name: self.name.clone(),
            remote_virtual_network_id: self.remote_virtual_network_id,
            enable_internet_security: self.enable_internet_security,
        });

        Ok(PendingConnectionUpsert {
            gateway: hubs,
            resource_group: self.resource_group,
            hub_name: self.hub_name,
            connection_name: self.name.clone(),
            summary: format!("Create hub virtual network connection '{}'", self.name),
            hub,
        })
    }
}

/// Parameters for `hub-connection set`.
pub struct SetHubConnection {
    pub target: TargetReference,
    pub enable_internet_security: bool,
}

impl SetHubConnection {
    /// Fetch the hub, locate the connection, apply the change.
    ///
    /// Sibling connections ride through the write untouched.
    pub async fn plan<'a>(
        self,
        hubs: &'a VirtualHubGateway<'a>,
    ) -> Result<PendingConnectionUpsert<'a>> {
        let resolved = self.target.resolve()?;
        let hub_name = resolved.require_parent("--hub-name")?.to_string();
        let mut hub = fetch_parent(hubs, &resolved.resource_group, &hub_name).await?;

        let connection = hub
            .find_connection_mut(&resolved.name)
            .ok_or_else(|| Error::child_not_found(CHILD_KIND, &resolved.name, &hub_name))?;
        connection.enable_internet_security = self.enable_internet_security;
        let connection_name = connection.name.clone();

        Ok(PendingConnectionUpsert {
            gateway: hubs,
            resource_group: resolved.resource_group,
            hub_name,
            connection_name,
            summary: format!(
                "Update hub virtual network connection '{}'",
                resolved.name
            ),
            hub,
        })
    }
}

/// A hub write that exists to upsert one embedded connection.
///
/// Committing writes the whole hub, re-fetches it, and returns the named
/// connection as the remote now reports it.
#[derive(Debug)]
pub struct PendingConnectionUpsert<'a> {
    gateway: &'a VirtualHubGateway<'a>,
    resource_group: String,
    hub_name: String,
    connection_name: String,
    summary: String,
    hub: VirtualHub,
}

#[async_trait]
impl PendingChange for PendingConnectionUpsert<'_> {
    type Output = HubVirtualNetworkConnection;

    fn summary(&self) -> String {
        self.summary.clone()
    }

    async fn commit(self) -> Result<HubVirtualNetworkConnection> {
        let tags = self.hub.tags.clone();
        self.gateway
            .create_or_update(&self.resource_group, &self.hub_name, &self.hub, &tags)
            .await?;

        let refreshed = self.gateway.get(&self.resource_group, &self.hub_name).await?;
        refreshed
            .find_connection(&self.connection_name)
            .cloned()
            .ok_or_else(|| {
                Error::child_not_found(CHILD_KIND, &self.connection_name, &self.hub_name)
            })
    }
}

/// Parameters for `hub-connection remove`.
pub struct RemoveHubConnection {
    pub target: TargetReference,
}

impl RemoveHubConnection {
    /// Fetch the hub and drop the connection from its list.
    ///
    /// A name that matches nothing leaves the hub untouched and fails with
    /// `ChildNotFound`; no write is planned.
    pub async fn plan<'a>(
        self,
        hubs: &'a VirtualHubGateway<'a>,
    ) -> Result<PendingConnectionRemoval<'a>> {
        let resolved = self.target.resolve()?;
        let hub_name = resolved.require_parent("--hub-name")?.to_string();
        let mut hub = fetch_parent(hubs, &resolved.resource_group, &hub_name).await?;

        let removed = hub
            .remove_connection(&resolved.name)
            .ok_or_else(|| Error::child_not_found(CHILD_KIND, &resolved.name, &hub_name))?;

        Ok(PendingConnectionRemoval {
            gateway: hubs,
            resource_group: resolved.resource_group,
            hub_name,
            removed_name: removed.name,
            hub,
        })
    }
}

/// A hub write that exists to drop one embedded connection.
#[derive(Debug)]
pub struct PendingConnectionRemoval<'a> {
    gateway: &'a VirtualHubGateway<'a>,
    resource_group: String,
    hub_name: String,
    removed_name: String,
    hub: VirtualHub,
}

#[async_trait]
impl PendingChange for PendingConnectionRemoval<'_> {
    type Output = bool;

    fn summary(&self) -> String {
        format!(
            "Remove hub virtual network connection '{}'",
            self.removed_name
        )
    }

    async fn commit(self) -> Result<bool> {
        let tags = self.hub.tags.clone();
        self.gateway
            .create_or_update(&self.resource_group, &self.hub_name, &self.hub, &tags)
            .await?;
        Ok(true)
    }
}
