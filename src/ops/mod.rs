//! Resource operations: the plan/commit layer between the CLI and the
//! gateways.
//!
//! Every mutating command follows the same control flow:
//!
//! 1. Normalize the operator-supplied parameter set into a canonical target
//!    ([`TargetReference::resolve`])
//! 2. Fetch the current resource (and parent, for nested resources)
//! 3. Apply the requested mutation to the in-memory model (`plan`), yielding
//!    a [`PendingChange`]
//! 4. The caller gates on its own confirmation policy
//! 5. Commit the pending change with a full-resource write
//!
//! Planning never writes; a dropped [`PendingChange`] leaves the remote
//! store untouched. The interactive prompt itself lives in the CLI, not
//! here.

pub mod hub_connection;
pub mod virtual_hub;
pub mod vpn_connection;
pub mod vpn_site;

use crate::error::{Error, Result};
use crate::gateway::VirtualWanGateway;
use crate::models::VirtualWan;
use crate::resource_id::ResourceIdentifier;
use async_trait::async_trait;

/// How the operator identified the target resource.
///
/// The three variants mirror the tool's mutually exclusive parameter sets:
/// an explicit name tuple, a resource-ID string, or a previously fetched
/// object (of which only the id matters here).
#[derive(Debug, Clone)]
pub enum TargetReference {
    /// `--resource-group` + `--name` (+ parent flag for nested resources)
    ByName {
        resource_group: String,
        parent_name: Option<String>,
        name: String,
    },
    /// `--resource-id`
    ById(String),
    /// `--in-file`: the id carried by a previously fetched object
    ByObject { id: String },
}

/// A canonical target identity, whichever parameter set produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub resource_group: String,
    pub parent_name: Option<String>,
    pub name: String,
}

impl TargetReference {
    /// Normalize to a canonical `{resource_group, parent_name, name}`.
    pub fn resolve(&self) -> Result<ResolvedTarget> {
        match self {
            TargetReference::ByName {
                resource_group,
                parent_name,
                name,
            } => Ok(ResolvedTarget {
                resource_group: resource_group.clone(),
                parent_name: parent_name.clone(),
                name: name.clone(),
            }),
            TargetReference::ById(id) | TargetReference::ByObject { id } => {
                let parsed = ResourceIdentifier::parse(id)?;
                Ok(ResolvedTarget {
                    resource_group: parsed.resource_group.clone(),
                    parent_name: parsed.parent_name().map(str::to_string),
                    name: parsed.resource_name,
                })
            }
        }
    }
}

impl ResolvedTarget {
    /// The parent name, which nested-resource operations cannot do without.
    pub fn require_parent(&self, flag: &str) -> Result<&str> {
        self.parent_name
            .as_deref()
            .ok_or_else(|| Error::invalid_parameter(flag, "the parent resource name is required"))
    }
}

/// How the operator identified the Virtual WAN a hub or site belongs to.
#[derive(Debug, Clone)]
pub enum WanReference {
    /// `--wan-resource-group` + `--wan-name`
    ByName {
        resource_group: String,
        name: String,
    },
    /// `--wan-id`
    ById(String),
    /// `--wan-file`: a previously fetched WAN object
    ByObject(VirtualWan),
}

impl WanReference {
    /// Resolve the reference against the WAN gateway.
    ///
    /// An unresolvable WAN is an argument error (`MissingRequiredReference`),
    /// not a plain not-found: the command cannot proceed without it.
    pub async fn resolve(&self, wans: &VirtualWanGateway<'_>) -> Result<VirtualWan> {
        let (resource_group, name) = match self {
            WanReference::ByName {
                resource_group,
                name,
            } => (resource_group.clone(), name.clone()),
            WanReference::ById(id) => {
                let parsed = ResourceIdentifier::parse(id)?;
                (parsed.resource_group, parsed.resource_name)
            }
            WanReference::ByObject(wan) => {
                let group = wan.resource_group.clone().ok_or_else(|| {
                    Error::MissingRequiredReference(
                        "the supplied virtual WAN object has no resource group".to_string(),
                    )
                })?;
                (group, wan.name.clone())
            }
        };

        wans.get(&resource_group, &name).await.map_err(|e| {
            if e.is_not_found() {
                Error::MissingRequiredReference(format!(
                    "the referenced virtual WAN '{}' cannot be resolved",
                    name
                ))
            } else {
                e
            }
        })
    }
}

/// A planned write, fully assembled and validated, awaiting the caller's
/// confirmation policy.
#[async_trait]
pub trait PendingChange: Send {
    /// What committing this change produces.
    type Output;

    /// Human-readable description, used for the confirmation prompt.
    fn summary(&self) -> String;

    /// Perform the write. Consumes the change; nothing has touched the
    /// remote store before this point.
    async fn commit(self) -> Result<Self::Output>;
}

/// Translate a gateway `NotFound` into `ParentNotFound` for parent fetches.
pub(crate) fn parent_fetch<T>(result: Result<T>, resource_type: &str, name: &str) -> Result<T> {
    result.map_err(|e| {
        if matches!(e, Error::NotFound { .. }) {
            Error::parent_not_found(resource_type, name)
        } else {
            e
        }
    })
}
