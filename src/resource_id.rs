//! Azure resource-ID parsing.
//!
//! An ARM resource id is a hierarchical path string of the form
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/{provider}/{type}/{name}`
//! with optional nested `{childType}/{childName}` pairs. Commands accept these
//! ids directly (`--resource-id`) and also pull them out of previously fetched
//! objects, so parsing has to be exact and round-trip stable. No network
//! access; pure string parsing.

use crate::error::{Error, Result};
use std::fmt;

/// A parsed ARM resource id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentifier {
    /// Subscription GUID (not validated as a GUID; ARM treats it opaquely)
    pub subscription_id: String,
    /// Resource group name
    pub resource_group: String,
    /// Provider namespace, e.g. `Microsoft.Network`
    pub provider: String,
    /// Intermediate `type/name` pairs for nested resources,
    /// e.g. `virtualHubs/hub1`
    pub parent_path: Option<String>,
    /// Type of the leaf resource, e.g. `hubVirtualNetworkConnections`
    pub resource_type: String,
    /// Name of the leaf resource
    pub resource_name: String,
}

impl ResourceIdentifier {
    /// Parse a resource-ID string.
    pub fn parse(id: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::malformed_resource_id(id, reason);

        if id.trim().is_empty() {
            return Err(malformed("id is empty"));
        }
        if !id.starts_with('/') {
            return Err(malformed("id must start with '/'"));
        }

        let segments: Vec<&str> = id[1..].split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(malformed("id contains an empty path segment"));
        }

        // Keywords are matched case-insensitively, as ARM does.
        if segments.len() < 8 {
            return Err(malformed(
                "expected at least /subscriptions/{id}/resourceGroups/{name}/providers/{provider}/{type}/{name}",
            ));
        }
        if !segments[0].eq_ignore_ascii_case("subscriptions") {
            return Err(malformed("missing '/subscriptions/' prefix"));
        }
        if !segments[2].eq_ignore_ascii_case("resourceGroups") {
            return Err(malformed("missing '/resourceGroups/' segment"));
        }
        if !segments[4].eq_ignore_ascii_case("providers") {
            return Err(malformed("missing '/providers/' segment"));
        }

        let subscription_id = segments[1].to_string();
        let resource_group = segments[3].to_string();
        let provider = segments[5].to_string();

        // Everything after the provider is type/name pairs; the last pair is
        // the leaf resource and any preceding pairs form the parent path.
        let trailing = &segments[6..];
        if trailing.len() % 2 != 0 {
            return Err(malformed("resource type/name segments are unbalanced"));
        }

        let resource_type = trailing[trailing.len() - 2].to_string();
        let resource_name = trailing[trailing.len() - 1].to_string();
        let parent_path = if trailing.len() > 2 {
            Some(trailing[..trailing.len() - 2].join("/"))
        } else {
            None
        };

        Ok(Self {
            subscription_id,
            resource_group,
            provider,
            parent_path,
            resource_type,
            resource_name,
        })
    }

    /// The name of the immediate parent resource, when nested.
    ///
    /// For `.../virtualHubs/hub1/hubVirtualNetworkConnections/conn1` this is
    /// `hub1`.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_path
            .as_deref()
            .and_then(|p| p.rsplit('/').next())
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            self.subscription_id, self.resource_group, self.provider
        )?;
        if let Some(parent) = &self.parent_path {
            write!(f, "/{}", parent)?;
        }
        write!(f, "/{}/{}", self.resource_type, self.resource_name)
    }
}
