//! Virtual WAN display model.

use crate::tags::TagMap;
use serde::{Deserialize, Serialize};

/// A Virtual WAN resource.
///
/// Hubs and VPN sites reference a WAN through its id string; the WAN never
/// owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualWan {
    /// Fully qualified resource id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name
    pub name: String,
    /// Resource group the WAN lives in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Azure region
    pub location: String,
    /// Last provisioning state reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    /// Resource tags
    #[serde(default)]
    pub tags: TagMap,
}
