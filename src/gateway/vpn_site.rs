//! Gateway for VPN site resources.

use super::{group_from_id, ArmClient, SubResource};
use crate::error::Result;
use crate::models::{BgpSettings, DeviceProperties, VpnSite};
use crate::secret::Sensitive;
use crate::tags;
use crate::tags::TagMap;
use serde::{Deserialize, Serialize};

const COLLECTION: &str = "vpnSites";
const KIND: &str = "VPN site";

/// Wire shape of a VPN site resource.
#[derive(Debug, Serialize, Deserialize)]
struct VpnSiteResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<TagMap>,
    #[serde(default)]
    properties: VpnSiteProperties,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VpnSiteProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_space: Option<AddressSpace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bgp_properties: Option<BgpSettingsResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_properties: Option<DevicePropertiesResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_security_site: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    virtual_wan: Option<SubResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provisioning_state: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AddressSpace {
    #[serde(default)]
    address_prefixes: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BgpSettingsResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    asn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bgp_peering_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peer_weight: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DevicePropertiesResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    device_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_speed_in_mbps: Option<u32>,
}

fn to_model(resource: VpnSiteResource, resource_group: Option<&str>) -> VpnSite {
    let resource_group = resource_group
        .map(str::to_string)
        .or_else(|| group_from_id(resource.id.as_deref()));
    VpnSite {
        name: resource.name.clone().unwrap_or_default(),
        id: resource.id,
        resource_group,
        location: resource.location,
        ip_address: resource.properties.ip_address.unwrap_or_default(),
        address_space: resource
            .properties
            .address_space
            .map(|a| a.address_prefixes)
            .unwrap_or_default(),
        bgp_settings: resource.properties.bgp_properties.map(|b| BgpSettings {
            asn: b.asn.unwrap_or(0),
            peering_address: b.bgp_peering_address,
            peering_weight: b.peer_weight.unwrap_or(0),
        }),
        device_properties: resource.properties.device_properties.map(|d| {
            DeviceProperties {
                device_model: d.device_model,
                device_vendor: d.device_vendor,
                link_speed_in_mbps: d.link_speed_in_mbps,
            }
        }),
        site_key: resource.properties.site_key.map(Sensitive::new),
        is_security_site: resource.properties.is_security_site.unwrap_or(false),
        virtual_wan_id: resource.properties.virtual_wan.and_then(|w| w.id),
        provisioning_state: resource.properties.provisioning_state,
        tags: tags::decode(resource.tags),
    }
}

fn to_wire(site: &VpnSite, tags: &TagMap) -> Result<VpnSiteResource> {
    Ok(VpnSiteResource {
        id: site.id.clone(),
        name: Some(site.name.clone()),
        location: site.location.clone(),
        tags: tags::encode(Some(tags))?,
        properties: VpnSiteProperties {
            ip_address: Some(site.ip_address.clone()),
            address_space: if site.address_space.is_empty() {
                None
            } else {
                Some(AddressSpace {
                    address_prefixes: site.address_space.clone(),
                })
            },
            bgp_properties: site.bgp_settings.as_ref().map(|b| BgpSettingsResource {
                asn: Some(b.asn),
                bgp_peering_address: b.peering_address.clone(),
                peer_weight: Some(b.peering_weight),
            }),
            device_properties: site.device_properties.as_ref().map(|d| {
                DevicePropertiesResource {
                    device_model: d.device_model.clone(),
                    device_vendor: d.device_vendor.clone(),
                    link_speed_in_mbps: d.link_speed_in_mbps,
                }
            }),
            site_key: site.site_key.as_ref().map(|k| k.expose().to_string()),
            is_security_site: Some(site.is_security_site),
            virtual_wan: SubResource::from_id(site.virtual_wan_id.as_ref()),
            provisioning_state: None,
        },
    })
}

/// CRUD operations for VPN sites.
#[derive(Debug)]
pub struct VpnSiteGateway<'a> {
    client: &'a ArmClient,
}

impl<'a> VpnSiteGateway<'a> {
    pub fn new(client: &'a ArmClient) -> Self {
        Self { client }
    }

    /// Fetch one site. Fails with `NotFound` when the API reports none.
    pub async fn get(&self, resource_group: &str, name: &str) -> Result<VpnSite> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        let resource: VpnSiteResource = self.client.get_resource(&path, KIND, name).await?;
        Ok(to_model(resource, Some(resource_group)))
    }

    /// List sites in a resource group, or subscription-wide when none given.
    pub async fn list(&self, resource_group: Option<&str>) -> Result<Vec<VpnSite>> {
        let path = self.client.collection_path(resource_group, COLLECTION);
        let resources: Vec<VpnSiteResource> = self.client.list_resources(&path).await?;
        Ok(resources.into_iter().map(|r| to_model(r, None)).collect())
    }

    /// Replace the full site resource.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        site: &VpnSite,
        tags: &TagMap,
    ) -> Result<VpnSite> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        let body = to_wire(site, tags)?;
        let resource: VpnSiteResource = self.client.put_resource(&path, &body).await?;
        Ok(to_model(resource, Some(resource_group)))
    }

    /// Delete a site. Deleting an absent site is a no-op.
    pub async fn delete(&self, resource_group: &str, name: &str) -> Result<()> {
        let path = self.client.resource_path(resource_group, COLLECTION, name);
        self.client.delete_resource(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_key_crosses_the_wire_but_not_the_display() {
        let site = VpnSite {
            id: None,
            name: "site1".into(),
            resource_group: Some("rg1".into()),
            location: "westeurope".into(),
            ip_address: "10.0.0.1".into(),
            address_space: vec!["192.168.0.0/24".into()],
            bgp_settings: None,
            device_properties: None,
            site_key: Some(Sensitive::new("psk-value")),
            is_security_site: false,
            virtual_wan_id: None,
            provisioning_state: None,
            tags: TagMap::new(),
        };

        let wire = to_wire(&site, &site.tags.clone()).unwrap();
        let body = serde_json::to_value(&wire).unwrap();
        // The wire body carries the real key...
        assert_eq!(body["properties"]["siteKey"], "psk-value");
        // ...while the display model serializes redacted.
        let display = serde_json::to_value(&site).unwrap();
        assert_eq!(display["siteKey"], "[REDACTED]");
    }

    #[test]
    fn test_absent_bgp_and_device_stay_absent() {
        let json = serde_json::json!({
            "name": "site1",
            "location": "westeurope",
            "properties": {
                "ipAddress": "10.0.0.1",
                "addressSpace": {"addressPrefixes": ["192.168.0.0/24"]}
            }
        });
        let resource: VpnSiteResource = serde_json::from_value(json).unwrap();
        let site = to_model(resource, Some("rg1"));
        assert!(site.bgp_settings.is_none());
        assert!(site.device_properties.is_none());
        assert_eq!(site.address_space, vec!["192.168.0.0/24".to_string()]);
    }
}
