//! Operations on VPN sites.

use super::{PendingChange, TargetReference, WanReference};
use crate::error::{Error, Result};
use crate::gateway::{VirtualWanGateway, VpnSiteGateway};
use crate::models::{validate_ip_address, BgpSettings, DeviceProperties, VpnSite};
use crate::secret::Sensitive;
use crate::tags::TagMap;
use async_trait::async_trait;

/// BGP flags as the operator supplied them.
#[derive(Debug, Clone, Default)]
pub struct BgpInput {
    pub asn: Option<u32>,
    pub peering_address: Option<String>,
    pub peering_weight: Option<u32>,
}

impl BgpInput {
    fn is_empty(&self) -> bool {
        self.asn.is_none() && self.peering_address.is_none() && self.peering_weight.is_none()
    }

    /// Build a BGP settings sub-object when any field triggers it.
    ///
    /// Any of a positive ASN, a positive weight, or a non-blank peering
    /// address triggers construction; partial specification is accepted.
    fn build(&self) -> Result<Option<BgpSettings>> {
        let asn = self.asn.unwrap_or(0);
        let weight = self.peering_weight.unwrap_or(0);
        let address = self
            .peering_address
            .as_deref()
            .filter(|a| !a.trim().is_empty());

        if asn == 0 && weight == 0 && address.is_none() {
            return Ok(None);
        }
        if let Some(address) = address {
            validate_ip_address(address)?;
        }
        Ok(Some(BgpSettings {
            asn,
            peering_address: address.map(str::to_string),
            peering_weight: weight,
        }))
    }
}

/// Device-description flags as the operator supplied them.
#[derive(Debug, Clone, Default)]
pub struct DeviceInput {
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub link_speed_in_mbps: Option<u32>,
}

impl DeviceInput {
    fn is_empty(&self) -> bool {
        self.model.is_none() && self.vendor.is_none() && self.link_speed_in_mbps.is_none()
    }

    /// Build a device-properties sub-object when any field is present.
    fn build(&self) -> Option<DeviceProperties> {
        if self.is_empty() {
            return None;
        }
        Some(DeviceProperties {
            device_model: self.model.clone(),
            device_vendor: self.vendor.clone(),
            link_speed_in_mbps: self.link_speed_in_mbps,
        })
    }
}

/// Parameters for `vpn-site new`.
pub struct NewVpnSite {
    pub resource_group: String,
    pub name: String,
    pub location: String,
    pub ip_address: String,
    pub address_space: Vec<String>,
    pub wan: WanReference,
    pub bgp: BgpInput,
    pub device: DeviceInput,
    pub site_key: Option<Sensitive>,
    pub is_security_site: bool,
    pub tags: Option<TagMap>,
}

impl NewVpnSite {
    /// Assemble and validate the site to create.
    ///
    /// The model is complete before any write: IP syntax, a non-empty
    /// address space, and a resolvable WAN are all checked here.
    pub async fn plan<'a>(
        self,
        sites: &'a VpnSiteGateway<'a>,
        wans: &VirtualWanGateway<'_>,
    ) -> Result<PendingSiteUpsert<'a>> {
        validate_ip_address(&self.ip_address)?;
        if self.address_space.is_empty() {
            return Err(Error::invalid_parameter(
                "--address-space",
                "at least one address prefix is required",
            ));
        }

        let wan = self.wan.resolve(wans).await?;

        let tags = self.tags.unwrap_or_default();
        let site = VpnSite {
            id: None,
            name: self.name.clone(),
            resource_group: Some(self.resource_group.clone()),
            location: self.location,
            ip_address: self.ip_address,
            address_space: self.address_space,
            bgp_settings: self.bgp.build()?,
            device_properties: self.device.build(),
            site_key: self.site_key,
            is_security_site: self.is_security_site,
            virtual_wan_id: wan.id,
            provisioning_state: None,
            tags: tags.clone(),
        };

        Ok(PendingSiteUpsert {
            gateway: sites,
            resource_group: self.resource_group,
            name: self.name.clone(),
            summary: format!("Create VPN site '{}'", self.name),
            site,
            tags,
        })
    }
}

/// Parameters for `vpn-site set`.
pub struct SetVpnSite {
    pub target: TargetReference,
    pub ip_address: Option<String>,
    pub address_space: Option<Vec<String>>,
    pub bgp: BgpInput,
    pub device: DeviceInput,
    pub site_key: Option<Sensitive>,
    pub is_security_site: Option<bool>,
    pub tags: Option<TagMap>,
}

impl SetVpnSite {
    /// Fetch the site and overlay the supplied fields.
    ///
    /// Supplying any BGP (or device) flag rebuilds that whole sub-object;
    /// omitting them all keeps what was fetched.
    pub async fn plan<'a>(self, sites: &'a VpnSiteGateway<'a>) -> Result<PendingSiteUpsert<'a>> {
        let resolved = self.target.resolve()?;
        let mut site = sites.get(&resolved.resource_group, &resolved.name).await?;

        if let Some(ip_address) = self.ip_address {
            validate_ip_address(&ip_address)?;
            site.ip_address = ip_address;
        }
        if let Some(address_space) = self.address_space {
            if address_space.is_empty() {
                return Err(Error::invalid_parameter(
                    "--address-space",
                    "at least one address prefix is required",
                ));
            }
            site.address_space = address_space;
        }
        if !self.bgp.is_empty() {
            site.bgp_settings = self.bgp.build()?;
        }
        if !self.device.is_empty() {
            site.device_properties = self.device.build();
        }
        if let Some(site_key) = self.site_key {
            site.site_key = Some(site_key);
        }
        if let Some(is_security_site) = self.is_security_site {
            site.is_security_site = is_security_site;
        }

        let tags = self.tags.unwrap_or_else(|| site.tags.clone());
        Ok(PendingSiteUpsert {
            gateway: sites,
            resource_group: resolved.resource_group,
            name: resolved.name.clone(),
            summary: format!("Update VPN site '{}'", resolved.name),
            site,
            tags,
        })
    }
}

/// A fully assembled site write awaiting confirmation.
#[derive(Debug)]
pub struct PendingSiteUpsert<'a> {
    gateway: &'a VpnSiteGateway<'a>,
    resource_group: String,
    name: String,
    summary: String,
    site: VpnSite,
    tags: TagMap,
}

impl PendingSiteUpsert<'_> {
    /// The assembled site, for inspection before commit.
    pub fn site(&self) -> &VpnSite {
        &self.site
    }
}

#[async_trait]
impl PendingChange for PendingSiteUpsert<'_> {
    type Output = VpnSite;

    fn summary(&self) -> String {
        self.summary.clone()
    }

    async fn commit(self) -> Result<VpnSite> {
        self.gateway
            .create_or_update(&self.resource_group, &self.name, &self.site, &self.tags)
            .await
    }
}

/// Parameters for `vpn-site remove`.
pub struct RemoveVpnSite {
    pub target: TargetReference,
}

impl RemoveVpnSite {
    pub fn plan<'a>(self, sites: &'a VpnSiteGateway<'a>) -> Result<PendingSiteDelete<'a>> {
        let resolved = self.target.resolve()?;
        Ok(PendingSiteDelete {
            gateway: sites,
            resource_group: resolved.resource_group,
            name: resolved.name,
        })
    }
}

/// A planned site deletion awaiting confirmation.
pub struct PendingSiteDelete<'a> {
    gateway: &'a VpnSiteGateway<'a>,
    resource_group: String,
    name: String,
}

#[async_trait]
impl PendingChange for PendingSiteDelete<'_> {
    type Output = bool;

    fn summary(&self) -> String {
        format!("Remove VPN site '{}'", self.name)
    }

    async fn commit(self) -> Result<bool> {
        self.gateway
            .delete(&self.resource_group, &self.name)
            .await?;
        Ok(true)
    }
}
