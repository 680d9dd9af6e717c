//! # vwanctl - Azure Virtual WAN management CLI
//!
//! vwanctl lets an operator create, read, update, and delete Azure Virtual
//! WAN networking resources (virtual hubs, hub virtual network connections,
//! VPN sites, VPN connections) by translating command-line parameters into
//! calls against the Azure Resource Manager Network API.
//!
//! ## Core Concepts
//!
//! - **Resource identity**: every resource is addressable by a name tuple,
//!   a fully qualified resource-ID string, or a previously fetched object;
//!   all three normalize to the same canonical identity
//! - **Gateways**: thin typed wrappers over the ARM REST API, one per
//!   resource type, mapping wire JSON to local display models
//! - **Operations**: the fetch-mutate-plan-commit cycle every mutating
//!   command runs; planning is side-effect free, committing performs a
//!   full-resource write
//! - **Pending changes**: an assembled write awaiting the caller's
//!   confirmation policy, keeping the interactive prompt out of the core
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     CLI Interface                        │
//! │        (clap subcommands, confirmation prompts)          │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Operations Layer                       │
//! │      (identity resolution, plan/commit, validation)      │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Resource Gateways                       │
//! │        (wire mapping over a shared ArmClient)            │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │             Azure Resource Manager API                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use vwanctl::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ArmClient::builder()
//!         .subscription_id("0000-1111")
//!         .build()?;
//!
//!     let hubs = VirtualHubGateway::new(&client);
//!     let change = SetHubConnection {
//!         target: TargetReference::ByName {
//!             resource_group: "rg1".into(),
//!             parent_name: Some("hub1".into()),
//!             name: "conn1".into(),
//!         },
//!         enable_internet_security: true,
//!     }
//!     .plan(&hubs)
//!     .await?;
//!
//!     // Confirmation policy is the caller's; commit when satisfied.
//!     let updated = change.commit().await?;
//!     println!("{}", updated.name);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod ops;
pub mod resource_id;
pub mod secret;
pub mod tags;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    //! Quick access to the most commonly needed types: the client and
    //! gateways, the operation parameter structs, models, and errors.

    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::gateway::{
        ArmClient, ArmClientBuilder, VirtualHubGateway, VirtualWanGateway, VpnGatewayGateway,
        VpnSiteGateway,
    };
    pub use crate::models::{
        BgpSettings, DeviceProperties, HubVirtualNetworkConnection, VirtualHub, VirtualWan,
        VpnConnection, VpnGateway, VpnSite,
    };
    pub use crate::ops::hub_connection::{NewHubConnection, RemoveHubConnection, SetHubConnection};
    pub use crate::ops::virtual_hub::{NewVirtualHub, RemoveVirtualHub, SetVirtualHub};
    pub use crate::ops::vpn_connection::{
        NewVpnConnection, RemoveVpnConnection, SetVpnConnection,
    };
    pub use crate::ops::vpn_site::{NewVpnSite, RemoveVpnSite, SetVpnSite};
    pub use crate::ops::{PendingChange, TargetReference, WanReference};
    pub use crate::resource_id::ResourceIdentifier;
    pub use crate::secret::Sensitive;
    pub use crate::tags::TagMap;
}
