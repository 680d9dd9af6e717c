//! Gateways to the Azure Resource Manager Network API.
//!
//! This module provides the HTTP plumbing shared by every resource gateway:
//!
//! - A builder-constructed [`ArmClient`] over reqwest
//! - Bearer-token authentication from the environment
//! - Uniform status mapping (404 → `NotFound`, 401/403 →
//!   `AuthenticationFailed`, other failures → `RemoteApi` with the body's
//!   `error.message` extracted)
//! - ARM `{"value": [...]}` list envelope handling
//!
//! Retry and backoff are deliberately absent at this layer; a request either
//! succeeds or surfaces as a terminating error for the invocation.

mod virtual_hub;
mod virtual_wan;
mod vpn_gateway;
mod vpn_site;

pub use virtual_hub::VirtualHubGateway;
pub use virtual_wan::VirtualWanGateway;
pub use vpn_gateway::VpnGatewayGateway;
pub use vpn_site::VpnSiteGateway;

use crate::config::{Config, TOKEN_ENV};
use crate::error::{Error, Result};
use crate::secret::Sensitive;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Provider namespace for every resource this tool manages.
pub const NETWORK_PROVIDER: &str = "Microsoft.Network";

/// A weak reference to another ARM resource, carried as an id string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SubResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SubResource {
    pub(crate) fn from_id(id: Option<&String>) -> Option<Self> {
        id.map(|id| SubResource {
            id: Some(id.clone()),
        })
    }
}

/// Pull the resource group out of a resource id, when one is present.
///
/// List responses do not say which group each item belongs to beyond the id,
/// so the gateways recover it from there.
pub(crate) fn group_from_id(id: Option<&str>) -> Option<String> {
    id.and_then(|id| crate::resource_id::ResourceIdentifier::parse(id).ok())
        .map(|parsed| parsed.resource_group)
}

/// ARM list responses wrap their items in a `value` array.
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

/// ARM error responses carry a nested error object.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Builder for creating an [`ArmClient`].
pub struct ArmClientBuilder {
    endpoint: String,
    subscription_id: Option<String>,
    api_version: String,
    timeout: Duration,
    token: Option<Sensitive>,
    user_agent: String,
}

impl ArmClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: "https://management.azure.com".to_string(),
            subscription_id: None,
            api_version: "2018-04-01".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: None,
            user_agent: format!("vwanctl/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the management endpoint base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the subscription to operate in.
    pub fn subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = Some(subscription_id.into());
        self
    }

    /// Set the API version sent with every request.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the bearer token explicitly (otherwise read from the environment).
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Sensitive::new(token));
        self
    }

    /// Build the [`ArmClient`].
    pub fn build(self) -> Result<ArmClient> {
        let subscription_id = self
            .subscription_id
            .ok_or_else(|| Error::Config("no subscription id configured".to_string()))?;

        let token = match self.token {
            Some(token) => token,
            None => std::env::var(TOKEN_ENV)
                .ok()
                .filter(|t| !t.is_empty())
                .map(Sensitive::new)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "no access token available; set {} to a valid ARM bearer token",
                        TOKEN_ENV
                    ))
                })?,
        };

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| Error::http_with_source("failed to create HTTP client", e))?;

        Ok(ArmClient {
            client,
            endpoint: self.endpoint.trim_end_matches('/').to_string(),
            subscription_id,
            api_version: self.api_version,
            token,
        })
    }
}

impl Default for ArmClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the Azure Resource Manager API.
///
/// One instance per invocation; the per-resource gateways borrow it.
#[derive(Debug)]
pub struct ArmClient {
    client: Client,
    endpoint: String,
    subscription_id: String,
    api_version: String,
    token: Sensitive,
}

impl ArmClient {
    /// Create a new builder.
    pub fn builder() -> ArmClientBuilder {
        ArmClientBuilder::new()
    }

    /// Create a client from loaded configuration.
    ///
    /// `subscription_override` wins over the configured subscription.
    pub fn from_config(config: &Config, subscription_override: Option<&str>) -> Result<Self> {
        let subscription = match subscription_override {
            Some(sub) => sub,
            None => config.subscription_id()?,
        };

        Self::builder()
            .endpoint(&config.azure.endpoint)
            .subscription_id(subscription)
            .api_version(&config.azure.api_version)
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
    }

    /// The subscription this client operates in.
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Path of one resource within a resource group.
    pub(crate) fn resource_path(&self, resource_group: &str, collection: &str, name: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/{}/{}/{}",
            self.subscription_id, resource_group, NETWORK_PROVIDER, collection, name
        )
    }

    /// Path of a collection, scoped to a resource group or the subscription.
    pub(crate) fn collection_path(&self, resource_group: Option<&str>, collection: &str) -> String {
        match resource_group {
            Some(rg) if !rg.is_empty() => format!(
                "/subscriptions/{}/resourceGroups/{}/providers/{}/{}",
                self.subscription_id, rg, NETWORK_PROVIDER, collection
            ),
            _ => format!(
                "/subscriptions/{}/providers/{}/{}",
                self.subscription_id, NETWORK_PROVIDER, collection
            ),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}?api-version={}",
            self.endpoint, path, self.api_version
        )
    }

    /// GET one resource; 404 maps to `NotFound` for the given type/name.
    pub(crate) async fn get_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        resource_type: &str,
        name: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::not_found(resource_type, name));
        }
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// GET a collection; an absent or empty `value` array yields an empty Vec.
    pub(crate) async fn list_resources<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.url(path);
        debug!(%url, "GET (list)");
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let envelope: ListEnvelope<T> = response.json().await?;
        Ok(envelope.value)
    }

    /// PUT a full resource body and return the response body.
    pub(crate) async fn put_resource<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.token.expose())
            .json(body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// DELETE a resource. Deleting something already gone is a no-op.
    pub(crate) async fn delete_resource(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map non-success statuses to typed errors.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::AuthenticationFailed {
                message: format!("server returned {}", status),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
            .unwrap_or(body);

        Err(Error::RemoteApi {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_subscription() {
        let err = ArmClient::builder().token("t").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_paths() {
        let client = ArmClient::builder()
            .subscription_id("0000-1111")
            .token("t")
            .build()
            .unwrap();

        assert_eq!(
            client.resource_path("rg1", "virtualHubs", "hub1"),
            "/subscriptions/0000-1111/resourceGroups/rg1/providers/Microsoft.Network/virtualHubs/hub1"
        );
        assert_eq!(
            client.collection_path(Some("rg1"), "vpnSites"),
            "/subscriptions/0000-1111/resourceGroups/rg1/providers/Microsoft.Network/vpnSites"
        );
        assert_eq!(
            client.collection_path(None, "vpnSites"),
            "/subscriptions/0000-1111/providers/Microsoft.Network/vpnSites"
        );
    }

    #[test]
    fn test_builder_endpoint_trims_trailing_slash() {
        let client = ArmClient::builder()
            .endpoint("https://example.com/")
            .subscription_id("s")
            .token("t")
            .build()
            .unwrap();
        assert_eq!(
            client.url("/x"),
            "https://example.com/x?api-version=2018-04-01"
        );
    }
}
