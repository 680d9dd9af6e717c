//! Operation scenario tests against a mock ARM endpoint
//!
//! This test suite covers the fetch-mutate-plan-commit cycle end to end:
//! - `hub-connection set` rewrites the parent with siblings untouched
//! - `hub-connection remove` drops exactly the named child
//! - Missing parents surface as ParentNotFound, missing children as
//!   ChildNotFound, with no write issued
//! - `vpn-site new` validation and sub-object trigger rules
//! - A planned-but-dropped change never writes

use serde_json::json;
use vwanctl::error::Error;
use vwanctl::gateway::{ArmClient, VirtualHubGateway, VirtualWanGateway, VpnGatewayGateway, VpnSiteGateway};
use vwanctl::ops::hub_connection::{NewHubConnection, RemoveHubConnection, SetHubConnection};
use vwanctl::ops::vpn_connection::RemoveVpnConnection;
use vwanctl::ops::vpn_site::{BgpInput, DeviceInput, NewVpnSite};
use vwanctl::ops::{PendingChange, TargetReference, WanReference};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUB: &str = "00000000-0000-0000-0000-000000000002";

fn client_for(server: &MockServer) -> ArmClient {
    ArmClient::builder()
        .endpoint(server.uri())
        .subscription_id(SUB)
        .token("test-token")
        .build()
        .unwrap()
}

fn hub_path() -> String {
    format!(
        "/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualHubs/hub1"
    )
}

fn connection_json(name: &str, internet_security: bool) -> serde_json::Value {
    json!({
        "name": name,
        "properties": {
            "remoteVirtualNetwork": {
                "id": format!("/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/{name}-vnet")
            },
            "enableInternetSecurity": internet_security
        }
    })
}

fn hub_json(connections: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "id": format!("/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualHubs/hub1"),
        "name": "hub1",
        "location": "westeurope",
        "tags": {"env": "test"},
        "properties": {
            "addressPrefix": "10.1.0.0/16",
            "virtualNetworkConnections": connections,
            "provisioningState": "Succeeded"
        }
    })
}

fn by_name(parent: &str, name: &str) -> TargetReference {
    TargetReference::ByName {
        resource_group: "rg1".into(),
        parent_name: Some(parent.into()),
        name: name.into(),
    }
}

#[tokio::test]
async fn test_set_hub_connection_rewrites_parent_with_siblings_untouched() {
    let server = MockServer::start().await;
    let fetched = hub_json(vec![
        connection_json("conn1", false),
        connection_json("conn2", true),
    ]);
    let updated = hub_json(vec![
        connection_json("conn1", true),
        connection_json("conn2", true),
    ]);

    // First GET serves the pre-update hub, the re-fetch after the PUT serves
    // the updated one.
    Mock::given(method("GET"))
        .and(path(hub_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(fetched))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(hub_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(hub_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hubs = VirtualHubGateway::new(&client);

    let change = SetHubConnection {
        target: by_name("hub1", "CONN1"),
        enable_internet_security: true,
    }
    .plan(&hubs)
    .await
    .unwrap();
    let connection = change.commit().await.unwrap();

    assert_eq!(connection.name, "conn1");
    assert!(connection.enable_internet_security);

    // The PUT carried the whole hub: conn1 flipped, conn2 untouched.
    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    let connections = body["properties"]["virtualNetworkConnections"]
        .as_array()
        .unwrap();
    assert_eq!(connections.len(), 2);
    assert_eq!(connections[0]["name"], "conn1");
    assert_eq!(
        connections[0]["properties"]["enableInternetSecurity"],
        true
    );
    assert_eq!(connections[1]["name"], "conn2");
    assert_eq!(
        connections[1]["properties"]["enableInternetSecurity"],
        true
    );
    // Tags rode through from the fetched hub.
    assert_eq!(body["tags"]["env"], "test");
}

#[tokio::test]
async fn test_remove_hub_connection_drops_exactly_the_named_child() {
    let server = MockServer::start().await;
    let fetched = hub_json(vec![
        connection_json("conn1", false),
        connection_json("Conn2", false),
        connection_json("conn3", false),
    ]);

    Mock::given(method("GET"))
        .and(path(hub_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(fetched.clone()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(hub_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(fetched))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hubs = VirtualHubGateway::new(&client);

    let change = RemoveHubConnection {
        target: by_name("hub1", "conn2"),
    }
    .plan(&hubs)
    .await
    .unwrap();
    assert!(change.commit().await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    let names: Vec<&str> = body["properties"]["virtualNetworkConnections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["conn1", "conn3"]);
}

#[tokio::test]
async fn test_remove_missing_connection_fails_without_writing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(hub_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hub_json(vec![connection_json("conn1", false)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hubs = VirtualHubGateway::new(&client);

    let err = RemoveHubConnection {
        target: by_name("hub1", "ghost"),
    }
    .plan(&hubs)
    .await
    .unwrap_err();
    assert!(
        matches!(&err, Error::ChildNotFound { name, .. } if name == "ghost"),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_missing_parent_surfaces_as_parent_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hubs = VirtualHubGateway::new(&client);

    let err = SetHubConnection {
        target: by_name("nohub", "conn1"),
        enable_internet_security: true,
    }
    .plan(&hubs)
    .await
    .unwrap_err();
    assert!(
        matches!(&err, Error::ParentNotFound { name, .. } if name == "nohub"),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn test_new_connection_rejects_duplicate_name_without_writing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(hub_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hub_json(vec![connection_json("Spoke-1", false)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hubs = VirtualHubGateway::new(&client);

    let err = NewHubConnection {
        resource_group: "rg1".into(),
        hub_name: "hub1".into(),
        name: "spoke-1".into(),
        remote_virtual_network_id: None,
        enable_internet_security: false,
    }
    .plan(&hubs)
    .await
    .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { .. }));
}

#[tokio::test]
async fn test_dropped_pending_change_never_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(hub_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hub_json(vec![connection_json("conn1", false)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let hubs = VirtualHubGateway::new(&client);

    let change = SetHubConnection {
        target: by_name("hub1", "conn1"),
        enable_internet_security: true,
    }
    .plan(&hubs)
    .await
    .unwrap();
    assert_eq!(
        change.summary(),
        "Update hub virtual network connection 'conn1'"
    );
    // Declined confirmation: the change is dropped, nothing is written.
    drop(change);
}

fn wan_path(name: &str) -> String {
    format!(
        "/subscriptions/{SUB}/resourceGroups/wan-rg/providers/Microsoft.Network/virtualWans/{name}"
    )
}

fn wan_json(name: &str) -> serde_json::Value {
    json!({
        "id": format!("/subscriptions/{SUB}/resourceGroups/wan-rg/providers/Microsoft.Network/virtualWans/{name}"),
        "name": name,
        "location": "westeurope",
        "properties": {"provisioningState": "Succeeded"}
    })
}

#[tokio::test]
async fn test_new_vpn_site_without_bgp_or_device_leaves_subobjects_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(wan_path("wan1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(wan_json("wan1")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!(
            "/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/vpnSites/site1"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": format!("/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/vpnSites/site1"),
            "name": "site1",
            "location": "westeurope",
            "properties": {
                "ipAddress": "10.0.0.1",
                "addressSpace": {"addressPrefixes": ["192.168.1.0/24"]},
                "virtualWan": {"id": wan_json("wan1")["id"]},
                "provisioningState": "Succeeded"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let sites = VpnSiteGateway::new(&client);
    let wans = VirtualWanGateway::new(&client);

    let change = NewVpnSite {
        resource_group: "rg1".into(),
        name: "site1".into(),
        location: "westeurope".into(),
        ip_address: "10.0.0.1".into(),
        address_space: vec!["192.168.1.0/24".into()],
        wan: WanReference::ByName {
            resource_group: "wan-rg".into(),
            name: "wan1".into(),
        },
        bgp: BgpInput::default(),
        device: DeviceInput::default(),
        site_key: None,
        is_security_site: false,
        tags: None,
    }
    .plan(&sites, &wans)
    .await
    .unwrap();

    // The assembled model carries no BGP or device sub-objects.
    assert!(change.site().bgp_settings.is_none());
    assert!(change.site().device_properties.is_none());
    assert!(change
        .site()
        .virtual_wan_id
        .as_deref()
        .unwrap()
        .ends_with("virtualWans/wan1"));

    let site = change.commit().await.unwrap();
    assert!(site.bgp_settings.is_none());
    assert!(site.device_properties.is_none());

    // Neither key appears on the wire at all.
    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    assert!(body["properties"].get("bgpProperties").is_none());
    assert!(body["properties"].get("deviceProperties").is_none());
    assert_eq!(
        body["properties"]["addressSpace"]["addressPrefixes"][0],
        "192.168.1.0/24"
    );
}

#[tokio::test]
async fn test_new_vpn_site_validates_before_any_request() {
    // No server at all: validation failures must not touch the network.
    let client = ArmClient::builder()
        .endpoint("http://127.0.0.1:9")
        .subscription_id(SUB)
        .token("test-token")
        .build()
        .unwrap();
    let sites = VpnSiteGateway::new(&client);
    let wans = VirtualWanGateway::new(&client);

    let bad_ip = NewVpnSite {
        resource_group: "rg1".into(),
        name: "site1".into(),
        location: "westeurope".into(),
        ip_address: "999.1.1.1".into(),
        address_space: vec!["192.168.1.0/24".into()],
        wan: WanReference::ByName {
            resource_group: "wan-rg".into(),
            name: "wan1".into(),
        },
        bgp: BgpInput::default(),
        device: DeviceInput::default(),
        site_key: None,
        is_security_site: false,
        tags: None,
    }
    .plan(&sites, &wans)
    .await
    .unwrap_err();
    assert!(matches!(bad_ip, Error::InvalidIpAddress(_)));

    let empty_space = NewVpnSite {
        resource_group: "rg1".into(),
        name: "site1".into(),
        location: "westeurope".into(),
        ip_address: "10.0.0.1".into(),
        address_space: vec![],
        wan: WanReference::ByName {
            resource_group: "wan-rg".into(),
            name: "wan1".into(),
        },
        bgp: BgpInput::default(),
        device: DeviceInput::default(),
        site_key: None,
        is_security_site: false,
        tags: None,
    }
    .plan(&sites, &wans)
    .await
    .unwrap_err();
    assert!(matches!(empty_space, Error::InvalidParameter { .. }));
}

#[tokio::test]
async fn test_new_vpn_site_with_unresolvable_wan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let sites = VpnSiteGateway::new(&client);
    let wans = VirtualWanGateway::new(&client);

    let err = NewVpnSite {
        resource_group: "rg1".into(),
        name: "site1".into(),
        location: "westeurope".into(),
        ip_address: "10.0.0.1".into(),
        address_space: vec!["192.168.1.0/24".into()],
        wan: WanReference::ByName {
            resource_group: "wan-rg".into(),
            name: "nowan".into(),
        },
        bgp: BgpInput::default(),
        device: DeviceInput::default(),
        site_key: None,
        is_security_site: false,
        tags: None,
    }
    .plan(&sites, &wans)
    .await
    .unwrap_err();
    assert!(matches!(err, Error::MissingRequiredReference(_)));
}

#[tokio::test]
async fn test_remove_vpn_connection_rewrites_gateway() {
    let server = MockServer::start().await;
    let gateway_path = format!(
        "/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/vpnGateways/gw1"
    );
    let gateway_body = json!({
        "id": format!("/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/vpnGateways/gw1"),
        "name": "gw1",
        "location": "westeurope",
        "properties": {
            "vpnGatewayScaleUnit": 1,
            "connections": [
                {"name": "to-branch1", "properties": {"enableBgp": false}},
                {"name": "to-branch2", "properties": {"enableBgp": true}}
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path(gateway_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(gateway_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gateways = VpnGatewayGateway::new(&client);

    let change = RemoveVpnConnection {
        target: TargetReference::ById(format!(
            "/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/vpnGateways/gw1/vpnConnections/to-branch1"
        )),
    }
    .plan(&gateways)
    .await
    .unwrap();
    assert!(change.commit().await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    let names: Vec<&str> = body["properties"]["connections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["to-branch2"]);
}
