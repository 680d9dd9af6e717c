//! CLI tests for vwanctl
//!
//! This test suite covers:
//! - Argument parsing with clap, including mutually exclusive parameter sets
//! - Configuration errors (no subscription, no token) and their exit codes
//! - End-to-end command runs against a mock ARM endpoint
//! - The confirmation gate refusing to write without a terminal or --force

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUB: &str = "00000000-0000-0000-0000-000000000003";

/// A command with ambient Azure environment removed.
fn vwanctl() -> Command {
    let mut cmd = Command::cargo_bin("vwanctl").unwrap();
    cmd.env_remove("AZURE_SUBSCRIPTION_ID")
        .env_remove("AZURE_ACCESS_TOKEN")
        .env_remove("VWANCTL_ENDPOINT")
        .env_remove("VWANCTL_CONFIG");
    cmd
}

/// A command wired to a mock ARM endpoint.
fn vwanctl_against(server: &MockServer) -> Command {
    let mut cmd = vwanctl();
    cmd.env("AZURE_SUBSCRIPTION_ID", SUB)
        .env("AZURE_ACCESS_TOKEN", "test-token")
        .env("VWANCTL_ENDPOINT", server.uri());
    cmd
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_version_flag() {
    vwanctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vwanctl"));
}

#[test]
fn test_help_lists_resource_command_groups() {
    vwanctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hub-connection"))
        .stdout(predicate::str::contains("vpn-site"))
        .stdout(predicate::str::contains("vpn-connection"));
}

#[test]
fn test_conflicting_parameter_sets_are_rejected_at_parse_time() {
    vwanctl()
        .args([
            "hub",
            "set",
            "-g",
            "rg1",
            "-n",
            "hub1",
            "--resource-id",
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualHubs/h",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unknown_subcommand_fails() {
    vwanctl().arg("frobnicate").assert().failure().code(2);
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_missing_subscription_is_reported() {
    vwanctl()
        .args(["wan", "get"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no subscription configured"));
}

#[test]
fn test_missing_token_is_reported() {
    vwanctl()
        .args(["--subscription", SUB, "wan", "get"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("AZURE_ACCESS_TOKEN"));
}

// ============================================================================
// End-to-end against a mock endpoint
// ============================================================================

fn hub_body() -> serde_json::Value {
    json!({
        "id": format!("/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualHubs/hub1"),
        "name": "hub1",
        "location": "westeurope",
        "properties": {
            "addressPrefix": "10.1.0.0/16",
            "virtualNetworkConnections": [
                {"name": "conn1", "properties": {"enableInternetSecurity": false}}
            ]
        }
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_hub_get_prints_the_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hub_body()))
        .mount(&server)
        .await;

    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args(["--output", "json", "hub", "get", "-g", "rg1", "-n", "hub1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"name\": \"hub1\""))
            .stdout(predicate::str::contains("\"addressPrefix\": \"10.1.0.0/16\""));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_name_without_group_is_an_argument_error() {
    let server = MockServer::start().await;
    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args(["wan", "get", "-n", "wan1"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("--resource-group"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_hub_exits_with_not_found_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args(["hub", "get", "-g", "rg1", "-n", "ghost"])
            .assert()
            .failure()
            .code(3)
            .stderr(predicate::str::contains("was not found"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_without_terminal_or_force_refuses_to_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hub_body()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args([
            "hub-connection",
            "remove",
            "-g",
            "rg1",
            "--hub-name",
            "hub1",
            "-n",
            "conn1",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_as_job_requires_force() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hub_body()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args([
            "hub-connection",
            "remove",
            "-g",
            "rg1",
            "--hub-name",
            "hub1",
            "-n",
            "conn1",
            "--as-job",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("background execution cannot prompt"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_forced_remove_writes_and_prints_true() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hub_body()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hub_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args([
            "hub-connection",
            "remove",
            "-g",
            "rg1",
            "--hub-name",
            "hub1",
            "-n",
            "conn1",
            "--force",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_hub_connection_by_resource_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hub_body()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hub_body()))
        .expect(1)
        .mount(&server)
        .await;

    let resource_id = format!(
        "/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Network/virtualHubs/hub1/hubVirtualNetworkConnections/conn1"
    );
    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args([
            "hub-connection",
            "set",
            "--resource-id",
            &resource_id,
            "--enable-internet-security",
            "--force",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"conn1\""));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_resource_id_is_an_argument_error() {
    let server = MockServer::start().await;
    let mut cmd = vwanctl_against(&server);
    tokio::task::spawn_blocking(move || {
        cmd.args([
            "hub-connection",
            "set",
            "--resource-id",
            "not-a-resource-id",
            "--force",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Malformed resource id"));
    })
    .await
    .unwrap();
}
