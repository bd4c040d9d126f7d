//! Integration tests for NetBox client
//!
//! These tests require a running NetBox instance.
//! Set NETBOX_URL and NETBOX_TOKEN environment variables to run.

use netbox_client::{IPAddressPatch, NetBoxClient};

fn live_client() -> NetBoxClient {
    let url = std::env::var("NETBOX_URL")
        .unwrap_or_else(|_| "http://localhost:8001".to_string());
    let token = std::env::var("NETBOX_TOKEN")
        .expect("NETBOX_TOKEN environment variable must be set");

    NetBoxClient::new(url, token).expect("Failed to create client")
}

#[tokio::test]
#[ignore] // Requires running NetBox instance
async fn test_validate_token() {
    let client = live_client();
    client.validate_token().await.expect("Token should be valid");
}

#[tokio::test]
#[ignore]
async fn test_query_dependency_endpoints() {
    let client = live_client();

    let roles = client.query_device_roles(&[], true).await
        .expect("Failed to query device roles");
    let manufacturers = client.query_manufacturers(&[], true).await
        .expect("Failed to query manufacturers");
    let sites = client.query_sites(&[], true).await
        .expect("Failed to query sites");

    println!(
        "Found {} roles, {} manufacturers, {} sites",
        roles.len(),
        manufacturers.len(),
        sites.len()
    );
}

#[tokio::test]
#[ignore]
async fn test_lookup_missing_slug_returns_empty() {
    let client = live_client();

    let sites = client.query_sites(&[("slug", "no_such_site_for_tests")], false).await
        .expect("Failed to query sites");
    assert!(sites.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_create_and_correct_ip_mask() {
    let client = live_client();

    let ip = client.create_ip_address("192.0.2.10/24").await
        .expect("Failed to create IP address");
    println!("Created IP address: {}", ip.address);

    let patch = IPAddressPatch {
        address: Some("192.0.2.10/26".to_string()),
        ..Default::default()
    };
    let updated = client.update_ip_address(ip.id, &patch).await
        .expect("Failed to update IP address");
    assert_eq!(updated.address, "192.0.2.10/26");

    let by_host = client.query_ip_addresses(&[("address", "192.0.2.10")], false).await
        .expect("Failed to query IP addresses");
    assert!(by_host.iter().any(|found| found.id == ip.id));
}
