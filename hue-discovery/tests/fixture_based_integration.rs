//! Fixture-based integration tests for bridge description handling
//!
//! These tests serve captured description documents from a mock HTTP server
//! so the fetch-and-parse path runs without a bridge on the network.

mod helpers;

use std::time::Duration;

use helpers::{device_at, DescriptionFixture};
use hue_discovery::{BridgeDescription, DiscoveryError};
use mockito::Server;
use rstest::rstest;

#[rstest]
#[case("hue_bridge_2015.xml", "Philips hue bridge 2015", "Hue Bridge (192.168.1.2)")]
#[case("hue_bridge_2012.xml", "Philips hue bridge 2012", "Philips hue (10.0.0.20)")]
fn test_parse_bridge_fixture(
    #[case] fixture_file: &str,
    #[case] expected_model: &str,
    #[case] expected_name: &str,
) {
    let fixture = DescriptionFixture::load(fixture_file);
    let desc = BridgeDescription::from_xml(&fixture.xml_content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", fixture.name, e));

    assert_eq!(desc.model_name, expected_model);
    assert_eq!(desc.friendly_name, expected_name);
    assert!(desc.udn.starts_with("uuid:"));
    assert!(desc.is_hue_bridge());
}

#[test]
fn test_router_is_not_a_bridge() {
    let fixture = DescriptionFixture::load("router.xml");
    let desc = BridgeDescription::from_xml(&fixture.xml_content).expect("Failed to parse router XML");

    assert!(!desc.is_hue_bridge());
    assert_eq!(desc.serial_number, None);
}

#[test]
fn test_fetch_description_from_advertised_url() {
    let mut server = Server::new();
    let fixture = DescriptionFixture::load("hue_bridge_2015.xml");

    let mock = server
        .mock("GET", "/description.xml")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(&fixture.xml_content)
        .expect(1)
        .create();

    let device = device_at(&format!("{}/description.xml", server.url()), "127.0.0.1");
    let desc = device
        .fetch_description(Duration::from_secs(2))
        .expect("Failed to fetch description");

    assert_eq!(desc.model_number.as_deref(), Some("BSB002"));
    assert!(desc.is_hue_bridge());
    mock.assert();
}

#[test]
fn test_fetch_description_http_error() {
    let mut server = Server::new();
    let mock = server.mock("GET", "/description.xml").with_status(404).create();

    let device = device_at(&format!("{}/description.xml", server.url()), "127.0.0.1");
    let result = device.fetch_description(Duration::from_secs(2));

    assert!(matches!(result, Err(DiscoveryError::Description(_))));
    mock.assert();
}

#[test]
fn test_fetch_description_invalid_body() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/description.xml")
        .with_status(200)
        .with_body("not xml at all")
        .create();

    let device = device_at(&format!("{}/description.xml", server.url()), "127.0.0.1");
    let result = device.fetch_description(Duration::from_secs(2));

    assert!(matches!(result, Err(DiscoveryError::Description(_))));
    mock.assert();
}
