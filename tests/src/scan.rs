//! End-to-end scans over real loopback TCP against the scripted device.

use std::net::{IpAddr, Ipv4Addr};

use s7map_common::config::ScanConfig;
use s7map_common::device::{DeviceKind, MODERN_FAMILY_MARKER};
use s7map_common::network::range::IpCollection;
use s7map_core::scanner;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::fake_plc::{self, Behaviour};

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

fn localhost_targets() -> IpCollection {
    let mut targets = IpCollection::new();
    targets.add_single(LOCALHOST);
    targets
}

fn config_for(port: u16) -> ScanConfig {
    ScanConfig {
        s7_port: port,
        ..ScanConfig::default()
    }
    .with_timeout_ms(500)
}

#[tokio::test]
async fn full_identity_device_is_reported_as_plc_with_details() {
    let addr = fake_plc::spawn(Behaviour::FullIdentity).await;

    let devices = scanner::perform_scan(
        localhost_targets(),
        &config_for(addr.port()),
        CancellationToken::new(),
    )
    .await
    .expect("scan failed");

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].addr, LOCALHOST);
    assert_eq!(devices[0].kind, DeviceKind::Plc);

    let details = devices[0].details.as_ref().expect("identity details");
    assert_eq!(details.module.as_deref(), Some(fake_plc::MODULE_NAME));
    assert_eq!(details.version.as_deref(), Some("3.2.6"));
    assert_eq!(details.system_name.as_deref(), Some(fake_plc::SYSTEM_NAME));
    assert_eq!(details.module_type.as_deref(), Some(fake_plc::MODULE_TYPE));
    assert_eq!(
        details.serial_number.as_deref(),
        Some(fake_plc::SERIAL_NUMBER)
    );
    assert_eq!(details.copyright.as_deref(), Some(fake_plc::COPYRIGHT));
    // The scripted device leaves the plant field blank.
    assert_eq!(details.plant_identification, None);
}

#[tokio::test]
async fn device_rejecting_the_handshake_gets_the_placeholder() {
    let addr = fake_plc::spawn(Behaviour::RejectTransport).await;

    let devices = scanner::perform_scan(
        localhost_targets(),
        &config_for(addr.port()),
        CancellationToken::new(),
    )
    .await
    .expect("scan failed");

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].kind, DeviceKind::Plc);

    let details = devices[0].details.as_ref().expect("placeholder details");
    assert!(details.is_placeholder());
    assert_eq!(details.module.as_deref(), Some(MODERN_FAMILY_MARKER));
}

#[tokio::test]
async fn mute_device_still_counts_as_open_port() {
    let addr = fake_plc::spawn(Behaviour::Mute).await;

    let devices = scanner::perform_scan(
        localhost_targets(),
        &config_for(addr.port()).with_timeout_ms(200),
        CancellationToken::new(),
    )
    .await
    .expect("scan failed");

    // Connect succeeds, identity times out: modern-family placeholder.
    assert_eq!(devices.len(), 1);
    assert!(devices[0].details.as_ref().is_some_and(|d| d.is_placeholder()));
}

#[tokio::test]
async fn closed_port_yields_no_devices() {
    // Bind and immediately drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let port = listener.local_addr().expect("listener address").port();
    drop(listener);

    let devices = scanner::perform_scan(
        localhost_targets(),
        &config_for(port).with_timeout_ms(200),
        CancellationToken::new(),
    )
    .await
    .expect("scan failed");

    assert!(devices.is_empty());
}

#[tokio::test]
async fn cancelled_scan_reports_nothing() {
    let addr = fake_plc::spawn(Behaviour::FullIdentity).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let devices = scanner::perform_scan(localhost_targets(), &config_for(addr.port()), cancel)
        .await
        .expect("scan failed");

    assert!(devices.is_empty());
}
