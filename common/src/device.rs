//! # Discovered Device Model
//!
//! The result records produced by the scan engine, and the deterministic
//! ordering imposed on them once all concurrent work has finished.

use std::cmp::Ordering;
use std::net::IpAddr;

use serde::Serialize;

/// Marker substituted for the identity fields of a PLC that answered on
/// the S7 port but refused the legacy identity query. Modern firmware
/// families (S7-1200/-1500) reset or reject the SZL telegrams, so a
/// confirmed PLC without details is reported with this string in the
/// module, system name and serial number fields.
pub const MODERN_FAMILY_MARKER: &str = "Potential S7-1200/-1500";

/// What a host answering on the S7 port turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DeviceKind {
    Plc,
    Hmi,
}

/// Identity fields extracted from the SZL telegrams of a PLC.
///
/// Each field is present only if the device actually reported it (or
/// carries [`MODERN_FAMILY_MARKER`], see [`PlcDetails::placeholder`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlcDetails {
    pub module: Option<String>,
    pub basic_hardware: Option<String>,
    pub version: Option<String>,
    pub system_name: Option<String>,
    pub module_type: Option<String>,
    pub serial_number: Option<String>,
    pub plant_identification: Option<String>,
    pub copyright: Option<String>,
}

impl PlcDetails {
    /// The fixed stand-in attached to PLCs that refused the identity query.
    pub fn placeholder() -> Self {
        Self {
            module: Some(MODERN_FAMILY_MARKER.to_string()),
            system_name: Some(MODERN_FAMILY_MARKER.to_string()),
            serial_number: Some(MODERN_FAMILY_MARKER.to_string()),
            ..Self::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.module.as_deref() == Some(MODERN_FAMILY_MARKER)
    }
}

/// One device found by the scan.
///
/// Created exactly once per address that answered on the primary port and
/// never mutated afterwards. An HMI never carries details; a PLC always
/// carries either the extracted identity or the placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiscoveredDevice {
    pub addr: IpAddr,
    pub kind: DeviceKind,
    pub details: Option<PlcDetails>,
}

impl DiscoveredDevice {
    pub fn hmi(addr: IpAddr) -> Self {
        Self {
            addr,
            kind: DeviceKind::Hmi,
            details: None,
        }
    }

    pub fn plc(addr: IpAddr, details: Option<PlcDetails>) -> Self {
        Self {
            addr,
            kind: DeviceKind::Plc,
            details: Some(details.unwrap_or_else(PlcDetails::placeholder)),
        }
    }
}

/// Total order over addresses: shorter representations first (IPv4 before
/// IPv6), then byte-by-byte left to right. Applied once after the scan so
/// the output sequence is independent of completion order.
pub fn compare_addresses(a: &IpAddr, b: &IpAddr) -> Ordering {
    match (a, b) {
        (IpAddr::V4(_), IpAddr::V6(_)) => Ordering::Less,
        (IpAddr::V6(_), IpAddr::V4(_)) => Ordering::Greater,
        (IpAddr::V4(x), IpAddr::V4(y)) => x.octets().cmp(&y.octets()),
        (IpAddr::V6(x), IpAddr::V6(y)) => x.octets().cmp(&y.octets()),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
