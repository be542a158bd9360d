//! Per-address classification state machine.
//!
//! `Untested → primary probe → (nothing | candidate)`, then a candidate
//! is either an HMI (first HMI-indicative port that answers wins) or a
//! PLC, and only PLCs get the identity query. Every probe for one
//! address runs with the same timeout.

use std::net::IpAddr;

use s7map_common::config::ScanConfig;
use s7map_common::device::DiscoveredDevice;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::probe::DeviceProber;

/// Ports whose presence next to an open S7 port marks the host as an HMI
/// panel rather than a controller. Probed in exactly this order; the
/// first open one decides.
pub const HMI_PORTS: [u16; 6] = [2308, 50523, 1033, 5001, 5002, 5800];

/// Runs the full pipeline for one address.
///
/// `None` means the address yields no device: the primary port was
/// closed, or the scan was cancelled midway.
pub async fn classify_host<P: DeviceProber + ?Sized>(
    prober: &P,
    addr: IpAddr,
    cfg: &ScanConfig,
    cancel: &CancellationToken,
) -> Option<DiscoveredDevice> {
    if cancel.is_cancelled() {
        return None;
    }

    if !prober.is_open(addr, cfg.s7_port, cfg.timeout, cancel).await {
        return None;
    }
    debug!(%addr, "S7 port answered, classifying candidate");

    for port in HMI_PORTS {
        if cancel.is_cancelled() {
            return None;
        }
        if prober.is_open(addr, port, cfg.timeout, cancel).await {
            debug!(%addr, port, "HMI-indicative port open");
            return Some(DiscoveredDevice::hmi(addr));
        }
    }

    if cancel.is_cancelled() {
        return None;
    }

    let details = prober.identify(addr, cfg.s7_port, cfg.timeout, cancel).await;
    if details.is_none() {
        // A cancelled query must not masquerade as a device that refused
        // it; the placeholder is reserved for actual refusals.
        if cancel.is_cancelled() {
            return None;
        }
        debug!(%addr, "PLC confirmed but identity query yielded nothing");
    }

    Some(DiscoveredDevice::plc(addr, details))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
