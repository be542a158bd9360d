//! Bounded-parallel fan-out over the candidate address sequence.
//!
//! Each address runs its whole pipeline (primary probe, HMI probes,
//! optional identity query) as one unit of work; a semaphore caps how
//! many units are in flight. Completion order is arbitrary; the
//! deterministic ordering is imposed once, at the end.

use std::sync::Arc;

use s7map_common::config::ScanConfig;
use s7map_common::device::{DiscoveredDevice, compare_addresses};
use s7map_common::network::range::IpCollection;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::classify;
use crate::probe::{DeviceProber, TcpProber};

/// Scans every address in `targets` over real TCP.
pub async fn perform_scan(
    targets: IpCollection,
    cfg: &ScanConfig,
    cancel: CancellationToken,
) -> anyhow::Result<Vec<DiscoveredDevice>> {
    scan_with_prober(Arc::new(TcpProber), targets, cfg, cancel).await
}

/// Scan loop generic over the probing seam, so tests can script it.
pub async fn scan_with_prober<P>(
    prober: Arc<P>,
    targets: IpCollection,
    cfg: &ScanConfig,
    cancel: CancellationToken,
) -> anyhow::Result<Vec<DiscoveredDevice>>
where
    P: DeviceProber + 'static,
{
    let total = targets.len();
    info!(
        "probing {total} address(es), parallelism {}, timeout {:?}",
        cfg.parallelism, cfg.timeout
    );

    let semaphore = Arc::new(Semaphore::new(cfg.parallelism.max(1)));
    let mut handles = Vec::with_capacity(total);

    for addr in targets {
        let semaphore = Arc::clone(&semaphore);
        let prober = Arc::clone(&prober);
        let cancel = cancel.clone();
        let cfg = cfg.clone();

        handles.push(tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire().await else {
                return None;
            };
            if cancel.is_cancelled() {
                return None;
            }
            classify::classify_host(prober.as_ref(), addr, &cfg, &cancel).await
        }));
    }

    let mut devices: Vec<DiscoveredDevice> = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Some(device)) => devices.push(device),
            Ok(None) => {}
            // One address's worker dying must never take down the batch.
            Err(error) => warn!("address worker aborted: {error}"),
        }
    }

    devices.sort_by(|a, b| compare_addresses(&a.addr, &b.addr));
    info!("scan finished: {} device(s)", devices.len());
    Ok(devices)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
