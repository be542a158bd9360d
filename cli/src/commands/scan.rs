use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::terminal::{format, print};
use s7map_common::config::ScanConfig;
use s7map_common::device::DiscoveredDevice;
use s7map_common::network::target::{self, Target};
use s7map_core::scanner;

pub async fn scan(
    target: Target,
    cfg: &ScanConfig,
    json_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let targets = target::to_collection(target);
    info!("{} address(es) queued for probing", targets.len());

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let start_time: Instant = Instant::now();
    let devices: Vec<DiscoveredDevice> = scanner::perform_scan(targets, cfg, cancel).await?;

    scan_ends(&devices, start_time.elapsed());

    if let Some(path) = json_path {
        export_json(&devices, &path)?;
    }
    Ok(())
}

/// First Ctrl-C cancels the token: in-flight probes abort, queued
/// addresses are skipped, and whatever already completed is still
/// reported.
fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("cancellation requested, returning completed results");
            cancel.cancel();
        }
    });
}

fn scan_ends(devices: &[DiscoveredDevice], total_time: Duration) {
    if devices.is_empty() {
        print::header("ZERO DEVICES DETECTED");
        print::no_results();
        return;
    }

    print::header("S7 Device Discovery");
    for (idx, device) in devices.iter().enumerate() {
        print_device_tree(device, idx);
        if idx + 1 != devices.len() {
            println!();
        }
    }
    print_summary(devices.len(), total_time);
}

fn print_summary(device_count: usize, total_time: Duration) {
    let found: ColoredString = format!("{device_count} device(s)").bold().green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    print::fat_separator();
    println!("Discovery complete: {found} identified in {elapsed}");
}

fn print_device_tree(device: &DiscoveredDevice, idx: usize) {
    print::tree_head(idx, &device.addr.to_string(), format::kind_label(device.kind));
    print::as_tree_one_level(format::device_details(device));
}

fn export_json(devices: &[DiscoveredDevice], path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(devices)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing results to {}", path.display()))?;
    info!("results written to {}", path.display());
    Ok(())
}
