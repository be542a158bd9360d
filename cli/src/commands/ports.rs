use s7map_common::config::ScanConfig;
use s7map_core::classify::HMI_PORTS;

use crate::terminal::print;

/// Prints the fixed port set the classifier probes. Informational only:
/// the set is part of the classification contract, not configuration.
pub fn ports() {
    let cfg = ScanConfig::default();

    print::aligned_line("S7 primary", &cfg.s7_port.to_string());
    let hmi_list = HMI_PORTS
        .iter()
        .map(|port| port.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    print::aligned_line("HMI markers", &hmi_list);
}
