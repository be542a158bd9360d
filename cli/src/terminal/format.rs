use colored::*;

use s7map_common::device::{DeviceKind, DiscoveredDevice};

type Detail = (String, ColoredString);

pub fn kind_label(kind: DeviceKind) -> ColoredString {
    match kind {
        DeviceKind::Plc => "PLC".green().bold(),
        DeviceKind::Hmi => "HMI".blue().bold(),
    }
}

/// Key/value rows for the per-device tree. Absent fields are skipped
/// entirely; placeholder identities are highlighted so the reader knows
/// the device refused the legacy query.
pub fn device_details(device: &DiscoveredDevice) -> Vec<Detail> {
    let Some(details) = &device.details else {
        return Vec::new();
    };

    let placeholder = details.is_placeholder();
    let mut rows: Vec<Detail> = Vec::new();

    let mut push = |key: &str, value: &Option<String>| {
        if let Some(value) = value {
            let colored_value: ColoredString = if placeholder {
                value.yellow()
            } else {
                value.normal()
            };
            rows.push((key.to_string(), colored_value));
        }
    };

    push("Module", &details.module);
    push("Hardware", &details.basic_hardware);
    push("Version", &details.version);
    push("System", &details.system_name);
    push("Type", &details.module_type);
    push("Serial", &details.serial_number);
    push("Plant", &details.plant_identification);
    push("Copyright", &details.copyright);

    rows
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
