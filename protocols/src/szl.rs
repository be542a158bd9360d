//! Decoding of the two SZL identity response telegrams.
//!
//! Both decoders are pure and total: a null, short or otherwise malformed
//! buffer yields all-empty fields, never an error. Field positions are
//! fixed byte offsets into the raw telegram; strings are NUL-terminated
//! ASCII.

use tracing::trace;

use crate::s7::S7_PROTOCOL_ID;

/// Shortest module-identification telegram that carries all three fields
/// (the version bytes sit at offsets 122..=124).
const MODULE_TELEGRAM_MIN: usize = 125;

/// Declared minimum for the component-identification telegram.
///
/// Deliberately looser than the last field offset (175 + shift): real
/// devices answer with partial telegrams, and the per-field bounds guard
/// in [`string_at`] turns missing tails into empty fields instead of
/// rejecting the whole answer. Tightening this check would silently
/// change which devices report partial data.
const COMPONENT_TELEGRAM_MIN: usize = 40;

/// Fields decoded from SZL 0x0011 (module identification).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModuleIdentity {
    pub module: String,
    pub basic_hardware: String,
    pub version: String,
}

/// Fields decoded from SZL 0x001C (component identification).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ComponentIdentity {
    pub system_name: String,
    pub module_type: String,
    pub plant_identification: String,
    pub copyright: String,
    pub serial_number: String,
}

/// Decodes the module-identification telegram.
///
/// Requires at least [`MODULE_TELEGRAM_MIN`] bytes and the S7 protocol id
/// at offset 7; anything else decodes to all-empty fields.
pub fn parse_module_identity(buffer: &[u8]) -> ModuleIdentity {
    if buffer.len() < MODULE_TELEGRAM_MIN || buffer[7] != S7_PROTOCOL_ID {
        trace!(len = buffer.len(), "module identity telegram rejected");
        return ModuleIdentity::default();
    }

    ModuleIdentity {
        module: string_at(buffer, 43),
        basic_hardware: string_at(buffer, 71),
        version: format!("{}.{}.{}", buffer[122], buffer[123], buffer[124]),
    }
}

/// Decodes the component-identification telegram.
///
/// Some firmware inserts a four-byte segment ahead of the field block;
/// byte 30 equalling 0x1C marks the short header. All field offsets shift
/// together.
pub fn parse_component_identity(buffer: &[u8]) -> ComponentIdentity {
    if buffer.len() < COMPONENT_TELEGRAM_MIN || buffer[7] != S7_PROTOCOL_ID {
        trace!(len = buffer.len(), "component identity telegram rejected");
        return ComponentIdentity::default();
    }

    let shift: usize = if buffer[30] == 0x1C { 0 } else { 4 };

    ComponentIdentity {
        system_name: string_at(buffer, 39 + shift),
        module_type: string_at(buffer, 73 + shift),
        plant_identification: string_at(buffer, 107 + shift),
        copyright: string_at(buffer, 141 + shift),
        serial_number: string_at(buffer, 175 + shift),
    }
}

/// NUL-terminated ASCII string extraction shared by both telegrams.
///
/// Scans from `offset` to the first zero byte or the end of the buffer,
/// whichever comes first, and trims surrounding whitespace. An offset at
/// or past the end yields an empty string; this guard is what keeps the
/// loose length check on the second telegram safe.
fn string_at(buffer: &[u8], offset: usize) -> String {
    if offset >= buffer.len() {
        return String::new();
    }

    let segment = buffer[offset..]
        .iter()
        .take_while(|&&byte| byte != 0)
        .map(|&byte| byte as char)
        .collect::<String>();

    segment.trim().to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
