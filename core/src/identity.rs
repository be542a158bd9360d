//! The fixed three-round S7 exchange that extracts PLC identity fields.
//!
//! One TCP connection, three round trips: transport connect (COTP), S7
//! parameter negotiation, then the two SZL identity queries. The first
//! two rounds failing aborts the whole exchange, since plenty of devices
//! simply do not speak this dialect, which is a normal outcome, not an
//! error. The SZL rounds are independent of each other: a failed round
//! only leaves that telegram's fields empty.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use s7map_common::device::PlcDetails;
use s7map_protocols::s7;
use s7map_protocols::szl::{self, ComponentIdentity, ModuleIdentity};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;
use tracing::debug;

/// Large enough for the biggest identity telegram with room to spare.
const RESPONSE_BUFFER_LEN: usize = 1024;

/// Performs the full identity exchange against one device.
///
/// Returns `None` when the handshake is rejected, any I/O fails, or both
/// SZL telegrams produced no usable fields; the caller substitutes the
/// modern-family placeholder in that case.
pub async fn query_identity(addr: IpAddr, port: u16, timeout: Duration) -> Option<PlcDetails> {
    let socket_addr = SocketAddr::new(addr, port);
    let mut stream = time::timeout(timeout, TcpStream::connect(socket_addr))
        .await
        .ok()?
        .ok()?;
    let _ = stream.set_nodelay(true);

    let response = exchange(&mut stream, &s7::COTP_CONNECT_REQUEST, timeout).await?;
    if !s7::is_connect_confirm(&response) {
        debug!(%addr, "transport connect not confirmed");
        return None;
    }

    let response = exchange(&mut stream, &s7::S7_SETUP_REQUEST, timeout).await?;
    if !s7::is_setup_ack(&response) {
        debug!(%addr, "parameter negotiation rejected");
        return None;
    }

    let module = match exchange(&mut stream, &s7::SZL_MODULE_REQUEST, timeout).await {
        Some(buffer) => szl::parse_module_identity(&buffer),
        None => ModuleIdentity::default(),
    };

    let component = match exchange(&mut stream, &s7::SZL_COMPONENT_REQUEST, timeout).await {
        Some(buffer) => szl::parse_component_identity(&buffer),
        None => ComponentIdentity::default(),
    };

    merge_details(module, component)
}

/// One request/response round: write the telegram fully, then take
/// whatever single read the device answers with, bounded by `timeout`.
async fn exchange(
    stream: &mut TcpStream,
    request: &[u8],
    timeout: Duration,
) -> Option<Vec<u8>> {
    stream.write_all(request).await.ok()?;

    let mut buffer = vec![0u8; RESPONSE_BUFFER_LEN];
    let read = time::timeout(timeout, stream.read(&mut buffer))
        .await
        .ok()?
        .ok()?;
    if read == 0 {
        return None;
    }

    buffer.truncate(read);
    Some(buffer)
}

/// Aggregates the two telegrams into the detail record.
///
/// If the module name, serial number and system name are all empty the
/// whole record is withheld: that combination is the signature of a
/// modern controller family refusing the legacy query sequence.
fn merge_details(module: ModuleIdentity, component: ComponentIdentity) -> Option<PlcDetails> {
    if module.module.is_empty()
        && component.serial_number.is_empty()
        && component.system_name.is_empty()
    {
        return None;
    }

    Some(PlcDetails {
        module: non_empty(module.module),
        basic_hardware: non_empty(module.basic_hardware),
        version: non_empty(module.version),
        system_name: non_empty(component.system_name),
        module_type: non_empty(component.module_type),
        serial_number: non_empty(component.serial_number),
        plant_identification: non_empty(component.plant_identification),
        copyright: non_empty(component.copyright),
    })
}

/// Empty strings mean "no data" inside the parser; at this layer they
/// become outright absent fields.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
