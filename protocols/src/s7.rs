//! Fixed S7 request telegrams and response validity checks.
//!
//! These are protocol literals, not inputs: they encode one fixed set of
//! connection parameters (PG connection, rack 0, slot 2) and one fixed
//! SZL selector per query. Nothing here is configurable at runtime.

/// RFC 1006 (TPKT) protocol identifier, first byte of every telegram.
pub const TPKT_ID: u8 = 0x03;
/// COTP "connection confirm" PDU type.
pub const COTP_CONNECT_CONFIRM: u8 = 0xD0;
/// S7 protocol identifier, found at offset 7 of every S7 telegram.
pub const S7_PROTOCOL_ID: u8 = 0x32;

/// COTP connection request (ISO-on-TCP handshake), 22 bytes.
///
/// Source TSAP 0x0100, destination TSAP 0x0102 (PG connection to rack 0,
/// slot 2, the classic S7-300 addressing the identity SZLs answer on).
pub const COTP_CONNECT_REQUEST: [u8; 22] = [
    TPKT_ID, // RFC 1006 ID
    0x00, // Reserved, always 0
    0x00, 0x16, // Telegram length (22)
    0x11, // COTP header length
    0xE0, // CR - Connection Request
    0x00, 0x00, // Dst reference
    0x00, 0x01, // Src reference
    0x00, // Class + options
    0xC0, 0x01, 0x0A, // TPDU size parameter (1024)
    0xC1, 0x02, 0x01, 0x00, // Src TSAP 0x0100
    0xC2, 0x02, 0x01, 0x02, // Dst TSAP 0x0102
];

/// S7 setup-communication request (PDU negotiation), 25 bytes.
///
/// Requests one job/ack credit each and a 480-byte PDU, plenty for the
/// two identity telegrams.
pub const S7_SETUP_REQUEST: [u8; 25] = [
    TPKT_ID, 0x00, 0x00, 0x19, // TPKT, length 25
    0x02, 0xF0, 0x80, // COTP data header
    S7_PROTOCOL_ID, 0x01, // Job request
    0x00, 0x00, // Redundancy identification
    0x04, 0x00, // PDU reference
    0x00, 0x08, // Parameter length
    0x00, 0x00, // Data length
    0xF0, 0x00, // Function: setup communication
    0x00, 0x01, // Max AMQ calling
    0x00, 0x01, // Max AMQ called
    0x01, 0xE0, // PDU length 480
];

/// SZL read request for ID 0x0011 (module identification), 33 bytes.
pub const SZL_MODULE_REQUEST: [u8; 33] = szl_read_request(0x0011);

/// SZL read request for ID 0x001C (component identification), 33 bytes.
pub const SZL_COMPONENT_REQUEST: [u8; 33] = szl_read_request(0x001C);

/// Builds the fixed userdata "read SZL" telegram for one SZL ID, index 1.
/// Only the two-byte selector varies between the two queries.
const fn szl_read_request(szl_id: u16) -> [u8; 33] {
    [
        TPKT_ID, 0x00, 0x00, 0x21, // TPKT, length 33
        0x02, 0xF0, 0x80, // COTP data header
        S7_PROTOCOL_ID, 0x07, // Userdata
        0x00, 0x00, // Redundancy identification
        0x00, 0x00, // PDU reference
        0x00, 0x08, // Parameter length
        0x00, 0x08, // Data length
        0x00, 0x01, 0x12, 0x04, 0x11, 0x44, 0x01, 0x00, // CPU functions, read SZL
        0xFF, 0x09, 0x00, 0x04, // Return code, transport size, length 4
        (szl_id >> 8) as u8,
        (szl_id & 0xFF) as u8, // SZL ID
        0x00, 0x01, // SZL index
    ]
}

/// Step 1 check: the peer confirmed the transport connection.
pub fn is_connect_confirm(response: &[u8]) -> bool {
    response.len() >= COTP_CONNECT_REQUEST.len() && response[5] == COTP_CONNECT_CONFIRM
}

/// Step 2 check: the peer answered the parameter negotiation with an S7
/// telegram.
pub fn is_setup_ack(response: &[u8]) -> bool {
    response.len() >= S7_SETUP_REQUEST.len() && response[7] == S7_PROTOCOL_ID
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
