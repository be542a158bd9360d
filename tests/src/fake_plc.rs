//! # Fake PLC
//! A loopback TCP server that plays the device side of the identity
//! exchange, byte-for-byte enough for the client to parse.

use std::net::SocketAddr;

use s7map_protocols::s7::{COTP_CONNECT_CONFIRM, S7_PROTOCOL_ID, TPKT_ID};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How the scripted device behaves once a client connects.
#[derive(Clone, Copy, PartialEq)]
pub enum Behaviour {
    /// Completes the handshake and answers both identity queries.
    FullIdentity,
    /// Answers the transport connect with a telegram that is not a
    /// connect confirmation, like a non-S7 service squatting on the port.
    RejectTransport,
    /// Accepts the connection and then never sends a byte.
    Mute,
}

pub const MODULE_NAME: &str = "6ES7 315-2EH14-0AB0";
pub const HARDWARE_NAME: &str = "6ES7 315-2EH14-0AB0";
pub const SYSTEM_NAME: &str = "SIMATIC 300(1)";
pub const MODULE_TYPE: &str = "CPU 315-2 PN/DP";
pub const COPYRIGHT: &str = "Original Siemens Equipment";
pub const SERIAL_NUMBER: &str = "S C-X4U421112012";

/// Binds an ephemeral loopback port and serves connections until the
/// returned listener task is dropped with the runtime.
pub async fn spawn(behaviour: Behaviour) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let local_addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(serve_connection(stream, behaviour));
        }
    });

    local_addr
}

async fn serve_connection(mut stream: TcpStream, behaviour: Behaviour) {
    if behaviour == Behaviour::Mute {
        // Hold the socket open so the client has to run into its timeout.
        let mut sink = [0u8; 256];
        while let Ok(read) = stream.read(&mut sink).await {
            if read == 0 {
                return;
            }
        }
        return;
    }

    // Round 1: transport connect.
    if read_request(&mut stream).await.is_none() {
        return;
    }
    let confirm = match behaviour {
        Behaviour::RejectTransport => [0u8; 22],
        _ => cotp_connect_confirm(),
    };
    if stream.write_all(&confirm).await.is_err() {
        return;
    }
    if behaviour == Behaviour::RejectTransport {
        return;
    }

    // Round 2: parameter negotiation.
    if read_request(&mut stream).await.is_none() {
        return;
    }
    if stream.write_all(&setup_ack()).await.is_err() {
        return;
    }

    // Rounds 3a/3b: the client sends the module query first.
    if read_request(&mut stream).await.is_none() {
        return;
    }
    if stream.write_all(&module_telegram()).await.is_err() {
        return;
    }

    if read_request(&mut stream).await.is_none() {
        return;
    }
    let _ = stream.write_all(&component_telegram()).await;
}

async fn read_request(stream: &mut TcpStream) -> Option<usize> {
    let mut buffer = [0u8; 256];
    match stream.read(&mut buffer).await {
        Ok(0) | Err(_) => None,
        Ok(read) => Some(read),
    }
}

fn cotp_connect_confirm() -> [u8; 22] {
    let mut telegram = [0u8; 22];
    telegram[0] = TPKT_ID;
    telegram[2] = 0x00;
    telegram[3] = 0x16;
    telegram[5] = COTP_CONNECT_CONFIRM;
    telegram
}

fn setup_ack() -> [u8; 27] {
    let mut telegram = [0u8; 27];
    telegram[0] = TPKT_ID;
    telegram[3] = 0x1B;
    telegram[7] = S7_PROTOCOL_ID;
    telegram
}

fn module_telegram() -> Vec<u8> {
    let mut telegram = vec![0u8; 128];
    telegram[7] = S7_PROTOCOL_ID;
    write_str(&mut telegram, 43, MODULE_NAME);
    write_str(&mut telegram, 71, HARDWARE_NAME);
    telegram[122] = 3;
    telegram[123] = 2;
    telegram[124] = 6;
    telegram
}

fn component_telegram() -> Vec<u8> {
    let mut telegram = vec![0u8; 220];
    telegram[7] = S7_PROTOCOL_ID;
    // Unshifted header layout.
    telegram[30] = 0x1C;
    write_str(&mut telegram, 39, SYSTEM_NAME);
    write_str(&mut telegram, 73, MODULE_TYPE);
    write_str(&mut telegram, 141, COPYRIGHT);
    write_str(&mut telegram, 175, SERIAL_NUMBER);
    telegram
}

fn write_str(telegram: &mut [u8], offset: usize, value: &str) {
    telegram[offset..offset + value.len()].copy_from_slice(value.as_bytes());
}
