//! The **seam** between the classification logic and the network.
//!
//! Classification only ever asks two questions, "is this port open?" and
//! "what does the device say it is?", so those two operations form the
//! trait boundary. The real implementation speaks TCP; tests substitute a
//! scripted prober.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use s7map_common::device::PlcDetails;
use tokio::net::TcpStream;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::identity;

/// Probing operations the classifier depends on.
#[async_trait]
pub trait DeviceProber: Send + Sync {
    /// Attempts one fresh TCP connection to `addr:port`.
    ///
    /// Bounded by the smaller of `timeout` and the cancellation signal.
    /// Every failure mode (refused, unreachable, timed out, cancelled)
    /// folds to `false`; only a genuine connection yields `true`.
    async fn is_open(
        &self,
        addr: IpAddr,
        port: u16,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> bool;

    /// Runs the S7 identity query against `addr:port`.
    ///
    /// `None` is a normal negative outcome (device does not speak the
    /// legacy protocol, or answered with nothing usable), never an error.
    async fn identify(
        &self,
        addr: IpAddr,
        port: u16,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Option<PlcDetails>;
}

/// The real prober: plain TCP connect scans plus the S7 handshake.
pub struct TcpProber;

#[async_trait]
impl DeviceProber for TcpProber {
    async fn is_open(
        &self,
        addr: IpAddr,
        port: u16,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> bool {
        let socket_addr = SocketAddr::new(addr, port);

        let open = tokio::select! {
            _ = cancel.cancelled() => false,
            result = time::timeout(timeout, TcpStream::connect(socket_addr)) => {
                // Established connections drop (close) right here; the
                // probe never keeps sockets around.
                matches!(result, Ok(Ok(_)))
            }
        };

        trace!(%addr, port, open, "port probe");
        open
    }

    async fn identify(
        &self,
        addr: IpAddr,
        port: u16,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Option<PlcDetails> {
        tokio::select! {
            _ = cancel.cancelled() => None,
            details = identity::query_identity(addr, port, timeout) => details,
        }
    }
}
