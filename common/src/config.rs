use std::time::Duration;

/// Tuning knobs for a scan run.
///
/// The protocol telegrams themselves are fixed constants and are never
/// configurable; only the connection behaviour is.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Upper bound for every single connect/read attempt.
    ///
    /// This is a per-attempt budget, not a per-scan one: a dead host can
    /// never hold up the scan for longer than the worker slot it occupies.
    pub timeout: Duration,
    /// Maximum number of addresses probed concurrently.
    pub parallelism: usize,
    /// TCP port the S7 protocol is spoken on.
    ///
    /// 102 everywhere in practice; overridable for NAT setups that remap
    /// the port.
    pub s7_port: u16,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(600),
            parallelism: 64,
            s7_port: 102,
        }
    }
}

impl ScanConfig {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        if timeout_ms > 0 {
            self.timeout = Duration::from_millis(timeout_ms);
        }
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }
}
