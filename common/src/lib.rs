//! # s7map Common
//!
//! Shared building blocks used by every other workspace member:
//!
//! * [`config`]: scan configuration (timeout, parallelism).
//! * [`device`]: the discovered-device model and the result ordering.
//! * [`network`]: scan target parsing and IP range enumeration.

pub mod config;
pub mod device;
pub mod network;
