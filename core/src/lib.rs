//! # s7map Core
//!
//! The discovery and classification engine:
//!
//! * [`probe`]: the port-probe seam and its TCP implementation.
//! * [`identity`]: the fixed three-round S7 handshake that extracts PLC
//!   identity fields.
//! * [`classify`]: the per-address state machine (no device / HMI / PLC).
//! * [`scanner`]: bounded-parallel fan-out over the address sequence.
//!
//! The engine performs no I/O besides network probing; presentation and
//! target parsing live in the neighbouring crates.

pub mod classify;
pub mod identity;
pub mod probe;
pub mod scanner;
