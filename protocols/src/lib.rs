//! # s7map Protocols
//!
//! The wire-level pieces of the minimal S7 subset the scanner speaks:
//! fixed request telegrams, response validity checks, and the SZL
//! identity-telegram parser. Everything in this crate is pure; the
//! network exchange lives in `s7map-core`.

pub mod s7;
pub mod szl;
