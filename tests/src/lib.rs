#![cfg(test)]

mod fake_plc;
mod scan;
