pub mod ports;
pub mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use s7map_common::network::target::Target;

#[derive(Parser)]
#[command(name = "s7map")]
#[command(about = "Finds Siemens S7 controllers and HMI panels on a network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan one or more targets for S7 devices
    #[command(alias = "s")]
    Scan {
        /// Host, range (a.b.c.d-e), CIDR block, or comma-separated list
        target: Target,
        /// Budget for every single connection attempt, in milliseconds
        #[arg(long, default_value_t = 600)]
        timeout_ms: u64,
        /// How many addresses are probed concurrently
        #[arg(long, default_value_t = 64)]
        parallel: usize,
        /// Also write the ordered result list to a JSON file
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },
    /// Show the fixed port set used for classification
    #[command(alias = "p")]
    Ports,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
