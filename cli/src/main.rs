mod commands;
mod terminal;

use commands::{CommandLine, Commands, ports, scan};
use s7map_common::config::ScanConfig;
use terminal::print;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init_logging();

    match commands.command {
        Commands::Scan {
            target,
            timeout_ms,
            parallel,
            json,
        } => {
            print::header("getting ready to scan");
            let cfg = ScanConfig::default()
                .with_timeout_ms(timeout_ms)
                .with_parallelism(parallel);
            scan::scan(target, &cfg, json).await
        }
        Commands::Ports => {
            print::header("probe port set");
            ports::ports();
            Ok(())
        }
    }
}
