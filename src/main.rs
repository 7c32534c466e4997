use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use spf_router::{RoutingPolicy, TopologyFile, report};

#[derive(Parser)]
#[command(name = "spf-router", about = "Shortest router paths between host pairs")]
struct Cli {
    /// Topology file with "routers" and "src-dest"
    topology: PathBuf,

    /// Prefix length under which two routers need no path between them
    #[arg(
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(u8).range(0..=32),
        conflicts_with = "no_short_circuit"
    )]
    short_circuit_prefix: u8,

    /// Always run the path search, even inside a shared subnet
    #[arg(long)]
    no_short_circuit: bool,

    /// Do not check that every neighbor is a known router
    #[arg(long)]
    skip_validation: bool,

    /// Print one JSON object per pair
    #[arg(long)]
    json: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let topology = TopologyFile::load(&cli.topology)?;
    if !cli.skip_validation {
        topology
            .routers
            .validate()
            .context("topology failed validation")?;
    }

    let policy = RoutingPolicy {
        short_circuit_prefix: (!cli.no_short_circuit).then_some(cli.short_circuit_prefix),
    };
    info!(
        "Routing {} pairs over {} routers",
        topology.src_dest.len(),
        topology.routers.len()
    );

    for line in report::route_all(&topology, &policy, cli.json)? {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_circuit_prefix_range() {
        let cli = Cli::try_parse_from(["spf-router", "t.json", "--short-circuit-prefix", "16"]).unwrap();
        assert_eq!(cli.short_circuit_prefix, 16);

        assert!(Cli::try_parse_from(["spf-router", "t.json", "--short-circuit-prefix", "40"]).is_err());
        assert!(
            Cli::try_parse_from(["spf-router", "t.json", "--short-circuit-prefix", "8", "--no-short-circuit"]).is_err()
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["spf-router", "t.json"]).unwrap();
        assert_eq!(cli.short_circuit_prefix, 24);
        assert!(!cli.no_short_circuit && !cli.json && !cli.skip_validation);
    }
}
