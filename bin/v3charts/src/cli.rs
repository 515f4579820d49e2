use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "v3charts", version, about = "Liquidity by tick for concentrated liquidity pools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a pool over RPC and chart its liquidity
    Chart {
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Pool address, defaults to the configured pool
        #[arg(long)]
        pool: Option<Address>,
        #[arg(long)]
        chain: Option<u64>,
        /// Ascending ticks, token1 price on the left
        #[arg(long)]
        token1_left: bool,
        #[arg(long)]
        json: bool,
    },
    /// Chart a pool snapshot and ticks read from a JSON file
    Offline {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        token1_left: bool,
        #[arg(long)]
        json: bool,
    },
}
