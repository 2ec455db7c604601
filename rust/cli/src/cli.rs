//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pokergym",
    version,
    about = "Texas Hold'em training table and multi-agent trainer"
)]
pub struct PokergymCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train one policy per seat with risk-shaped rewards
    Train {
        /// Episodes (hands) to play; overrides the configured value
        #[arg(long)]
        episodes: Option<u64>,
        #[arg(long)]
        seats: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Directory to write seat checkpoints into
        #[arg(long)]
        checkpoints: Option<PathBuf>,
        #[arg(long)]
        hidden: Option<usize>,
        #[arg(long)]
        lr: Option<f64>,
        /// Episodes between progress lines
        #[arg(long)]
        log_every: Option<u64>,
    },
    /// Play hands between agents and record them as JSONL
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        seats: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Agent per seat: random, neutral, averse or seeking. The last one repeats.
        #[arg(long = "agent", default_value = "random")]
        agents: Vec<String>,
        /// Directory holding trained checkpoints for profile agents
        #[arg(long)]
        checkpoints: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Deal one hand and print the table snapshot as JSON
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        seats: Option<usize>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
