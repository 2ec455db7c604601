//! Command handlers, one module per subcommand.
//!
//! Every handler is `handle_<name>_command(..., out, err) -> Result<(), CliError>`
//! and writes only to the streams it is given.

mod cfg;
mod deal;
mod sim;
mod train;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use sim::handle_sim_command;
pub use train::{TrainArgs, handle_train_command};

use crate::config::Config;

/// Flag, then configured seed, then a fresh random one.
pub(crate) fn resolve_seed(flag: Option<u64>, config: &Config) -> u64 {
    flag.or(config.seed).unwrap_or_else(rand::random)
}
