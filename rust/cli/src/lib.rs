//! # pokergym CLI Library
//!
//! Command-line front end for the training table and the multi-agent trainer.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a subcommand handler and
//! returns the process exit code. All output goes to the streams passed in,
//! so tests drive it with in-memory buffers.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = pokergym_cli::run(["pokergym", "deal", "--seed", "42"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `train`: Train one policy per seat with risk-shaped rewards
//! - `sim`: Play hands between random or trained agents, optionally writing JSONL
//! - `deal`: Deal a single hand and print the table snapshot
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, PokergymCli};
use commands::{
    TrainArgs, handle_cfg_command, handle_deal_command, handle_sim_command, handle_train_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["train", "sim", "deal", "cfg"];

/// Parses `args` and runs the selected command.
///
/// Returns [`exit_code::SUCCESS`] on success. Help and version output go to
/// `out` and also succeed. Argument errors and handler failures are written
/// to `err` and return [`exit_code::ERROR`].
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match PokergymCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Train {
            episodes,
            seats,
            seed,
            checkpoints,
            hidden,
            lr,
            log_every,
        } => handle_train_command(
            TrainArgs {
                episodes,
                seats,
                seed,
                checkpoints,
                hidden,
                lr,
                log_every,
            },
            out,
            err,
        ),
        Commands::Sim {
            hands,
            seats,
            seed,
            agents,
            checkpoints,
            output,
        } => handle_sim_command(hands, seats, seed, &agents, checkpoints, output, out, err),
        Commands::Deal { seed, seats } => handle_deal_command(seed, seats, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut usage = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "pokergym: Hold'em training table")?;
        writeln!(err, "Usage: pokergym <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: pokergym --help")
    };
    let _ = usage();
    exit_code::ERROR
}
