//! Simulation command handler.
//!
//! Seats one agent per seat (`random` or a trained risk profile), plays the
//! requested number of hands on a single table and optionally records every
//! settled hand as a JSONL line.

use super::resolve_seed;
use crate::config;
use crate::error::CliError;
use pokergym_ai::config::TrainerConfig;
use pokergym_ai::episode::play_hand;
use pokergym_ai::{Agent, create_agent};
use pokergym_engine::env::PokerEnv;
use pokergym_engine::logger::HandLogger;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Agent sampling uses its own stream so the deck sequence depends on the seed alone.
const AGENT_STREAM: u64 = 0xA6E7_5EED;

/// Plays `hands` hands and prints each seat's result.
///
/// `agents[i]` seats seat `i`; when there are fewer names than seats the last
/// name fills the rest. Profile agents load from `checkpoints` when given.
#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    hands: u64,
    seats: Option<usize>,
    seed: Option<u64>,
    agents: &[String],
    checkpoints: Option<PathBuf>,
    output: Option<PathBuf>,
    out: &mut dyn Write,
    _err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load_with_sources()?.config;
    let seed = resolve_seed(seed, &cfg);
    let seats = seats.unwrap_or(cfg.seats);

    let table = cfg.table(seats, seed);
    table.validate()?;
    let settings = TrainerConfig {
        table: table.clone(),
        hidden_dim: cfg.hidden_dim,
        ..TrainerConfig::default()
    }
    .agent_settings();

    let Some(last) = agents.last() else {
        return Err(CliError::InvalidInput("at least one --agent is required".into()));
    };
    let mut roster: Vec<Box<dyn Agent>> = Vec::with_capacity(seats);
    for i in 0..seats {
        let kind = agents.get(i).unwrap_or(last);
        roster.push(create_agent(kind, settings, checkpoints.as_deref())?);
    }

    let mut logger = match output.as_ref() {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    info!(seed, seats, hands, "simulation starting");
    let mut env = PokerEnv::new(table)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed ^ AGENT_STREAM);
    for _ in 0..hands {
        play_hand(&mut env, |seat, state, legal| {
            roster[seat].act(state, legal, &mut rng)
        })?;
        if let (Some(logger), Some(record)) = (logger.as_mut(), env.table().last_record()) {
            logger.write(record)?;
        }
    }
    if let Some(logger) = logger.as_mut() {
        logger.flush()?;
    }

    writeln!(out, "Simulated: {} hands (seed {})", hands, seed)?;
    for (seat, agent) in env.table().seats().iter().zip(&roster) {
        writeln!(
            out,
            "seat {}: {:<8} net {:>8} stack {:>6} reloads {}",
            seat.id(),
            agent.name(),
            seat.net(),
            seat.stack(),
            seat.reloads()
        )?;
    }
    if let Some(path) = output {
        writeln!(out, "Hands written to {}", path.display())?;
    }
    Ok(())
}
