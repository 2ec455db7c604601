//! Train command handler.

use super::resolve_seed;
use crate::config;
use crate::error::CliError;
use crate::ui;
use pokergym_ai::config::TrainerConfig;
use pokergym_ai::trainer::MultiAgentTrainer;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Command-line overrides for a training run. `None` keeps the configured value.
#[derive(Debug, Default, Clone)]
pub struct TrainArgs {
    pub episodes: Option<u64>,
    pub seats: Option<usize>,
    pub seed: Option<u64>,
    pub checkpoints: Option<PathBuf>,
    pub hidden: Option<usize>,
    pub lr: Option<f64>,
    pub log_every: Option<u64>,
}

/// Runs the multi-agent trainer, prints per-seat summaries and writes one
/// checkpoint per seat when a directory is given.
pub fn handle_train_command(
    args: TrainArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?.config;
    let seed = resolve_seed(args.seed, &cfg);
    let seats = args.seats.unwrap_or(cfg.seats);
    let episodes = args.episodes.unwrap_or(cfg.episodes);
    if episodes == 0 {
        return Err(CliError::InvalidInput("episodes must be >= 1".into()));
    }

    let defaults = TrainerConfig::default();
    let trainer_config = TrainerConfig {
        table: cfg.table(seats, seed),
        episodes,
        learning_rate: args.lr.unwrap_or(cfg.learning_rate),
        hidden_dim: args.hidden.unwrap_or(cfg.hidden_dim),
        log_every: args.log_every.unwrap_or(defaults.log_every),
        checkpoint_dir: args.checkpoints.clone(),
        ..defaults
    };
    if args.checkpoints.is_none() {
        ui::display_warning(err, "no --checkpoints directory; trained weights will be discarded")?;
    }

    let mut trainer = MultiAgentTrainer::new(trainer_config)?;
    writeln!(
        out,
        "Training: {} episodes, {} seats (seed {})",
        episodes, seats, seed
    )?;
    let run = trainer.train()?;
    info!(episodes = trainer.episodes_run(), "training finished");
    ui::write_seat_summaries(out, &run.summaries)?;
    for path in &run.checkpoints {
        writeln!(out, "Saved: {}", path.display())?;
    }
    Ok(())
}
