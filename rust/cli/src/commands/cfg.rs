//! Configuration command handler.
//!
//! Prints every setting with the place it came from:
//!
//! ```json
//! {
//!   "seats": { "value": 2, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, _err: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "seats": { "value": config.seats, "source": sources.seats },
        "seed": { "value": config.seed, "source": sources.seed },
        "episodes": { "value": config.episodes, "source": sources.episodes },
        "endowment": { "value": config.endowment, "source": sources.endowment },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "ante": { "value": config.ante, "source": sources.ante },
        "evaluator": { "value": config.evaluator, "source": sources.evaluator },
        "learning_rate": { "value": config.learning_rate, "source": sources.learning_rate },
        "hidden_dim": { "value": config.hidden_dim, "source": sources.hidden_dim },
    });
    let text = serde_json::to_string_pretty(&display)
        .map_err(|e| CliError::Config(format!("cannot render configuration: {}", e)))?;
    writeln!(out, "{}", text)?;
    Ok(())
}
