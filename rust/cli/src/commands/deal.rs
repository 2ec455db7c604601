//! Deal command handler: deals one hand and prints the table snapshot.

use super::resolve_seed;
use crate::config;
use crate::error::CliError;
use pokergym_engine::engine::Table;
use std::io::Write;
use tracing::info;

/// Deals a single hand from `seed` and writes the snapshot as pretty JSON.
/// The same seed and seat count always produce the same output.
pub fn handle_deal_command(
    seed: Option<u64>,
    seats: Option<usize>,
    out: &mut dyn Write,
    _err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?.config;
    let seed = resolve_seed(seed, &cfg);
    let seats = seats.unwrap_or(cfg.seats);
    info!(seed, seats, "dealing");

    let mut table = Table::new(cfg.table(seats, seed))?;
    table.deal()?;
    let text = serde_json::to_string_pretty(&table.snapshot())
        .map_err(|e| CliError::InvalidInput(format!("cannot render snapshot: {}", e)))?;
    writeln!(out, "{}", text)?;
    Ok(())
}
