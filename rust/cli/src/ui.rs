//! Terminal output helpers shared by the command handlers.

use std::io::Write;

use pokergym_ai::trainer::SeatSummary;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// One aligned line per seat.
pub fn write_seat_summaries(out: &mut dyn Write, rows: &[SeatSummary]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<8} {:>10} {:>12} {:>10} {:>8}",
        "seat", "profile", "avg_raw", "avg_shaped", "total", "stack"
    )?;
    for r in rows {
        writeln!(
            out,
            "{:<5} {:<8} {:>10.2} {:>12.2} {:>10} {:>8}",
            r.seat,
            r.profile.name(),
            r.avg_raw, r.avg_shaped, r.total_raw, r.stack
        )?;
    }
    Ok(())
}
