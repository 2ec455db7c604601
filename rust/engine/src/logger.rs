use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::player::PlayerAction;
use crate::pot::SidePot;

/// Records a single applied action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action as submitted
    pub action: PlayerAction,
    /// Chips actually moved into the pot
    pub chips: u32,
    /// Set when the submitted action was illegal and replaced by a forced all-in
    #[serde(default)]
    pub forced: bool,
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Winner of each pot, in pot order
    pub winners: Vec<usize>,
    /// Packed legacy score per seat, `None` for folded seats
    pub scores: Vec<Option<u32>>,
}

/// Complete record of one settled hand.
/// Serialized to JSONL format for hand history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: SEED-NNNNNN)
    pub hand_id: String,
    /// RNG seed of the table that dealt the hand
    pub seed: u64,
    pub dealer: usize,
    /// Chronological list of all applied actions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    pub contributions: Vec<u32>,
    pub pots: Vec<SidePot>,
    pub payouts: Vec<u32>,
    /// Chips injected by reloads before this hand's forced bets
    pub reloads: Vec<u32>,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    /// Per-seat profit for this hand.
    pub fn net(&self) -> Vec<i64> {
        self.payouts
            .iter()
            .zip(&self.contributions)
            .map(|(&won, &paid)| i64::from(won) - i64::from(paid))
            .collect()
    }
}

pub fn format_hand_id(seed: u64, seq: u64) -> String {
    format!("{:016x}-{:06}", seed, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends hand records to a JSONL file.
pub struct HandLogger {
    writer: BufWriter<File>,
    written: u64,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
            written: 0,
        })
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for HandLogger {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
