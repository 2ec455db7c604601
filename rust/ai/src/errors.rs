use std::path::PathBuf;

use pokergym_engine::errors::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No checkpoint for profile '{profile}' in {}", dir.display())]
    MissingCheckpoint { profile: String, dir: PathBuf },
    #[error("Unknown agent kind: {0}")]
    UnknownAgent(String),
    #[error("No legal action available")]
    NoLegalAction,
    #[error("Sampling failed: {0}")]
    Sampling(String),
    #[error("Street in hand {hand} still open after {passes} passes")]
    StreetStalled { hand: u64, passes: u64 },
    #[error("Invalid trainer configuration: {0}")]
    InvalidConfig(String),
}
