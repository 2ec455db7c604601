use thiserror::Error;

/// Fatal misuse of the table.
///
/// Illegal betting actions are not represented here: the table absorbs them
/// with the forced all-in penalty and reports them as
/// [`crate::engine::ActionOutcome::Forced`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Seat {seat} does not exist (table has {seats} seats)")]
    InvalidSeat { seat: usize, seats: usize },
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Previous hand has not been settled")]
    HandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Board already has {0} community cards")]
    BoardComplete(usize),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}

/// Why an action was refused by the betting rules.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("seat has already acted and faces no new raise")]
    AlreadyActed,
    #[error("cannot check while owing {owed}")]
    CheckWhileOwing { owed: u32 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("raise amount must be positive")]
    NonPositiveRaise,
    #[error("no chips left to raise with")]
    NoChips,
}
