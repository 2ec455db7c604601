use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::hand::EvaluatorKind;

/// Upper bound so two hole cards per seat plus burns and board fit in one deck.
pub const MAX_TABLE_SEATS: usize = 22;

/// Betting phase of a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Pot distributed
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Community cards revealed when entering this street.
    pub fn reveal_count(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// Static table parameters. Stacks start at `endowment` and seats that cannot
/// cover their forced bets are reloaded back up to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub num_seats: usize,
    /// Width the state vector is padded to.
    pub max_seats: usize,
    pub endowment: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub ante: u32,
    pub seed: u64,
    pub evaluator: EvaluatorKind,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_seats: 2,
            max_seats: 9,
            endowment: 1000,
            small_blind: 10,
            big_blind: 20,
            ante: 0,
            seed: 0xA1A2_A3A4,
            evaluator: EvaluatorKind::Legacy,
        }
    }
}

impl TableConfig {
    pub fn heads_up(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_seats(num_seats: usize, seed: u64) -> Self {
        Self {
            num_seats,
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_seats < 2 {
            return Err(GameError::InvalidConfig(
                "num_seats must be >= 2".into(),
            ));
        }
        if self.num_seats > MAX_TABLE_SEATS {
            return Err(GameError::InvalidConfig(format!(
                "num_seats must be <= {}",
                MAX_TABLE_SEATS
            )));
        }
        if self.num_seats > self.max_seats {
            return Err(GameError::InvalidConfig(
                "num_seats must not exceed max_seats".into(),
            ));
        }
        if self.endowment == 0 {
            return Err(GameError::InvalidConfig("endowment must be >0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(
                "big_blind must be >= small_blind".into(),
            ));
        }
        Ok(())
    }

    /// Forced chips a seat owes at the start of a hand.
    pub(crate) fn forced_bet(&self, seat: usize, positions: &Positions) -> u32 {
        let blind = if seat == positions.small_blind {
            self.small_blind
        } else if seat == positions.big_blind {
            self.big_blind
        } else {
            0
        };
        blind + self.ante
    }
}

/// Dealer and blind seats for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions {
    pub dealer: usize,
    pub small_blind: usize,
    pub big_blind: usize,
}

impl Positions {
    /// Heads-up the dealer posts the small blind; otherwise the blinds are
    /// the two seats left of the dealer.
    pub fn for_dealer(dealer: usize, seats: usize) -> Self {
        if seats == 2 {
            Self {
                dealer,
                small_blind: dealer,
                big_blind: (dealer + 1) % seats,
            }
        } else {
            Self {
                dealer,
                small_blind: (dealer + 1) % seats,
                big_blind: (dealer + 2) % seats,
            }
        }
    }

    /// First seat to act on `street`.
    pub fn first_to_act(&self, street: Street, seats: usize) -> usize {
        match street {
            Street::Preflop => (self.big_blind + 1) % seats,
            _ => (self.dealer + 1) % seats,
        }
    }
}
