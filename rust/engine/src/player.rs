use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Discrete action type, indexed the way the policy network emits logits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Fold = 0,
    Check = 1,
    Call = 2,
    Raise = 3,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Raise,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<ActionKind> {
        Self::ALL.get(i).copied()
    }
}

/// Represents a player action during a betting round.
/// `Raise(n)` raises by `n` chips above the current high bet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if nothing is owed)
    Check,
    /// Call the current high bet
    Call,
    /// Raise above the current high bet by the given amount
    Raise(u32),
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
        }
    }

    /// Builds an action from its discrete kind; the amount only matters for raises.
    pub fn from_kind(kind: ActionKind, raise_amount: u32) -> Self {
        match kind {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Raise => PlayerAction::Raise(raise_amount),
        }
    }
}

/// One table position: stack, hole cards and per-street betting flags.
///
/// Stacks, net profit and the reload ledger persist across hands; everything
/// else is reset by [`Seat::reset_for_hand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    id: usize,
    hole: [Option<Card>; 2],
    /// Chips behind.
    money: u32,
    /// Chips committed this hand.
    bets: u32,
    /// Chips committed this street.
    current_bet: u32,
    in_hand: bool,
    can_act: bool,
    played: bool,
    net: i64,
    reloads: u64,
}

impl Seat {
    pub fn new(id: usize, stack: u32) -> Self {
        Self {
            id,
            hole: [None, None],
            money: stack,
            bets: 0,
            current_bet: 0,
            in_hand: false,
            can_act: false,
            played: false,
            net: 0,
            reloads: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn stack(&self) -> u32 {
        self.money
    }
    pub fn bets(&self) -> u32 {
        self.bets
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn in_hand(&self) -> bool {
        self.in_hand
    }
    pub fn can_act(&self) -> bool {
        self.can_act
    }
    pub fn played(&self) -> bool {
        self.played
    }
    pub fn net(&self) -> i64 {
        self.net
    }
    /// Total chips injected by reloads since the table was created.
    pub fn reloads(&self) -> u64 {
        self.reloads
    }

    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }

    pub(crate) fn set_hole(&mut self, cards: [Card; 2]) {
        self.hole = [Some(cards[0]), Some(cards[1])];
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole = [None, None];
        self.bets = 0;
        self.current_bet = 0;
        self.in_hand = true;
        self.can_act = self.money > 0;
        self.played = false;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.played = false;
    }

    /// Tops the stack up to `endowment`, returning the chips added.
    pub(crate) fn reload(&mut self, endowment: u32) -> u32 {
        let added = endowment.saturating_sub(self.money);
        self.money += added;
        self.reloads += u64::from(added);
        added
    }

    /// Moves up to `amount` chips from the stack into the pot and returns
    /// what was actually moved. An emptied stack can no longer act.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.money);
        self.money -= moved;
        self.bets += moved;
        self.current_bet += moved;
        if self.money == 0 {
            self.can_act = false;
        }
        moved
    }

    pub(crate) fn fold(&mut self) {
        self.in_hand = false;
        self.can_act = false;
        self.played = true;
    }

    pub(crate) fn set_played(&mut self, played: bool) {
        self.played = played;
    }

    pub(crate) fn disable(&mut self) {
        self.can_act = false;
    }

    pub(crate) fn settle(&mut self, won: u32) {
        self.money += won;
        self.net += i64::from(won) - i64::from(self.bets);
    }
}
