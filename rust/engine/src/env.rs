//! Reinforcement-learning façade over [`Table`].
//!
//! State vectors have a fixed width regardless of how many seats are in
//! use, zero-padded up to `max_seats`:
//!
//! ```text
//! [hole+community ranks (7)] [hole+community suits (7)] [seat id]
//! [in_hand flags (M)] [pot, seat's street bet] [all bets (M)] [all stacks (M)]
//! ```
//!
//! Chip quantities are raw chip counts.

use std::ops::Range;

use crate::engine::{ActionOutcome, Table};
use crate::errors::GameError;
use crate::game::TableConfig;
use crate::player::{ActionKind, PlayerAction};
use crate::rules::Legality;

const CARD_SLOTS: usize = 7;

/// Index arithmetic for the encoded state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateLayout {
    max_seats: usize,
}

impl StateLayout {
    pub fn new(max_seats: usize) -> Self {
        Self { max_seats }
    }

    pub fn max_seats(&self) -> usize {
        self.max_seats
    }

    pub fn width(&self) -> usize {
        2 * CARD_SLOTS + 3 + 3 * self.max_seats
    }

    pub fn ranks(&self) -> Range<usize> {
        0..CARD_SLOTS
    }
    pub fn suits(&self) -> Range<usize> {
        CARD_SLOTS..2 * CARD_SLOTS
    }
    pub fn seat_index(&self) -> usize {
        2 * CARD_SLOTS
    }
    pub fn in_hand(&self) -> Range<usize> {
        let start = self.seat_index() + 1;
        start..start + self.max_seats
    }
    pub fn pot_index(&self) -> usize {
        self.in_hand().end
    }
    pub fn street_bet_index(&self) -> usize {
        self.pot_index() + 1
    }
    pub fn bets(&self) -> Range<usize> {
        let start = self.street_bet_index() + 1;
        start..start + self.max_seats
    }
    pub fn stacks(&self) -> Range<usize> {
        let start = self.bets().end;
        start..start + self.max_seats
    }

    /// Whether slot `i` holds a chip count.
    pub fn is_chip_feature(&self, i: usize) -> bool {
        i == self.pot_index()
            || i == self.street_bet_index()
            || self.bets().contains(&i)
            || self.stacks().contains(&i)
    }

    pub fn encode(&self, table: &Table, seat: usize) -> Vec<f32> {
        let mut v = vec![0f32; self.width()];
        let mut cards = Vec::with_capacity(CARD_SLOTS);
        let me = table.seat(seat);
        if let Some(s) = me {
            cards.extend(s.hole_cards().iter().flatten().copied());
        }
        cards.extend_from_slice(table.community());
        for (i, c) in cards.iter().take(CARD_SLOTS).enumerate() {
            v[self.ranks().start + i] = f32::from(c.rank.value());
            v[self.suits().start + i] = f32::from(c.suit.value());
        }
        v[self.seat_index()] = seat as f32;
        for (i, s) in table.seats().iter().take(self.max_seats).enumerate() {
            v[self.in_hand().start + i] = if s.in_hand() { 1.0 } else { 0.0 };
            v[self.bets().start + i] = s.bets() as f32;
            v[self.stacks().start + i] = s.stack() as f32;
        }
        v[self.pot_index()] = table.pot() as f32;
        v[self.street_bet_index()] = me.map(|s| s.current_bet()).unwrap_or(0) as f32;
        v
    }

    pub fn seat_of(&self, state: &[f32]) -> usize {
        state[self.seat_index()] as usize
    }

    pub fn pot_of(&self, state: &[f32]) -> u32 {
        state[self.pot_index()] as u32
    }

    pub fn stack_of(&self, state: &[f32]) -> u32 {
        state[self.stacks().start + self.seat_of(state)] as u32
    }

    /// Chips the encoded seat must add to match the high bet.
    pub fn to_call_of(&self, state: &[f32]) -> u32 {
        let bets = &state[self.bets()];
        let high = bets.iter().copied().fold(0f32, f32::max);
        (high - bets[self.seat_of(state)]).max(0.0) as u32
    }

    /// Chips the encoded seat could put in beyond a call.
    pub fn raise_capacity_of(&self, state: &[f32]) -> u32 {
        self.stack_of(state).saturating_sub(self.to_call_of(state))
    }
}

/// Result of one [`PokerEnv::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub state: Vec<f32>,
    /// Change in the acting seat's stack.
    pub reward: i64,
    /// The hand can take no further actions.
    pub done: bool,
    pub outcome: ActionOutcome,
}

/// Reset/step/advance/showdown adapter around one exclusively owned table.
#[derive(Debug)]
pub struct PokerEnv {
    table: Table,
    layout: StateLayout,
    /// Stack plus forced bets at the start of the hand, after reloads.
    pre_hand: Vec<u32>,
}

impl PokerEnv {
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        Ok(Self::from_table(Table::new(config)?))
    }

    pub fn from_table(table: Table) -> Self {
        let layout = StateLayout::new(table.config().max_seats);
        let pre_hand = table.seats().iter().map(|s| s.stack()).collect();
        Self {
            table,
            layout,
            pre_hand,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn layout(&self) -> StateLayout {
        self.layout
    }

    pub fn num_seats(&self) -> usize {
        self.table.num_seats()
    }

    /// Deals a new hand and returns every seat's state vector. The previous
    /// hand must have been settled with [`showdown`](PokerEnv::showdown).
    pub fn reset(&mut self) -> Result<Vec<Vec<f32>>, GameError> {
        self.table.deal()?;
        self.pre_hand = self
            .table
            .seats()
            .iter()
            .map(|s| s.stack() + s.bets())
            .collect();
        Ok((0..self.num_seats()).map(|i| self.observe(i)).collect())
    }

    pub fn observe(&self, seat: usize) -> Vec<f32> {
        self.layout.encode(&self.table, seat)
    }

    pub fn step(
        &mut self,
        seat: usize,
        action: ActionKind,
        raise_amount: u32,
    ) -> Result<StepResult, GameError> {
        let before = self.table.betting_context(seat)?.stack;
        let outcome = self
            .table
            .take_action(seat, PlayerAction::from_kind(action, raise_amount))?;
        let after = self.table.betting_context(seat)?.stack;
        Ok(StepResult {
            state: self.observe(seat),
            reward: i64::from(after) - i64::from(before),
            done: self.table.is_game_over(),
            outcome,
        })
    }

    pub fn is_round_done(&mut self) -> bool {
        self.table.is_round_done()
    }

    pub fn is_done(&self) -> bool {
        self.table.is_game_over()
    }

    pub fn needs_to_act(&self, seat: usize) -> bool {
        self.table.needs_to_act(seat)
    }

    pub fn action_order(&self) -> Vec<usize> {
        self.table.action_order()
    }

    /// Moves to the next street unless the river is out or the hand is over.
    pub fn advance_round(&mut self) -> Result<bool, GameError> {
        if self.table.is_game_over() || self.table.community().len() >= 5 {
            return Ok(false);
        }
        self.table.next_round()?;
        Ok(true)
    }

    /// Settles the hand and returns each seat's final stack minus its
    /// pre-hand stack.
    pub fn showdown(&mut self) -> Result<Vec<i64>, GameError> {
        self.table.showdown()?;
        Ok(self
            .table
            .seats()
            .iter()
            .zip(&self.pre_hand)
            .map(|(s, &pre)| i64::from(s.stack()) - i64::from(pre))
            .collect())
    }

    pub fn legal_actions(&self, seat: usize) -> Legality {
        self.table.legal_actions(seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets_are_contiguous() {
        let l = StateLayout::new(4);
        assert_eq!(l.width(), 29);
        assert_eq!(l.in_hand(), 15..19);
        assert_eq!(l.pot_index(), 19);
        assert_eq!(l.street_bet_index(), 20);
        assert_eq!(l.bets(), 21..25);
        assert_eq!(l.stacks(), 25..29);
    }

    #[test]
    fn state_width_ignores_seat_count() {
        let mut two = PokerEnv::new(TableConfig::with_seats(2, 1)).unwrap();
        let mut six = PokerEnv::new(TableConfig::with_seats(6, 1)).unwrap();
        let a = two.reset().unwrap();
        let b = six.reset().unwrap();
        assert_eq!(a[0].len(), b[0].len());
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 6);
    }

    #[test]
    fn preflop_encoding_has_hole_cards_only() {
        let mut env = PokerEnv::new(TableConfig::heads_up(3)).unwrap();
        let states = env.reset().unwrap();
        let l = env.layout();
        let s = &states[1];
        assert!(s[0] >= 2.0 && s[1] >= 2.0);
        assert!(s[2..7].iter().all(|&x| x == 0.0));
        assert_eq!(l.seat_of(s), 1);
        assert_eq!(l.pot_of(s), 30);
        // padded seats stay zero
        assert!(s[l.in_hand()][2..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn decodes_call_and_raise_capacity() {
        let mut env = PokerEnv::new(TableConfig::heads_up(3)).unwrap();
        env.reset().unwrap();
        let l = env.layout();
        // seat 0 posted the small blind
        let s = env.observe(0);
        assert_eq!(l.to_call_of(&s), 10);
        assert_eq!(l.stack_of(&s), 990);
        assert_eq!(l.raise_capacity_of(&s), 980);
    }
}
