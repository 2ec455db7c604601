use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{GameError, IllegalAction};
use crate::game::{Positions, Street, TableConfig};
use crate::hand::{HandEvaluator, HandScore};
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo, format_hand_id};
use crate::player::{PlayerAction, Seat};
use crate::pot::{PotManager, SidePot};
use crate::rules::{BettingContext, Legality, ValidatedAction, legal_actions, validate_action};

/// What [`Table::take_action`] did with a submitted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was legal and applied as submitted.
    Applied { chips: u32 },
    /// The action was illegal; the seat was pushed all-in and removed from
    /// further prompts instead. It stays eligible for the pots it paid into.
    Forced { chips: u32, reason: IllegalAction },
}

impl ActionOutcome {
    pub fn chips(&self) -> u32 {
        match self {
            ActionOutcome::Applied { chips } | ActionOutcome::Forced { chips, .. } => *chips,
        }
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, ActionOutcome::Forced { .. })
    }
}

/// Result of distributing the pot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownResult {
    pub pots: Vec<SidePot>,
    /// Winner of each pot, in pot order.
    pub winners: Vec<usize>,
    pub payouts: Vec<u32>,
    /// `None` for folded seats.
    pub scores: Vec<Option<HandScore>>,
    /// Per-seat profit for the hand.
    pub net: Vec<i64>,
}

/// Public per-seat state, as exposed to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub id: usize,
    pub stack: u32,
    pub bets: u32,
    pub current_bet: u32,
    pub in_hand: bool,
    pub can_act: bool,
    pub played: bool,
    pub net: i64,
    pub hole: Vec<Card>,
}

/// Serializable view of the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub hand: u64,
    pub street: Street,
    pub positions: Positions,
    pub pot: u32,
    pub high_bet: u32,
    pub community: Vec<Card>,
    pub game_over: bool,
    pub seats: Vec<SeatSnapshot>,
}

/// Betting-round state machine for one table.
///
/// The table owns its seats, its deck and the deck's RNG; stacks, net profit
/// and the dealer button persist across hands. A hand runs
/// [`deal`](Table::deal) → ([`take_action`](Table::take_action) until
/// [`is_round_done`](Table::is_round_done) → [`next_round`](Table::next_round))*
/// → [`showdown`](Table::showdown), leaving early whenever
/// [`is_game_over`](Table::is_game_over) turns true.
///
/// # Examples
///
/// ```
/// use pokergym_engine::engine::Table;
/// use pokergym_engine::game::TableConfig;
/// use pokergym_engine::player::PlayerAction;
///
/// let mut table = Table::new(TableConfig::heads_up(7)).unwrap();
/// table.deal().unwrap();
/// assert_eq!(table.pot(), 30);
///
/// // Heads-up the dealer (seat 0 on the first hand) posts the small blind.
/// table.take_action(0, PlayerAction::Call).unwrap();
/// table.take_action(1, PlayerAction::Check).unwrap();
/// assert!(table.is_round_done());
/// table.next_round().unwrap();
/// assert_eq!(table.community().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    evaluator: &'static dyn HandEvaluator,
    deck: Deck,
    seats: Vec<Seat>,
    community: Vec<Card>,
    pot: u32,
    dealer: usize,
    positions: Positions,
    street: Street,
    game_over: bool,
    /// Dealt and not yet settled.
    hand_active: bool,
    /// Current street already reported closed by `is_round_done`.
    street_closed: bool,
    hands_dealt: u64,
    actions: Vec<ActionRecord>,
    hand_reloads: Vec<u32>,
    last_record: Option<HandRecord>,
}

impl Table {
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        let stacks = vec![config.endowment; config.num_seats];
        Self::with_stacks(config, &stacks)
    }

    /// Builds a table whose seats start from the given stacks instead of the
    /// endowment.
    pub fn with_stacks(config: TableConfig, stacks: &[u32]) -> Result<Self, GameError> {
        config.validate()?;
        if stacks.len() != config.num_seats {
            return Err(GameError::InvalidConfig(format!(
                "expected {} stacks, got {}",
                config.num_seats,
                stacks.len()
            )));
        }
        let n = config.num_seats;
        // first deal rotates the button onto seat 0
        let dealer = n - 1;
        Ok(Self {
            evaluator: config.evaluator.evaluator(),
            deck: Deck::new_with_seed(config.seed),
            seats: stacks
                .iter()
                .enumerate()
                .map(|(i, &s)| Seat::new(i, s))
                .collect(),
            community: Vec::with_capacity(5),
            pot: 0,
            dealer,
            positions: Positions::for_dealer(dealer, n),
            street: Street::Preflop,
            game_over: true,
            hand_active: false,
            street_closed: false,
            hands_dealt: 0,
            actions: Vec::new(),
            hand_reloads: vec![0; n],
            last_record: None,
            config,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, seat: usize) -> Option<&Seat> {
        self.seats.get(seat)
    }

    pub fn num_seats(&self) -> usize {
        self.seats.len()
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn positions(&self) -> Positions {
        self.positions
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn hand_active(&self) -> bool {
        self.hand_active
    }

    pub fn hands_dealt(&self) -> u64 {
        self.hands_dealt
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn burned(&self) -> &[Card] {
        self.deck.burned()
    }

    pub fn evaluator(&self) -> &'static dyn HandEvaluator {
        self.evaluator
    }

    /// Record of the most recently settled hand.
    pub fn last_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }

    /// Highest hand commitment at the table.
    pub fn high_bet(&self) -> u32 {
        self.seats.iter().map(Seat::bets).max().unwrap_or(0)
    }

    pub fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| s.in_hand()).count()
    }

    /// Seat is in the hand, has chips, and has not acted since the last raise.
    pub fn needs_to_act(&self, seat: usize) -> bool {
        self.hand_active
            && !self.game_over
            && self
                .seats
                .get(seat)
                .is_some_and(|s| s.can_act() && !s.played())
    }

    /// Seats in acting order for the current street.
    pub fn action_order(&self) -> Vec<usize> {
        let n = self.seats.len();
        let first = self.positions.first_to_act(self.street, n);
        (0..n).map(|i| (first + i) % n).collect()
    }

    pub fn betting_context(&self, seat: usize) -> Result<BettingContext, GameError> {
        let s = self.seat_ref(seat)?;
        Ok(BettingContext {
            stack: s.stack(),
            committed: s.bets(),
            high_bet: self.high_bet(),
            played: s.played(),
        })
    }

    /// Actions `take_action` would accept from `seat` without penalty.
    pub fn legal_actions(&self, seat: usize) -> Legality {
        match self.seats.get(seat) {
            Some(s) if self.hand_active && !self.game_over && s.in_hand() => {
                let ctx = BettingContext {
                    stack: s.stack(),
                    committed: s.bets(),
                    high_bet: self.high_bet(),
                    played: s.played(),
                };
                legal_actions(&ctx)
            }
            _ => Legality::none(),
        }
    }

    /// Starts a new hand: rotates the button, reloads seats that cannot cover
    /// their forced bets, shuffles, deals hole cards and posts antes and blinds.
    ///
    /// Refused while the previous hand is still unsettled; call
    /// [`showdown`](Table::showdown) first.
    pub fn deal(&mut self) -> Result<(), GameError> {
        if self.hand_active {
            return Err(GameError::HandInProgress);
        }
        let n = self.seats.len();
        self.deck.shuffle();
        self.dealer = (self.dealer + 1) % n;
        self.positions = Positions::for_dealer(self.dealer, n);
        self.community.clear();
        self.pot = 0;
        self.actions.clear();
        self.street = Street::Preflop;
        self.game_over = false;
        self.hand_active = true;
        self.street_closed = false;
        self.hands_dealt += 1;

        for i in 0..n {
            let forced = self.config.forced_bet(i, &self.positions);
            let seat = &mut self.seats[i];
            let added = if seat.stack() == 0 || seat.stack() < forced {
                seat.reload(self.config.endowment)
            } else {
                0
            };
            if added > 0 {
                info!(hand = self.hands_dealt, seat = i, added, "reload");
            }
            self.hand_reloads[i] = added;
            seat.reset_for_hand();
        }

        // one card per seat per pass
        let mut holes = Vec::with_capacity(n);
        for _ in 0..n {
            let a = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
            holes.push(a);
        }
        for (i, first) in holes.into_iter().enumerate() {
            let second = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
            self.seats[i].set_hole([first, second]);
        }

        if self.config.ante > 0 {
            for i in 0..n {
                self.pot += self.seats[i].commit(self.config.ante);
            }
        }
        let Positions {
            small_blind,
            big_blind,
            ..
        } = self.positions;
        self.pot += self.seats[small_blind].commit(self.config.small_blind);
        self.pot += self.seats[big_blind].commit(self.config.big_blind);

        debug!(
            hand = self.hands_dealt,
            dealer = self.dealer,
            pot = self.pot,
            "dealt"
        );
        Ok(())
    }

    /// Reveals the next street's community cards after burning one.
    pub fn next_round(&mut self) -> Result<Street, GameError> {
        if !self.hand_active {
            return Err(GameError::NoHandInProgress);
        }
        if self.game_over {
            return Err(GameError::HandAlreadyComplete);
        }
        if self.community.len() >= 5 {
            return Err(GameError::BoardComplete(self.community.len()));
        }
        let next = self.street.next();
        self.deck.burn_card().ok_or(GameError::DeckExhausted)?;
        for _ in 0..next.reveal_count() {
            let c = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
            self.community.push(c);
        }
        self.street = next;
        self.reset_street();
        debug!(hand = self.hands_dealt, street = ?next, "street");
        Ok(next)
    }

    /// Applies one action for `seat`.
    ///
    /// Illegal actions are absorbed: the seat goes all-in, `can_act` drops to
    /// false and [`ActionOutcome::Forced`] is returned. Errors are reserved for
    /// misuse (unknown seat, folded seat, no hand running).
    pub fn take_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<ActionOutcome, GameError> {
        self.seat_ref(seat)?;
        if !self.hand_active {
            return Err(GameError::NoHandInProgress);
        }
        if self.game_over {
            return Err(GameError::HandAlreadyComplete);
        }
        if !self.seats[seat].in_hand() {
            return Err(GameError::PlayerAlreadyFolded);
        }

        let ctx = self.betting_context(seat)?;
        let high = ctx.high_bet;
        let mut reopen = false;
        let outcome = match validate_action(&ctx, action) {
            Ok(ValidatedAction::Fold) => {
                self.seats[seat].fold();
                if self.live_count() <= 1 {
                    self.game_over = true;
                }
                ActionOutcome::Applied { chips: 0 }
            }
            Ok(ValidatedAction::Check) => {
                self.seats[seat].set_played(true);
                ActionOutcome::Applied { chips: 0 }
            }
            Ok(ValidatedAction::Call(chips)) => {
                let moved = self.seats[seat].commit(chips);
                self.pot += moved;
                self.seats[seat].set_played(true);
                ActionOutcome::Applied { chips: moved }
            }
            Ok(ValidatedAction::Raise { chips, .. }) => {
                let moved = self.seats[seat].commit(chips);
                self.pot += moved;
                self.seats[seat].set_played(true);
                // every accepted raise reopens, short all-ins included
                reopen = true;
                ActionOutcome::Applied { chips: moved }
            }
            Err(reason) => {
                let s = &mut self.seats[seat];
                let moved = s.commit(s.stack());
                s.disable();
                s.set_played(true);
                self.pot += moved;
                // only when it lifts the high bet
                reopen = s.bets() > high;
                warn!(
                    hand = self.hands_dealt,
                    seat,
                    ?action,
                    %reason,
                    chips = moved,
                    "illegal action, forcing all-in"
                );
                ActionOutcome::Forced {
                    chips: moved,
                    reason,
                }
            }
        };

        // everyone else still able to act must respond again
        if reopen {
            for (i, other) in self.seats.iter_mut().enumerate() {
                if i != seat && other.in_hand() && other.can_act() {
                    other.set_played(false);
                }
            }
        }

        debug!(hand = self.hands_dealt, seat, ?action, chips = outcome.chips(), "action");
        self.actions.push(ActionRecord {
            seat,
            street: self.street,
            action,
            chips: outcome.chips(),
            forced: outcome.is_forced(),
        });
        self.street_closed = false;
        Ok(outcome)
    }

    /// Reports whether the current street's betting is finished.
    ///
    /// True at once when at most one seat is still in the hand (which also
    /// ends the hand) or when nobody in the hand can act any more; otherwise
    /// true once every seat that can act has acted and owes nothing. When true,
    /// per-street flags are cleared for the next street. Repeated calls keep
    /// answering true until the next action or street.
    pub fn is_round_done(&mut self) -> bool {
        if !self.hand_active || self.street_closed {
            return true;
        }
        if self.live_count() <= 1 {
            self.game_over = true;
            self.close_street();
            return true;
        }
        let high = self.high_bet();
        let mut actors = self
            .seats
            .iter()
            .filter(|s| s.in_hand() && s.can_act())
            .peekable();
        let done = actors.peek().is_none() || actors.all(|s| s.played() && s.bets() >= high);
        if done {
            self.close_street();
        }
        done
    }

    /// Scores every live hand, layers side pots from the contributions and
    /// awards each pot whole to its strongest eligible seat.
    pub fn showdown(&mut self) -> Result<ShowdownResult, GameError> {
        if !self.hand_active {
            return Err(GameError::NoHandInProgress);
        }
        let scores: Vec<Option<HandScore>> = self
            .seats
            .iter()
            .map(|s| {
                s.in_hand().then(|| {
                    let mut cards: Vec<Card> = s.hole_cards().iter().flatten().copied().collect();
                    cards.extend_from_slice(&self.community);
                    self.evaluator.evaluate(&cards)
                })
            })
            .collect();
        let contributions: Vec<u32> = self.seats.iter().map(Seat::bets).collect();
        let pots = PotManager::from_contributions(&contributions);
        debug_assert_eq!(pots.total(), self.pot);
        let dist = pots.distribute(&scores);

        let mut net = Vec::with_capacity(self.seats.len());
        for (seat, &won) in self.seats.iter_mut().zip(&dist.payouts) {
            net.push(i64::from(won) - i64::from(seat.bets()));
            seat.settle(won);
        }

        self.pot = 0;
        self.game_over = true;
        self.hand_active = false;
        self.street = Street::Showdown;

        info!(
            hand = self.hands_dealt,
            pots = pots.pots().len(),
            winners = ?dist.winners,
            "hand settled"
        );

        self.last_record = Some(HandRecord {
            hand_id: format_hand_id(self.deck.seed(), self.hands_dealt),
            seed: self.deck.seed(),
            dealer: self.dealer,
            actions: std::mem::take(&mut self.actions),
            board: self.community.clone(),
            contributions,
            pots: pots.pots().to_vec(),
            payouts: dist.payouts.clone(),
            reloads: self.hand_reloads.clone(),
            ts: None,
            showdown: Some(ShowdownInfo {
                winners: dist.winners.clone(),
                scores: scores.iter().map(|s| s.map(|h| h.value())).collect(),
            }),
        });

        Ok(ShowdownResult {
            pots: pots.pots().to_vec(),
            winners: dist.winners,
            payouts: dist.payouts,
            scores,
            net,
        })
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            hand: self.hands_dealt,
            street: self.street,
            positions: self.positions,
            pot: self.pot,
            high_bet: self.high_bet(),
            community: self.community.clone(),
            game_over: self.game_over,
            seats: self
                .seats
                .iter()
                .map(|s| SeatSnapshot {
                    id: s.id(),
                    stack: s.stack(),
                    bets: s.bets(),
                    current_bet: s.current_bet(),
                    in_hand: s.in_hand(),
                    can_act: s.can_act(),
                    played: s.played(),
                    net: s.net(),
                    hole: s.hole_cards().iter().flatten().copied().collect(),
                })
                .collect(),
        }
    }

    fn seat_ref(&self, seat: usize) -> Result<&Seat, GameError> {
        self.seats.get(seat).ok_or(GameError::InvalidSeat {
            seat,
            seats: self.seats.len(),
        })
    }

    fn close_street(&mut self) {
        for s in &mut self.seats {
            s.reset_for_street();
        }
        self.street_closed = true;
    }

    fn reset_street(&mut self) {
        for s in &mut self.seats {
            s.reset_for_street();
        }
        self.street_closed = false;
    }
}
