use serde::{Deserialize, Serialize};

use crate::errors::IllegalAction;
use crate::player::{ActionKind, PlayerAction as A};

/// The betting facts one seat's legality depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    /// Chips behind.
    pub stack: u32,
    /// Chips this seat has committed this hand.
    pub committed: u32,
    /// Highest per-seat commitment at the table.
    pub high_bet: u32,
    /// Seat already acted and faces no new raise.
    pub played: bool,
}

impl BettingContext {
    pub fn owed(&self) -> u32 {
        self.high_bet.saturating_sub(self.committed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    /// Check; a seat with no chips behind checks through any amount owed.
    Check,
    /// Chips to move, capped at the stack.
    Call(u32),
    /// Chips to move and the nominal hand-total target.
    Raise { chips: u32, target: u32 },
}

/// Fold/check/call/raise availability, indexed like [`ActionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Legality([bool; 4]);

impl Legality {
    pub fn none() -> Self {
        Self([false; 4])
    }

    pub fn from_mask(mask: [bool; 4]) -> Self {
        Self(mask)
    }

    pub fn mask(&self) -> [bool; 4] {
        self.0
    }

    pub fn is_legal(&self, kind: ActionKind) -> bool {
        self.0[kind.index()]
    }

    pub fn legal_kinds(&self) -> Vec<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(|k| self.is_legal(*k))
            .collect()
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&b| b)
    }
}

/// Validates a player action against the table's betting rules.
///
/// Illegal inputs come back as [`IllegalAction`]; the table never surfaces
/// them to callers, it converts them into a forced all-in instead.
///
/// # Examples
///
/// ```
/// use pokergym_engine::rules::{validate_action, BettingContext, ValidatedAction};
/// use pokergym_engine::player::PlayerAction;
///
/// let ctx = BettingContext { stack: 500, committed: 20, high_bet: 20, played: false };
/// let v = validate_action(&ctx, PlayerAction::Raise(80)).unwrap();
/// assert_eq!(v, ValidatedAction::Raise { chips: 80, target: 100 });
///
/// // Nothing is owed, so there is nothing to call.
/// assert!(validate_action(&ctx, PlayerAction::Call).is_err());
/// ```
pub fn validate_action(ctx: &BettingContext, action: A) -> Result<ValidatedAction, IllegalAction> {
    if action == A::Fold {
        return Ok(ValidatedAction::Fold);
    }
    if ctx.played {
        return Err(IllegalAction::AlreadyActed);
    }
    let owed = ctx.owed();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if owed == 0 || ctx.stack == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(IllegalAction::CheckWhileOwing { owed })
            }
        }
        A::Call => {
            if owed == 0 {
                Err(IllegalAction::NothingToCall)
            } else if ctx.stack == 0 {
                Err(IllegalAction::NoChips)
            } else {
                Ok(ValidatedAction::Call(owed.min(ctx.stack)))
            }
        }
        A::Raise(amount) => {
            if amount == 0 {
                return Err(IllegalAction::NonPositiveRaise);
            }
            if ctx.stack == 0 {
                return Err(IllegalAction::NoChips);
            }
            let target = ctx.high_bet.saturating_add(amount);
            let chips = (target - ctx.committed).min(ctx.stack);
            Ok(ValidatedAction::Raise { chips, target })
        }
    }
}

/// Action kinds [`validate_action`] accepts for this context.
///
/// A raise counts as legal when any positive amount would be accepted.
pub fn legal_actions(ctx: &BettingContext) -> Legality {
    let owed = ctx.owed();
    let open = !ctx.played;
    Legality([
        true,
        open && (owed == 0 || ctx.stack == 0),
        open && owed > 0 && ctx.stack > 0,
        open && ctx.stack > 0,
    ])
}
