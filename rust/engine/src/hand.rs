//! Hand strength scoring.
//!
//! Two strategies share the [`HandEvaluator`] seam:
//!
//! - [`LegacyEvaluator`] is the coarse ordinal scorer every trained policy has
//!   been played against. Its tiebreakers ignore kickers outside the counted
//!   ranks. It must stay bit-for-bit stable.
//! - [`StandardEvaluator`] is a rule-correct best-five-of-seven scorer with full
//!   kicker comparison, selectable per table.
//!
//! Both produce a [`HandScore`]. Scores are only comparable among hands played
//! against the same board.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

/// Category plus a category-specific tiebreaker.
///
/// Ordering compares the category first, so the category ladder is strict
/// even where the packed [`HandScore::value`] of two categories would overlap.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandScore {
    pub category: Category,
    pub tiebreaker: u32,
}

impl HandScore {
    /// Packed `category * 100 + tiebreaker` integer.
    ///
    /// Full-house and two-pair tiebreakers can exceed 100, so this value does
    /// not order hands across categories; compare `HandScore`s instead.
    pub fn value(&self) -> u32 {
        self.category as u32 * 100 + self.tiebreaker
    }
}

/// Strategy that scores up to seven cards (two hole cards plus the board).
pub trait HandEvaluator: Send + Sync + std::fmt::Debug {
    fn evaluate(&self, cards: &[Card]) -> HandScore;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Legacy,
    Standard,
}

static LEGACY: LegacyEvaluator = LegacyEvaluator;
static STANDARD: StandardEvaluator = StandardEvaluator;

impl EvaluatorKind {
    pub fn evaluator(self) -> &'static dyn HandEvaluator {
        match self {
            EvaluatorKind::Legacy => &LEGACY,
            EvaluatorKind::Standard => &STANDARD,
        }
    }
}

/// Scores `cards` with the legacy evaluator.
pub fn hand_strength(cards: &[Card]) -> HandScore {
    LEGACY.evaluate(cards)
}

#[derive(Debug, Copy, Clone, Default)]
pub struct LegacyEvaluator;

impl HandEvaluator for LegacyEvaluator {
    fn evaluate(&self, cards: &[Card]) -> HandScore {
        let counts = Counts::of(cards);
        let score = |category, tiebreaker: u32| HandScore {
            category,
            tiebreaker,
        };

        let flush_suit = counts.flush_suit();
        if let Some(s) = flush_suit
            && let Some(high) = straight_high(counts.suit_masks[s])
        {
            return score(Category::StraightFlush, high as u32);
        }
        if let Some(quad) = counts.highest(|c| c == 4) {
            return score(Category::FourOfAKind, quad as u32);
        }
        if let Some(trips) = counts.highest(|c| c == 3)
            && let Some(pair) = counts.highest_except(trips, |c| c >= 2)
        {
            return score(Category::FullHouse, trips as u32 * 15 + pair as u32);
        }
        if let Some(s) = flush_suit {
            let top: u32 = counts.suit_ranks_desc(s).iter().take(5).map(|&r| r as u32).sum();
            return score(Category::Flush, top);
        }
        if let Some(high) = straight_high(counts.rank_mask) {
            return score(Category::Straight, high as u32);
        }
        if let Some(trips) = counts.highest(|c| c == 3) {
            return score(Category::ThreeOfAKind, trips as u32);
        }
        let pairs = counts.ranks_desc(|c| c == 2);
        match pairs.as_slice() {
            [p1, p2, ..] => score(Category::TwoPair, *p1 as u32 * 15 + *p2 as u32),
            [p] => score(Category::OnePair, *p as u32),
            [] => score(
                Category::HighCard,
                counts.highest(|c| c > 0).unwrap_or(0) as u32,
            ),
        }
    }

    fn name(&self) -> &'static str {
        "legacy"
    }
}

/// Rule-correct evaluator: kickers packed high-to-low in base 15.
#[derive(Debug, Copy, Clone, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, cards: &[Card]) -> HandScore {
        let counts = Counts::of(cards);
        let (category, kickers) = standard_rank(&counts);
        let tiebreaker = kickers.iter().fold(0u32, |acc, &k| acc * 15 + k as u32);
        HandScore {
            category,
            tiebreaker,
        }
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

fn standard_rank(counts: &Counts) -> (Category, [u8; 5]) {
    let flush_suit = counts.flush_suit();
    if let Some(s) = flush_suit
        && let Some(high) = straight_high(counts.suit_masks[s])
    {
        return (Category::StraightFlush, [high, 0, 0, 0, 0]);
    }
    if let Some(quad) = counts.highest(|c| c == 4) {
        let kicker = counts.highest_except(quad, |c| c > 0).unwrap_or(0);
        return (Category::FourOfAKind, [quad, kicker, 0, 0, 0]);
    }
    if let Some(trips) = counts.highest(|c| c == 3)
        && let Some(pair) = counts.highest_except(trips, |c| c >= 2)
    {
        return (Category::FullHouse, [trips, pair, 0, 0, 0]);
    }
    if let Some(s) = flush_suit {
        return (Category::Flush, top_five(&counts.suit_ranks_desc(s)));
    }
    if let Some(high) = straight_high(counts.rank_mask) {
        return (Category::Straight, [high, 0, 0, 0, 0]);
    }
    if let Some(trips) = counts.highest(|c| c == 3) {
        let rest: Vec<u8> = counts
            .ranks_desc(|c| c > 0)
            .into_iter()
            .filter(|&r| r != trips)
            .collect();
        let mut k = [trips, 0, 0, 0, 0];
        for (slot, r) in k[1..3].iter_mut().zip(rest) {
            *slot = r;
        }
        return (Category::ThreeOfAKind, k);
    }
    let pairs = counts.ranks_desc(|c| c == 2);
    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let kicker = counts
            .ranks_desc(|c| c > 0)
            .into_iter()
            .find(|&r| r != high && r != low)
            .unwrap_or(0);
        return (Category::TwoPair, [high, low, kicker, 0, 0]);
    }
    if let Some(&p) = pairs.first() {
        let rest: Vec<u8> = counts
            .ranks_desc(|c| c > 0)
            .into_iter()
            .filter(|&r| r != p)
            .collect();
        let mut k = [p, 0, 0, 0, 0];
        for (slot, r) in k[1..].iter_mut().zip(rest) {
            *slot = r;
        }
        return (Category::OnePair, k);
    }
    (Category::HighCard, top_five(&counts.ranks_desc(|c| c > 0)))
}

fn top_five(ranks: &[u8]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, &r) in k.iter_mut().zip(ranks) {
        *slot = r;
    }
    k
}

/// Rank histogram plus rank bitmasks, overall and per suit.
struct Counts {
    ranks: [u8; 15],
    rank_mask: u16,
    suit_masks: [u16; 4],
    suit_counts: [u8; 4],
}

impl Counts {
    fn of(cards: &[Card]) -> Self {
        let mut c = Counts {
            ranks: [0; 15],
            rank_mask: 0,
            suit_masks: [0; 4],
            suit_counts: [0; 4],
        };
        for card in cards {
            let r = card.rank.value();
            let s = card.suit.index();
            c.ranks[r as usize] += 1;
            c.rank_mask |= 1 << r;
            c.suit_masks[s] |= 1 << r;
            c.suit_counts[s] += 1;
        }
        c
    }

    fn flush_suit(&self) -> Option<usize> {
        self.suit_counts.iter().position(|&n| n >= 5)
    }

    fn highest(&self, pred: impl Fn(u8) -> bool) -> Option<u8> {
        (2..=14u8).rev().find(|&r| pred(self.ranks[r as usize]))
    }

    fn highest_except(&self, skip: u8, pred: impl Fn(u8) -> bool) -> Option<u8> {
        (2..=14u8)
            .rev()
            .find(|&r| r != skip && pred(self.ranks[r as usize]))
    }

    fn ranks_desc(&self, pred: impl Fn(u8) -> bool) -> Vec<u8> {
        (2..=14u8)
            .rev()
            .filter(|&r| pred(self.ranks[r as usize]))
            .collect()
    }

    fn suit_ranks_desc(&self, suit: usize) -> Vec<u8> {
        (2..=14u8)
            .rev()
            .filter(|&r| self.suit_masks[suit] & (1 << r) != 0)
            .collect()
    }
}

/// Highest card of the best five-rank run in `mask`, Ace counting low too.
fn straight_high(mask: u16) -> Option<u8> {
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}
