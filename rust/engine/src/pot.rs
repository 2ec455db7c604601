use serde::{Deserialize, Serialize};

use crate::hand::HandScore;

/// A slice of the pot that only seats contributing at least its threshold can win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub size: u32,
    pub eligible: Vec<usize>,
}

/// Pots layered from per-seat hand contributions.
///
/// Each distinct contribution level `c` (ascending) forms one pot of
/// `(c - previous_c) * count(contribution >= c)`, eligible to exactly those
/// seats. Folded seats stay in the eligible lists; they simply cannot win
/// against any live hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PotManager {
    pots: Vec<SidePot>,
}

/// Outcome of awarding every pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Chips won per seat.
    pub payouts: Vec<u32>,
    /// Winner of each pot, in pot order.
    pub winners: Vec<usize>,
}

impl PotManager {
    pub fn from_contributions(contributions: &[u32]) -> Self {
        let mut levels: Vec<u32> = contributions.iter().copied().filter(|&c| c > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::with_capacity(levels.len());
        let mut previous = 0u32;
        for c in levels {
            let eligible: Vec<usize> = contributions
                .iter()
                .enumerate()
                .filter(|&(_, &x)| x >= c)
                .map(|(i, _)| i)
                .collect();
            pots.push(SidePot {
                size: (c - previous) * eligible.len() as u32,
                eligible,
            });
            previous = c;
        }
        Self { pots }
    }

    pub fn pots(&self) -> &[SidePot] {
        &self.pots
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map(|p| p.size).unwrap_or(0)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.size).collect()
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.size).sum()
    }

    /// Awards each pot whole to its strongest eligible seat.
    ///
    /// `None` marks a folded seat. Equal top scores go to the lowest seat
    /// index; pots are never split.
    pub fn distribute(&self, strengths: &[Option<HandScore>]) -> Distribution {
        let mut payouts = vec![0u32; strengths.len()];
        let mut winners = Vec::with_capacity(self.pots.len());
        for pot in &self.pots {
            let mut best: Option<usize> = None;
            for &seat in &pot.eligible {
                match best {
                    Some(b) if strengths[seat] <= strengths[b] => {}
                    _ => best = Some(seat),
                }
            }
            if let Some(w) = best {
                payouts[w] += pot.size;
                winners.push(w);
            }
        }
        Distribution { payouts, winners }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Category;

    fn score(category: Category, tiebreaker: u32) -> Option<HandScore> {
        Some(HandScore {
            category,
            tiebreaker,
        })
    }

    #[test]
    fn layers_sum_to_total_contribution() {
        let contributions = [30, 100, 100, 0, 65];
        let pm = PotManager::from_contributions(&contributions);
        assert_eq!(pm.total(), contributions.iter().sum::<u32>());
        for pot in pm.pots() {
            assert!(!pot.eligible.contains(&3));
        }
    }

    #[test]
    fn tie_goes_to_lowest_index() {
        let pm = PotManager::from_contributions(&[50, 50]);
        let s = score(Category::OnePair, 9);
        let d = pm.distribute(&[s, s]);
        assert_eq!(d.payouts, vec![100, 0]);
        assert_eq!(d.winners, vec![0]);
    }

    #[test]
    fn folded_seat_never_beats_live_hand() {
        let pm = PotManager::from_contributions(&[40, 40]);
        let d = pm.distribute(&[None, score(Category::HighCard, 7)]);
        assert_eq!(d.payouts, vec![0, 80]);
    }
}
