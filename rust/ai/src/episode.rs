//! Drives one hand through a [`PokerEnv`] with caller-supplied decisions.

use pokergym_engine::env::PokerEnv;
use pokergym_engine::rules::Legality;
use tracing::error;

use crate::Decision;
use crate::errors::AgentError;

/// Upper bound on passes over the action order before a street must close.
///
/// A pass that leaves the street open contains a reopening action. Every
/// reopening action either lifts the high bet by at least one chip or puts its
/// seat all-in, so the count is bounded by the chips in play plus the seats.
pub fn max_passes_per_street(env: &PokerEnv) -> u64 {
    let table = env.table();
    let chips: u64 = table
        .seats()
        .iter()
        .map(|s| u64::from(s.stack()) + u64::from(s.bets()))
        .sum();
    chips + 2 * table.num_seats() as u64 + 2
}

/// Deals a hand, asks `choose` for every seat that needs to act on every
/// street, and settles it. Returns each seat's reward for the hand.
///
/// `choose` receives the seat, its encoded state and its legal actions.
/// A street that stays open past [`max_passes_per_street`] is an engine
/// fault and returns [`AgentError::StreetStalled`].
pub fn play_hand<F>(env: &mut PokerEnv, mut choose: F) -> Result<Vec<i64>, AgentError>
where
    F: FnMut(usize, &[f32], &Legality) -> Result<Decision, AgentError>,
{
    env.reset()?;
    let bound = max_passes_per_street(env);
    loop {
        let mut passes = 0u64;
        while !env.is_round_done() {
            passes += 1;
            if passes > bound {
                let hand = env.table().hands_dealt();
                error!(hand, passes, "street never closed");
                return Err(AgentError::StreetStalled { hand, passes });
            }
            for seat in env.action_order() {
                if !env.needs_to_act(seat) {
                    continue;
                }
                let state = env.observe(seat);
                let legal = env.legal_actions(seat);
                let decision = choose(seat, &state, &legal)?;
                env.step(seat, decision.kind, decision.raise_amount)?;
            }
        }
        if !env.advance_round()? {
            break;
        }
    }
    Ok(env.showdown()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Agent;
    use crate::random::RandomAgent;
    use pokergym_engine::game::TableConfig;
    use pokergym_engine::player::ActionKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn folding_everyone_ends_hand_preflop() {
        let mut env = PokerEnv::new(TableConfig::with_seats(3, 2)).unwrap();
        let mut prompts = 0;
        let rewards = play_hand(&mut env, |_, _, _| {
            prompts += 1;
            Ok(Decision {
                kind: ActionKind::Fold,
                raise_amount: 0,
                sampled: ActionKind::Fold,
                bucket: None,
                value: None,
            })
        })
        .unwrap();
        // seat 0 then the small blind fold; the big blind takes the blinds
        assert_eq!(prompts, 2);
        assert_eq!(rewards, vec![0, -10, 10]);
        assert!(env.table().community().is_empty());
    }

    #[test]
    fn random_agents_finish_hands() {
        let mut env = PokerEnv::new(TableConfig::with_seats(4, 9)).unwrap();
        let agent = RandomAgent::new(env.layout(), 20);
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        for _ in 0..50 {
            let rewards = play_hand(&mut env, |_, s, l| agent.act(s, l, &mut rng)).unwrap();
            assert_eq!(rewards.iter().sum::<i64>(), 0);
            assert!(!env.table().hand_active());
        }
    }

    #[test]
    fn one_chip_raise_war_runs_to_all_in() {
        let mut env = PokerEnv::new(TableConfig::heads_up(6)).unwrap();
        let rewards = play_hand(&mut env, |_, _, legal| {
            let kind = if legal.is_legal(ActionKind::Raise) {
                ActionKind::Raise
            } else {
                legal.legal_kinds()[0]
            };
            Ok(Decision {
                kind,
                raise_amount: 1,
                sampled: kind,
                bucket: None,
                value: None,
            })
        })
        .unwrap();
        assert_eq!(rewards.iter().sum::<i64>(), 0);
        let record = env.table().last_record().unwrap();
        assert_eq!(record.contributions, vec![1000, 1000]);
        // hundreds of passes, far past any fixed small cap
        assert!(record.actions.len() > 500);
    }

    #[test]
    fn pass_bound_counts_chips_in_play() {
        let mut env = PokerEnv::new(TableConfig::with_seats(3, 1)).unwrap();
        env.reset().unwrap();
        assert_eq!(max_passes_per_street(&env), 3000 + 6 + 2);
    }
}
