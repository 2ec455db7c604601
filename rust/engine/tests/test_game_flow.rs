mod common;

use common::{check_down, config, dealt, dealt_with_stacks};
use pokergym_engine::engine::Table;
use pokergym_engine::errors::GameError;
use pokergym_engine::game::{Street, TableConfig};
use pokergym_engine::player::{ActionKind, PlayerAction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn heads_up_deal_posts_blinds() {
    let t = dealt(TableConfig::heads_up(5));
    assert_eq!(t.dealer(), 0);
    assert_eq!(t.pot(), 30);
    assert_eq!(t.seats()[0].stack(), 990);
    assert_eq!(t.seats()[1].stack(), 980);
    assert!(t.community().is_empty());
    assert_eq!(t.street(), Street::Preflop);
    assert!(!t.is_game_over());
}

#[test]
fn raise_reopens_action_for_others() {
    let mut t = dealt_with_stacks(config(3, 8), &[1000, 1000, 520]);
    let p = t.positions();
    assert_eq!((p.dealer, p.small_blind, p.big_blind), (0, 1, 2));

    t.take_action(0, PlayerAction::Call).expect("call");
    t.take_action(1, PlayerAction::Call).expect("call");
    assert!(!t.is_round_done());

    let out = t.take_action(2, PlayerAction::Raise(80)).expect("raise");
    assert_eq!(out.chips(), 80);
    assert_eq!(t.seats()[2].bets(), 100);
    assert_eq!(t.seats()[2].stack(), 420);
    assert_eq!(t.pot(), 140);
    assert!(!t.seats()[0].played());
    assert!(!t.seats()[1].played());
    assert!(!t.is_round_done());

    t.take_action(0, PlayerAction::Call).expect("call");
    t.take_action(1, PlayerAction::Call).expect("call");
    assert!(t.is_round_done());
    assert_eq!(t.pot(), 300);
}

#[test]
fn streets_reveal_three_one_one_with_burns() {
    let mut t = dealt(TableConfig::heads_up(13));
    t.take_action(0, PlayerAction::Call).expect("call");
    t.take_action(1, PlayerAction::Check).expect("check");
    assert!(t.is_round_done());

    assert_eq!(t.next_round(), Ok(Street::Flop));
    assert_eq!(t.community().len(), 3);
    assert_eq!(t.burned().len(), 1);
    // postflop the non-dealer opens
    assert_eq!(t.action_order(), vec![1, 0]);

    for expected in [4, 5] {
        t.take_action(1, PlayerAction::Check).expect("check");
        t.take_action(0, PlayerAction::Check).expect("check");
        assert!(t.is_round_done());
        t.next_round().expect("street");
        assert_eq!(t.community().len(), expected);
    }
    assert_eq!(t.burned().len(), 3);
    assert_eq!(t.street(), Street::River);
    assert!(t.next_round().is_err());
}

#[test]
fn fold_ends_hand_and_winner_takes_pot() {
    let mut t = dealt(TableConfig::heads_up(2));
    t.take_action(0, PlayerAction::Fold).expect("fold");
    assert!(t.is_game_over());
    assert!(t.is_round_done());
    let res = t.showdown().expect("showdown");
    assert_eq!(res.payouts, vec![0, 30]);
    assert_eq!(res.net, vec![-10, 10]);
    assert_eq!(t.seats()[1].stack(), 1010);
}

#[test]
fn checked_down_hand_settles_whole_pot() {
    let mut t = dealt(config(4, 21));
    check_down(&mut t);
    assert_eq!(t.community().len(), 5);
    let pot = t.pot();
    let res = t.showdown().expect("showdown");
    assert_eq!(res.payouts.iter().sum::<u32>(), pot);
    assert_eq!(res.net.iter().sum::<i64>(), 0);
    assert_eq!(t.pot(), 0);
    assert_eq!(t.street(), Street::Showdown);
    assert!(!t.hand_active());
}

#[test]
fn button_rotates_each_hand() {
    let mut t = Table::new(config(3, 4)).expect("table");
    for expected in [0, 1, 2, 0] {
        t.deal().expect("deal");
        assert_eq!(t.dealer(), expected);
        check_down(&mut t);
        t.showdown().expect("showdown");
    }
}

#[test]
fn busted_seat_is_reloaded_at_deal() {
    let mut t = Table::with_stacks(config(3, 6), &[0, 1000, 1000]).expect("table");
    t.deal().expect("deal");
    let s = &t.seats()[0];
    assert!(s.in_hand());
    assert!(s.can_act());
    assert_eq!(s.reloads(), 1000);
}

#[test]
fn antes_are_posted_before_blinds() {
    let cfg = TableConfig {
        ante: 5,
        ..config(3, 9)
    };
    let t = dealt(cfg);
    let bets: Vec<u32> = t.seats().iter().map(|s| s.bets()).collect();
    assert_eq!(bets, vec![5, 15, 25]);
    assert_eq!(t.pot(), 45);
    assert_eq!(t.high_bet(), 25);
    let stacks: Vec<u32> = t.seats().iter().map(|s| s.stack()).collect();
    assert_eq!(stacks, vec![995, 985, 975]);
}

#[test]
fn short_endowment_posts_blind_all_in() {
    let cfg = TableConfig {
        endowment: 15,
        ..TableConfig::heads_up(3)
    };
    let mut t = dealt(cfg);
    let bb = &t.seats()[1];
    assert_eq!(bb.bets(), 15);
    assert_eq!(bb.stack(), 0);
    assert!(bb.in_hand());
    assert!(!bb.can_act());
    assert_eq!(bb.reloads(), 0);
    assert_eq!(t.pot(), 25);

    // the small blind owes the rest of the short blind only
    t.take_action(0, PlayerAction::Call).expect("call");
    assert_eq!(t.seats()[0].bets(), 15);
    check_down(&mut t);
    let res = t.showdown().expect("showdown");
    assert_eq!(res.payouts.iter().sum::<u32>(), 30);
    assert_eq!(res.net.iter().sum::<i64>(), 0);
}

#[test]
fn deal_is_refused_while_a_hand_is_unsettled() {
    let mut t = dealt(config(3, 12));
    t.take_action(0, PlayerAction::Raise(200)).expect("raise");
    let before: u32 = t.seats().iter().map(|s| s.stack()).sum::<u32>() + t.pot();
    assert_eq!(before, 3000);

    assert_eq!(t.deal(), Err(GameError::HandInProgress));
    let after: u32 = t.seats().iter().map(|s| s.stack()).sum::<u32>() + t.pot();
    assert_eq!(after, 3000);
    assert_eq!(t.pot(), 250);
    assert_eq!(t.hands_dealt(), 1);

    // a fold-ended hand still has to be settled first
    t.take_action(1, PlayerAction::Fold).expect("fold");
    t.take_action(2, PlayerAction::Fold).expect("fold");
    assert!(t.is_game_over());
    assert_eq!(t.deal(), Err(GameError::HandInProgress));

    t.showdown().expect("showdown");
    assert_eq!(t.seats()[0].stack(), 1030);
    t.deal().expect("next hand");
    assert_eq!(t.hands_dealt(), 2);
}

fn play_random_hand(t: &mut Table, rng: &mut StdRng) {
    t.deal().expect("deal");
    loop {
        let mut guard = 0;
        while !t.is_round_done() {
            guard += 1;
            assert!(guard < 200, "street never closed");
            for seat in t.action_order() {
                if !t.needs_to_act(seat) {
                    continue;
                }
                let action = if rng.random_bool(0.1) {
                    // occasionally ignore the mask to exercise the penalty path
                    let kind = ActionKind::ALL[rng.random_range(0..4)];
                    PlayerAction::from_kind(kind, rng.random_range(0..60))
                } else {
                    let legal = t.legal_actions(seat).legal_kinds();
                    let kind = legal[rng.random_range(0..legal.len())];
                    PlayerAction::from_kind(kind, rng.random_range(1..60))
                };
                t.take_action(seat, action).expect("action");
            }
        }
        if t.is_game_over() || t.community().len() == 5 {
            break;
        }
        t.next_round().expect("street");
    }
    t.showdown().expect("showdown");
}

#[test]
fn random_play_conserves_chips() {
    let mut rng = StdRng::seed_from_u64(99);
    for seats in [2, 3, 6] {
        let cfg = config(seats, 1234 + seats as u64);
        let endowment = cfg.endowment;
        let mut t = Table::new(cfg).expect("table");
        for _ in 0..150 {
            play_random_hand(&mut t, &mut rng);
            let stacks: u64 = t.seats().iter().map(|s| u64::from(s.stack())).sum();
            let reloads: u64 = t.seats().iter().map(|s| s.reloads()).sum();
            assert_eq!(stacks, seats as u64 * u64::from(endowment) + reloads);
            let net: i64 = t.seats().iter().map(|s| s.net()).sum();
            assert_eq!(net, 0);
        }
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut t = Table::new(config(4, 77)).expect("table");
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            play_random_hand(&mut t, &mut rng);
        }
        t.snapshot()
    };
    assert_eq!(run(), run());
}
