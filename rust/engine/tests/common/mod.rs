#![allow(dead_code)]

use pokergym_engine::engine::Table;
use pokergym_engine::game::TableConfig;
use pokergym_engine::player::PlayerAction;

pub fn config(seats: usize, seed: u64) -> TableConfig {
    TableConfig::with_seats(seats, seed)
}

pub fn dealt(config: TableConfig) -> Table {
    let mut t = Table::new(config).expect("valid config");
    t.deal().expect("deal");
    t
}

pub fn dealt_with_stacks(config: TableConfig, stacks: &[u32]) -> Table {
    let mut t = Table::with_stacks(config, stacks).expect("valid config");
    t.deal().expect("deal");
    t
}

/// Checks every seat still needing to act until the street closes, then
/// deals the remaining streets the same way.
pub fn check_down(t: &mut Table) {
    loop {
        let mut guard = 0;
        while !t.is_round_done() {
            guard += 1;
            assert!(guard < 50, "street never closed");
            for seat in t.action_order() {
                if t.needs_to_act(seat) {
                    let owed = t.high_bet() - t.seats()[seat].bets();
                    let action = if owed > 0 {
                        PlayerAction::Call
                    } else {
                        PlayerAction::Check
                    };
                    t.take_action(seat, action).expect("action");
                }
            }
        }
        if t.is_game_over() || t.community().len() == 5 {
            return;
        }
        t.next_round().expect("next street");
    }
}
