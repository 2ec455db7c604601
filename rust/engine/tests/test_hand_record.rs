mod common;

use std::fs;

use common::{check_down, dealt};
use pokergym_engine::game::{Street, TableConfig};
use pokergym_engine::logger::{HandLogger, HandRecord};
use pokergym_engine::player::PlayerAction;

fn settled_record(seed: u64) -> HandRecord {
    let mut t = dealt(TableConfig::heads_up(seed));
    t.take_action(0, PlayerAction::Raise(40)).expect("raise");
    t.take_action(1, PlayerAction::Call).expect("call");
    check_down(&mut t);
    t.showdown().expect("showdown");
    t.last_record().cloned().expect("record")
}

#[test]
fn record_captures_actions_and_board() {
    let rec = settled_record(12);
    assert_eq!(rec.board.len(), 5);
    assert_eq!(rec.contributions, vec![60, 60]);
    assert_eq!(rec.payouts.iter().sum::<u32>(), 120);
    assert_eq!(rec.net().iter().sum::<i64>(), 0);
    assert_eq!(rec.actions[0].seat, 0);
    assert_eq!(rec.actions[0].action, PlayerAction::Raise(40));
    assert_eq!(rec.actions[0].street, Street::Preflop);
    assert!(rec.actions.iter().all(|a| !a.forced));
    assert!(rec.hand_id.ends_with("-000001"));
    let sd = rec.showdown.as_ref().expect("showdown info");
    assert_eq!(sd.scores.len(), 2);
}

#[test]
fn writes_one_json_line_per_hand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("logs").join("hands.jsonl");
    {
        let mut logger = HandLogger::create(&path).expect("create logger");
        logger.write(&settled_record(1)).expect("write");
        logger.write(&settled_record(2)).expect("write");
        assert_eq!(logger.written(), 2);
    }
    let text = fs::read_to_string(&path).expect("read");
    assert!(!text.contains('\r'));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let rec: HandRecord = serde_json::from_str(line).expect("parse");
        assert!(rec.ts.is_some());
    }
}

#[test]
fn existing_timestamp_is_preserved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hands.jsonl");
    let mut rec = settled_record(3);
    rec.ts = Some("2024-01-01T00:00:00Z".into());
    {
        let mut logger = HandLogger::create(&path).expect("create logger");
        logger.write(&rec).expect("write");
    }
    let text = fs::read_to_string(&path).expect("read");
    let back: HandRecord = serde_json::from_str(text.trim_end()).expect("parse");
    assert_eq!(back, rec);
}
