use std::collections::HashSet;

use pokergym_engine::deck::Deck;

#[test]
fn same_seed_same_order() {
    let mut a = Deck::new_with_seed(42);
    let mut b = Deck::new_with_seed(42);
    a.shuffle();
    b.shuffle();
    for _ in 0..52 {
        assert_eq!(a.deal_card(), b.deal_card());
    }
    assert_eq!(a.deal_card(), None);
}

#[test]
fn different_seeds_diverge() {
    let mut a = Deck::new_with_seed(1);
    let mut b = Deck::new_with_seed(2);
    a.shuffle();
    b.shuffle();
    let xs: Vec<_> = (0..10).filter_map(|_| a.deal_card()).collect();
    let ys: Vec<_> = (0..10).filter_map(|_| b.deal_card()).collect();
    assert_ne!(xs, ys);
}

#[test]
fn shuffle_yields_52_unique_cards() {
    let mut d = Deck::new_with_seed(7);
    d.shuffle();
    let mut seen = HashSet::new();
    while let Some(c) = d.deal_card() {
        assert!(seen.insert(c), "duplicate {c}");
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn reshuffle_restores_full_deck() {
    let mut d = Deck::new_with_seed(9);
    d.shuffle();
    for _ in 0..20 {
        d.deal_card();
    }
    d.burn_card();
    assert_eq!(d.remaining(), 31);
    d.shuffle();
    assert_eq!(d.remaining(), 52);
    assert!(d.burned().is_empty());
}

#[test]
fn burned_cards_leave_the_deck() {
    let mut d = Deck::new_with_seed(3);
    d.shuffle();
    let burned = d.burn_card().expect("card");
    assert_eq!(d.burned(), &[burned]);
    while let Some(c) = d.deal_card() {
        assert_ne!(c, burned);
    }
}
