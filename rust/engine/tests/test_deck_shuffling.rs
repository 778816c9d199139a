use std::collections::HashSet;

use headsup_engine::cards::Card;
use headsup_engine::deck::Deck;
use headsup_engine::errors::EngineError;

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.shuffle();
    deck.deal(10).unwrap();
    deck.reset();
    assert_eq!(deck.remaining(), 52);
    let all = deck.deal(52).expect("should have 52 cards");
    let set: HashSet<Card> = all.iter().copied().collect();
    assert_eq!(set.len(), 52);
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    assert_eq!(
        d1.deal(10).unwrap(),
        d2.deal(10).unwrap(),
        "same seed must yield identical order"
    );
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    assert_ne!(
        d1.deal(10).unwrap(),
        d2.deal(10).unwrap(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn deal_takes_from_the_end() {
    let mut deck = Deck::new_with_seed(9);
    let last = *deck.cards().last().unwrap();
    let dealt = deck.deal(1).unwrap();
    assert_eq!(dealt, vec![last]);
}

#[test]
fn overdraw_fails_without_removing_cards() {
    let mut deck = Deck::new_with_seed(5);
    deck.deal(50).unwrap();
    let err = deck.deal(3).unwrap_err();
    assert_eq!(
        err,
        EngineError::InsufficientDeck {
            requested: 3,
            remaining: 2
        }
    );
    assert_eq!(deck.remaining(), 2);
}

#[test]
fn burn_and_deal_follow_holdem_procedure() {
    let mut deck = Deck::new_with_seed(777);
    deck.shuffle();

    let p1 = deck.deal(2).unwrap();
    let p2 = deck.deal(2).unwrap();
    deck.burn().unwrap();
    let flop = deck.deal(3).unwrap();
    deck.burn().unwrap();
    let turn = deck.deal(1).unwrap();
    deck.burn().unwrap();
    let river = deck.deal(1).unwrap();

    let mut set = HashSet::new();
    for c in p1.iter().chain(&p2).chain(&flop).chain(&turn).chain(&river) {
        assert!(set.insert(*c));
    }
    assert_eq!(deck.remaining(), 52 - 12);
}
