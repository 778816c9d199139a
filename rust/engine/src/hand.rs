//! Best-five-of-N hand evaluation.
//!
//! Five cards are classified directly; six or seven cards are searched
//! exhaustively over every five-card combination and the maximum
//! `(category, tiebreak)` wins.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
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
    RoyalFlush = 10,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Trips",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Boat",
            Category::FourOfAKind => "Quads",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }

    /// Number of entries in this category's tiebreak vector.
    pub fn tiebreak_len(self) -> usize {
        match self {
            Category::HighCard | Category::Flush | Category::RoyalFlush => 5,
            Category::OnePair => 4,
            Category::TwoPair | Category::ThreeOfAKind => 3,
            Category::FullHouse | Category::FourOfAKind => 2,
            Category::Straight | Category::StraightFlush => 1,
        }
    }
}

/// Totally ordered hand strength: category first, then tiebreak ranks
/// compared lexicographically, most significant first.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub tiebreak: Vec<u8>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripsType {
    /// Pocket pair plus one board card
    Set,
    /// One hole card plus a paired board
    Trips,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandMetadata {
    /// Present only when hole cards were supplied and the board has five cards.
    pub board_chop: Option<bool>,
    pub trips_type: Option<TripsType>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub rank: HandRank,
    pub best_five: [Card; 5],
    pub metadata: HandMetadata,
}

impl Evaluation {
    pub fn category(&self) -> Category {
        self.rank.category
    }

    /// Showdown label, e.g. `Trips (set)`.
    pub fn describe(&self) -> String {
        match self.metadata.trips_type {
            Some(TripsType::Set) => format!("{} (set)", self.rank.category.name()),
            Some(TripsType::Trips) => format!("{} (trips)", self.rank.category.name()),
            None => self.rank.category.name().to_string(),
        }
    }
}

/// Evaluates 5 to 7 unique cards.
///
/// ```
/// use headsup_engine::cards::parse_cards;
/// use headsup_engine::hand::{evaluate, Category};
///
/// let cards = parse_cards("As Ks Qs Js 10s").unwrap();
/// let eval = evaluate(&cards).unwrap();
/// assert_eq!(eval.rank.category, Category::RoyalFlush);
/// assert_eq!(eval.rank.tiebreak, vec![14, 13, 12, 11, 10]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EngineError> {
    validate_cards(cards)?;
    let (rank, best_five) = best_of(cards)?;
    Ok(Evaluation {
        rank,
        best_five,
        metadata: HandMetadata::default(),
    })
}

/// Evaluates `cards` where `hole` names the player's two private cards,
/// filling in the set/trips and board-chop metadata.
pub fn evaluate_with_hole(cards: &[Card], hole: &[Card]) -> Result<Evaluation, EngineError> {
    validate_cards(cards)?;
    if hole.len() != 2 {
        return Err(EngineError::InvalidHand(format!(
            "hole cards must be exactly 2, got {}",
            hole.len()
        )));
    }
    if hole[0] == hole[1] {
        return Err(EngineError::InvalidHand(format!(
            "duplicate hole card {}",
            hole[0]
        )));
    }
    if let Some(missing) = hole.iter().find(|h| !cards.contains(h)) {
        return Err(EngineError::InvalidHand(format!(
            "hole card {} is not part of the evaluated cards",
            missing
        )));
    }

    let (rank, best_five) = best_of(cards)?;
    let mut metadata = HandMetadata::default();

    if rank.category == Category::ThreeOfAKind {
        let trips_rank = rank.tiebreak[0];
        let in_hole = hole.iter().filter(|c| c.rank.value() == trips_rank).count();
        metadata.trips_type = Some(if in_hole == 2 {
            TripsType::Set
        } else {
            TripsType::Trips
        });
    }

    let board: Vec<Card> = cards.iter().filter(|c| !hole.contains(c)).copied().collect();
    if board.len() >= 5 {
        let (board_rank, _) = best_of(&board)?;
        metadata.board_chop = Some(board_rank == rank);
    }

    Ok(Evaluation {
        rank,
        best_five,
        metadata,
    })
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak.cmp(&b.tiebreak),
        ord => ord,
    }
}

fn validate_cards(cards: &[Card]) -> Result<(), EngineError> {
    if cards.is_empty() {
        return Err(EngineError::InvalidHand("no cards supplied".into()));
    }
    if cards.len() < 5 {
        return Err(EngineError::InvalidHand(format!(
            "need at least 5 cards, got {}",
            cards.len()
        )));
    }
    if cards.len() > 7 {
        return Err(EngineError::InvalidHand(format!(
            "at most 7 cards can be evaluated, got {}",
            cards.len()
        )));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for c in cards {
        if !seen.insert(*c) {
            return Err(EngineError::InvalidHand(format!("duplicate card {}", c)));
        }
    }
    Ok(())
}

fn best_of(cards: &[Card]) -> Result<(HandRank, [Card; 5]), EngineError> {
    let n = cards.len();
    let mut best: Option<(HandRank, [Card; 5])> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = rank_five(&five);
                        let better = match &best {
                            Some((current, _)) => rank > *current,
                            None => true,
                        };
                        if better {
                            best = Some((rank, five));
                        }
                    }
                }
            }
        }
    }
    best.ok_or_else(|| EngineError::InvalidHand(format!("need at least 5 cards, got {}", n)))
}

/// Classifies exactly five cards.
pub fn rank_five(cards: &[Card; 5]) -> HandRank {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&values);

    // (count, rank) groups, largest group first, then highest rank
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &v in &values {
        match groups.iter_mut().find(|(_, r)| *r == v) {
            Some(g) => g.0 += 1,
            None => groups.push((1, v)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let hand = |category, tiebreak| HandRank { category, tiebreak };

    if let (true, Some(high)) = (is_flush, straight) {
        if high == 14 {
            return hand(Category::RoyalFlush, vec![14, 13, 12, 11, 10]);
        }
        return hand(Category::StraightFlush, vec![high]);
    }
    match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => return hand(Category::FourOfAKind, vec![groups[0].1, groups[1].1]),
        (3, Some(2)) => return hand(Category::FullHouse, vec![groups[0].1, groups[1].1]),
        _ => {}
    }
    if is_flush {
        return hand(Category::Flush, values);
    }
    if let Some(high) = straight {
        return hand(Category::Straight, vec![high]);
    }
    let ranks: Vec<u8> = groups.iter().map(|g| g.1).collect();
    match (groups[0].0, groups[1].0) {
        (3, _) => hand(Category::ThreeOfAKind, ranks),
        (2, 2) => hand(Category::TwoPair, ranks),
        (2, _) => hand(Category::OnePair, ranks),
        _ => hand(Category::HighCard, values),
    }
}

// Expects values sorted high to low. The wheel plays as a five-high straight.
fn straight_high(values: &[u8]) -> Option<u8> {
    let distinct = values.windows(2).all(|w| w[0] != w[1]);
    if !distinct || values.len() != 5 {
        return None;
    }
    if values[0] - values[4] == 4 {
        return Some(values[0]);
    }
    if values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn straight_requires_five_consecutive() {
        assert_eq!(straight_high(&[14, 13, 12, 11, 9]), None);
        assert_eq!(straight_high(&[14, 5, 4, 3, 2]), Some(5));
        assert_eq!(straight_high(&[6, 5, 4, 3, 2]), Some(6));
    }

    #[test]
    fn tiebreak_schemas() {
        let quads = rank_five(&five("9s 9h 9d 9c Kd"));
        assert_eq!(quads.tiebreak, vec![9, 13]);
        let boat = rank_five(&five("3s 3h 3d Kc Kd"));
        assert_eq!(boat.category, Category::FullHouse);
        assert_eq!(boat.tiebreak, vec![3, 13]);
        let two_pair = rank_five(&five("4s 4h Qd Qc 9d"));
        assert_eq!(two_pair.tiebreak, vec![12, 4, 9]);
        let pair = rank_five(&five("7s 7h Ad 2c 9d"));
        assert_eq!(pair.tiebreak, vec![7, 14, 9, 2]);
        let trips = rank_five(&five("Js Jh Jd 2c 9d"));
        assert_eq!(trips.tiebreak, vec![11, 9, 2]);
    }

    #[test]
    fn every_category_matches_its_tiebreak_len() {
        for s in [
            "As Ks Qs Js 10s",
            "9s 8s 7s 6s 5s",
            "9s 9h 9d 9c Kd",
            "3s 3h 3d Kc Kd",
            "2h 7h 9h Jh Kh",
            "5d 6c 7h 8s 9s",
            "Js Jh Jd 2c 9d",
            "4s 4h Qd Qc 9d",
            "7s 7h Ad 2c 9d",
            "2s 4h 7d 9c Jd",
        ] {
            let r = rank_five(&five(s));
            assert_eq!(r.tiebreak.len(), r.category.tiebreak_len(), "{s}");
        }
    }

    #[test]
    fn describe_labels_set_and_trips() {
        let cards = parse_cards("As Ah Ad Ks Qs").unwrap();
        let hole = parse_cards("As Ah").unwrap();
        let eval = evaluate_with_hole(&cards, &hole).unwrap();
        assert_eq!(eval.describe(), "Trips (set)");
    }
}
