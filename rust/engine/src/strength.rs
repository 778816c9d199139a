//! Strategic hand classification shared by every decision policy.
//!
//! Preflop hands get a percentile-style strength in `0.0..=1.0`; postflop
//! hands get a made-hand class, a pair tier relative to the board and a
//! set of independent draw flags.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;
use crate::hand::{evaluate_with_hole, Category, Evaluation};

pub const PREMIUM_THRESHOLD: f64 = 0.82;
pub const STRONG_THRESHOLD: f64 = 0.65;
pub const MEDIUM_THRESHOLD: f64 = 0.40;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreflopTier {
    Weak,
    Medium,
    Strong,
    Premium,
}

impl PreflopTier {
    pub fn from_strength(strength: f64) -> Self {
        if is_premium(strength) {
            PreflopTier::Premium
        } else if is_strong(strength) {
            PreflopTier::Strong
        } else if is_medium(strength) {
            PreflopTier::Medium
        } else {
            PreflopTier::Weak
        }
    }
}

pub fn is_premium(strength: f64) -> bool {
    strength >= PREMIUM_THRESHOLD
}

pub fn is_strong(strength: f64) -> bool {
    (STRONG_THRESHOLD..PREMIUM_THRESHOLD).contains(&strength)
}

pub fn is_medium(strength: f64) -> bool {
    (MEDIUM_THRESHOLD..STRONG_THRESHOLD).contains(&strength)
}

/// Starting-hand strength for two hole cards.
///
/// ```
/// use headsup_engine::cards::parse_cards;
/// use headsup_engine::strength::{preflop_strength, is_premium};
///
/// let aces = parse_cards("As Ah").unwrap();
/// assert_eq!(preflop_strength([aces[0], aces[1]]), 1.0);
/// let junk = parse_cards("7h 2d").unwrap();
/// assert!(!is_premium(preflop_strength([junk[0], junk[1]])));
/// ```
pub fn preflop_strength(hole: [Card; 2]) -> f64 {
    let (a, b) = (hole[0].rank.value(), hole[1].rank.value());
    let (high, low) = if a >= b { (a, b) } else { (b, a) };
    if high == low {
        return pair_strength(high);
    }
    if hole[0].suit == hole[1].suit {
        suited_strength(high, low)
    } else {
        offsuit_strength(high, low)
    }
}

fn pair_strength(rank: u8) -> f64 {
    match rank {
        14 => 1.00,
        13 => 0.94,
        12 => 0.88,
        11 => 0.82,
        10 => 0.76,
        9 => 0.70,
        8 => 0.64,
        7 => 0.58,
        6 => 0.52,
        5 => 0.46,
        4 => 0.40,
        3 => 0.35,
        _ => 0.31,
    }
}

fn suited_strength(high: u8, low: u8) -> f64 {
    match (high, low) {
        (14, 13) => 0.88,
        (14, 12) => 0.85,
        (14, 11) => 0.82,
        (14, 10) => 0.78,
        (14, 9) => 0.74,
        (14, 8) => 0.70,
        (14, 7) => 0.66,
        (14, 6) => 0.62,
        (14, 5) => 0.58,
        (14, 4) => 0.54,
        (14, 3) => 0.50,
        (14, _) => 0.46,
        (13, 12) => 0.80,
        (13, 11) => 0.76,
        (13, 10) => 0.72,
        (13, 9) => 0.68,
        (13, 8) => 0.64,
        (13, 7) => 0.60,
        (13, 6) => 0.56,
        (13, 5) => 0.52,
        (13, 4) => 0.48,
        (13, 3) => 0.44,
        (13, _) => 0.40,
        (12, 11) => 0.72,
        (12, 10) => 0.68,
        (12, 9) => 0.64,
        (12, 8) => 0.60,
        (12, 7) => 0.56,
        (12, 6) => 0.52,
        (12, 5) => 0.48,
        (12, 4) => 0.44,
        (12, 3) => 0.40,
        (12, _) => 0.36,
        (h, l) if h >= 10 => {
            let gap = f64::from(h - l - 1);
            (0.60 - f64::from(h - 10) * 0.08 - gap * 0.04).max(0.20)
        }
        (h, _) => (0.50 - f64::from(h - 2) * 0.05).max(0.15),
    }
}

fn offsuit_strength(high: u8, low: u8) -> f64 {
    match (high, low) {
        (14, 13) => 0.82,
        (14, 12) => 0.78,
        (14, 11) => 0.74,
        (14, 10) => 0.70,
        (14, 9) => 0.66,
        (14, 8) => 0.62,
        (14, 7) => 0.58,
        (14, 6) => 0.54,
        (14, 5) => 0.50,
        (14, 4) => 0.46,
        (14, 3) => 0.42,
        (14, _) => 0.38,
        (13, 12) => 0.72,
        (13, 11) => 0.68,
        (13, 10) => 0.64,
        (13, 9) => 0.60,
        (13, 8) => 0.56,
        (13, 7) => 0.52,
        (13, 6) => 0.48,
        (13, 5) => 0.44,
        (13, 4) => 0.40,
        (13, 3) => 0.36,
        (13, _) => 0.32,
        (h, l) if h >= 10 => {
            let gap = f64::from(h - l - 1);
            (0.50 - f64::from(h - 10) * 0.08 - gap * 0.05).max(0.10)
        }
        (h, _) => (0.40 - f64::from(h - 2) * 0.06).max(0.05),
    }
}

/// Tier of a one-pair hand relative to the board's distinct ranks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStrength {
    Overpair,
    TopPair,
    SecondPair,
    ThirdPair,
    Underpair,
    NoPair,
}

/// Classifies the pair made with `hole` against `board`.
///
/// A pocket pair is placed between the board's distinct ranks; unpaired
/// hole cards are tiered by the highest board rank they match.
///
/// ```
/// use headsup_engine::cards::parse_cards;
/// use headsup_engine::strength::{classify_pair_strength, PairStrength};
///
/// let hole = parse_cards("Kh Kd").unwrap();
/// let board = parse_cards("As 7c 2d").unwrap();
/// assert_eq!(
///     classify_pair_strength([hole[0], hole[1]], &board),
///     PairStrength::SecondPair
/// );
/// ```
pub fn classify_pair_strength(hole: [Card; 2], board: &[Card]) -> PairStrength {
    let ranks = distinct_ranks_desc(board);
    if ranks.is_empty() {
        return PairStrength::NoPair;
    }

    if hole[0].rank == hole[1].rank {
        let p = hole[0].rank.value();
        if p > ranks[0] {
            return PairStrength::Overpair;
        }
        if ranks.len() > 1 && ranks[0] > p && p > ranks[1] {
            return PairStrength::SecondPair;
        }
        if ranks.len() > 2 && ranks[1] > p && p > ranks[2] {
            return PairStrength::ThirdPair;
        }
        return PairStrength::Underpair;
    }

    let matched = hole
        .iter()
        .filter_map(|c| ranks.iter().position(|&r| r == c.rank.value()))
        .min();
    match matched {
        Some(0) => PairStrength::TopPair,
        Some(1) => PairStrength::SecondPair,
        Some(2) => PairStrength::ThirdPair,
        Some(_) => PairStrength::Underpair,
        None => PairStrength::NoPair,
    }
}

fn distinct_ranks_desc(cards: &[Card]) -> Vec<u8> {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks.dedup();
    ranks
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Draws {
    pub flush_draw: bool,
    pub open_ended: bool,
    pub gutshot: bool,
}

impl Draws {
    pub fn any(&self) -> bool {
        self.flush_draw || self.open_ended || self.gutshot
    }
}

/// Draw flags over hole plus board. Needs at least three board cards.
pub fn detect_draws(hole: [Card; 2], board: &[Card]) -> Draws {
    let mut draws = Draws::default();
    if board.len() < 3 {
        return draws;
    }

    let mut suit_counts = [0u8; 4];
    for c in hole.iter().chain(board) {
        suit_counts[c.suit as usize] += 1;
    }
    draws.flush_draw = suit_counts.iter().copied().max() == Some(4);

    let mut ranks: Vec<u8> = hole.iter().chain(board).map(|c| c.rank.value()).collect();
    ranks.sort_unstable();
    ranks.dedup();
    for w in ranks.windows(4) {
        match w[3] - w[0] {
            3 => draws.open_ended = true,
            4 => draws.gutshot = true,
            _ => {}
        }
    }
    draws
}

/// Coarse made-hand class consumed by the rule-based policies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandClass {
    /// Straight or better
    MadeHand,
    /// Trips or a set
    Strong,
    TwoPair,
    Overpair,
    TopPair,
    SecondPair,
    ThirdPair,
    Underpair,
    HighCard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostflopStrength {
    pub evaluation: Evaluation,
    pub class: HandClass,
    pub pair: Option<PairStrength>,
    pub draws: Draws,
}

impl PostflopStrength {
    /// Category value 1..=10.
    pub fn score(&self) -> u8 {
        self.evaluation.rank.category.value()
    }
}

/// Evaluates a postflop holding (board of 3 to 5 cards).
pub fn evaluate_postflop(hole: [Card; 2], board: &[Card]) -> Result<PostflopStrength, EngineError> {
    let mut cards = Vec::with_capacity(board.len() + 2);
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    let evaluation = evaluate_with_hole(&cards, &hole)?;
    let draws = detect_draws(hole, board);

    let mut pair = None;
    let class = match evaluation.rank.category {
        Category::ThreeOfAKind => HandClass::Strong,
        Category::TwoPair => HandClass::TwoPair,
        Category::OnePair => {
            let p = classify_pair_strength(hole, board);
            pair = Some(p);
            match p {
                PairStrength::Overpair => HandClass::Overpair,
                PairStrength::TopPair => HandClass::TopPair,
                PairStrength::SecondPair => HandClass::SecondPair,
                PairStrength::ThirdPair => HandClass::ThirdPair,
                PairStrength::Underpair | PairStrength::NoPair => HandClass::Underpair,
            }
        }
        Category::HighCard => HandClass::HighCard,
        _ => HandClass::MadeHand,
    };

    Ok(PostflopStrength {
        evaluation,
        class,
        pair,
        draws,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hole(s: &str) -> [Card; 2] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1]]
    }

    #[test]
    fn tiers_partition_the_range() {
        assert_eq!(PreflopTier::from_strength(0.82), PreflopTier::Premium);
        assert_eq!(PreflopTier::from_strength(0.81), PreflopTier::Strong);
        assert_eq!(PreflopTier::from_strength(0.65), PreflopTier::Strong);
        assert_eq!(PreflopTier::from_strength(0.40), PreflopTier::Medium);
        assert_eq!(PreflopTier::from_strength(0.39), PreflopTier::Weak);
    }

    #[test]
    fn table_values() {
        assert_eq!(preflop_strength(hole("Ah Kh")), 0.88);
        assert_eq!(preflop_strength(hole("Kd As")), 0.82);
        assert_eq!(preflop_strength(hole("2c 2d")), 0.31);
        assert_eq!(preflop_strength(hole("Qs 3s")), 0.40);
    }

    #[test]
    fn formula_values_respect_floors() {
        // J-T suited: 0.60 - 0.08
        assert!((preflop_strength(hole("Js 10s")) - 0.52).abs() < 1e-9);
        // 7-2 offsuit bottoms out at the floor
        assert!((preflop_strength(hole("7h 2d")) - 0.10).abs() < 1e-9);
        // 9-8 suited: 0.50 - 7*0.05
        assert!((preflop_strength(hole("9c 8c")) - 0.15).abs() < 1e-9);
    }

    #[test]
    fn unpaired_hole_uses_highest_match() {
        let board = parse_cards("Ks 9d 4c").unwrap();
        assert_eq!(
            classify_pair_strength(hole("4h Kd"), &board),
            PairStrength::TopPair
        );
        assert_eq!(
            classify_pair_strength(hole("9h 2d"), &board),
            PairStrength::SecondPair
        );
        assert_eq!(
            classify_pair_strength(hole("Ah Qd"), &board),
            PairStrength::NoPair
        );
    }

    #[test]
    fn pocket_pair_tiers() {
        let board = parse_cards("Qs 9d 4c").unwrap();
        assert_eq!(classify_pair_strength(hole("Ah Ad"), &board), PairStrength::Overpair);
        assert_eq!(classify_pair_strength(hole("Jh Jd"), &board), PairStrength::SecondPair);
        assert_eq!(classify_pair_strength(hole("6h 6d"), &board), PairStrength::ThirdPair);
        assert_eq!(classify_pair_strength(hole("2h 2d"), &board), PairStrength::Underpair);
    }

    #[test]
    fn draws_need_three_board_cards() {
        let board = parse_cards("8h 9h").unwrap();
        assert_eq!(detect_draws(hole("10h Jh"), &board), Draws::default());
    }

    #[test]
    fn flush_draw_is_exactly_four() {
        let board = parse_cards("2h 7h Kc").unwrap();
        assert!(detect_draws(hole("Ah 9h"), &board).flush_draw);
        let made = parse_cards("2h 7h Kh").unwrap();
        assert!(!detect_draws(hole("Ah 9h"), &made).flush_draw);
    }

    #[test]
    fn straight_draw_windows() {
        let oesd = parse_cards("7c 8d 2s").unwrap();
        let d = detect_draws(hole("9h 10s"), &oesd);
        assert!(d.open_ended);

        let gutshot = parse_cards("7c 8d 2s").unwrap();
        let d = detect_draws(hole("10h Js"), &gutshot);
        assert!(!d.open_ended);
        assert!(d.gutshot);
    }

    #[test]
    fn postflop_classes() {
        let board = parse_cards("Kd 7h 2c").unwrap();
        let s = evaluate_postflop(hole("Ah Kh"), &board).unwrap();
        assert_eq!(s.class, HandClass::TopPair);
        assert_eq!(s.score(), 2);

        let s = evaluate_postflop(hole("7s 7d"), &board).unwrap();
        assert_eq!(s.class, HandClass::Strong);
        assert_eq!(s.pair, None);

        let board = parse_cards("3d 4h 5c").unwrap();
        let s = evaluate_postflop(hole("As 2d"), &board).unwrap();
        assert_eq!(s.class, HandClass::MadeHand);
    }
}
