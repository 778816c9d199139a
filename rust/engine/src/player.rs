use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Chip amounts. Always non-negative.
pub type Chips = f64;

/// Represents a player's position at the table in heads-up poker.
/// Button posts the small blind, BigBlind posts the big blind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Big blind position
    BigBlind = 0,
    /// Button position (small blind in heads-up)
    Button = 1,
}

impl Position {
    pub fn opposite(self) -> Position {
        match self {
            Position::BigBlind => Position::Button,
            Position::Button => Position::BigBlind,
        }
    }
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: Chips = 1_000.0;

/// One seat at the table. Created once, reset at the start of every hand and
/// mutated only through the blind/commit/fold/win operations below.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    stack: Chips,
    position: Position,
    hole: Option<[Card; 2]>,
    /// Chips committed on the current street
    current_bet: Chips,
    /// Chips committed over the whole hand
    total_invested: Chips,
    active: bool,
    all_in: bool,
    /// Put chips in preflop by choice (call or raise, blinds excluded)
    voluntary: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: Chips, position: Position) -> Self {
        Self {
            name: name.into(),
            stack: stack.max(0.0),
            position,
            hole: None,
            current_bet: 0.0,
            total_invested: 0.0,
            active: true,
            all_in: false,
            voluntary: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn set_position(&mut self, pos: Position) {
        self.position = pos;
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn total_invested(&self) -> Chips {
        self.total_invested
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn is_voluntary(&self) -> bool {
        self.voluntary
    }

    /// Still in the hand and able to make decisions.
    pub fn can_act(&self) -> bool {
        self.active && !self.all_in
    }

    pub fn reset_for_new_hand(&mut self) {
        self.hole = None;
        self.current_bet = 0.0;
        self.total_invested = 0.0;
        self.active = true;
        self.all_in = false;
        self.voluntary = false;
    }

    pub fn deal_hole(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    /// Posts a forced blind, short stacks post what they have. Returns the posted amount.
    pub fn post_blind(&mut self, amount: Chips) -> Chips {
        self.commit(amount)
    }

    /// Moves up to `additional` chips from the stack into this street's bet.
    /// Returns the chips actually committed.
    pub fn commit(&mut self, additional: Chips) -> Chips {
        let amount = additional.max(0.0).min(self.stack);
        self.stack -= amount;
        self.current_bet += amount;
        self.total_invested += amount;
        if self.stack <= 0.0 {
            self.stack = 0.0;
            self.all_in = true;
        }
        amount
    }

    /// Brings this street's bet up to exactly `total`, clamped by the stack.
    /// Returns the chips taken from the stack.
    pub fn bet_to(&mut self, total: Chips) -> Chips {
        let added = self.commit(total - self.current_bet);
        if !self.all_in && total > self.current_bet {
            self.current_bet = total;
        }
        added
    }

    pub fn mark_voluntary(&mut self) {
        self.voluntary = true;
    }

    pub fn fold(&mut self) {
        self.active = false;
    }

    pub fn win(&mut self, amount: Chips) {
        self.stack += amount.max(0.0);
    }

    pub fn clear_street_bet(&mut self) {
        self.current_bet = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_blind_goes_all_in() {
        let mut p = Player::new("short", 4.0, Position::BigBlind);
        assert_eq!(p.post_blind(10.0), 4.0);
        assert!(p.is_all_in());
        assert_eq!(p.stack(), 0.0);
        assert!(!p.can_act());
    }

    #[test]
    fn bet_to_only_adds_the_difference() {
        let mut p = Player::new("p", 100.0, Position::Button);
        p.post_blind(5.0);
        assert_eq!(p.bet_to(30.0), 25.0);
        assert_eq!(p.current_bet(), 30.0);
        assert_eq!(p.total_invested(), 30.0);
        assert_eq!(p.stack(), 70.0);
        p.clear_street_bet();
        assert_eq!(p.current_bet(), 0.0);
        assert_eq!(p.total_invested(), 30.0);
    }

    #[test]
    fn bet_to_lands_exactly_on_the_total() {
        let mut p = Player::new("p", 1000.0, Position::BigBlind);
        p.bet_to(39.6);
        p.bet_to(113.068);
        assert_eq!(p.current_bet(), 113.068);
        assert!(!p.is_all_in());
    }

    #[test]
    fn reset_restores_flags_but_keeps_stack() {
        let mut p = Player::new("p", 50.0, Position::Button);
        p.commit(50.0);
        p.fold();
        p.mark_voluntary();
        p.win(120.0);
        p.reset_for_new_hand();
        assert!(p.is_active() && !p.is_all_in() && !p.is_voluntary());
        assert_eq!(p.stack(), 120.0);
        assert_eq!(p.total_invested(), 0.0);
    }
}
