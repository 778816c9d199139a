//! The decision boundary between the betting state machine and a strategy.
//!
//! The state machine builds a [`DecisionContext`] for the seat to act and asks
//! its [`DecisionPolicy`] for a [`Decision`]. Policies never see or mutate
//! game state beyond the context they are handed.

use serde::{Deserialize, Serialize};

use crate::betting::Street;
use crate::cards::Card;
use crate::player::{Chips, Position};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise,
}

/// A policy's answer. `amount` is the requested total bet for a raise and is
/// ignored for every other action.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub amount: Chips,
}

impl Decision {
    pub fn fold() -> Self {
        Self {
            action: Action::Fold,
            amount: 0.0,
        }
    }
    pub fn check() -> Self {
        Self {
            action: Action::Check,
            amount: 0.0,
        }
    }
    pub fn call() -> Self {
        Self {
            action: Action::Call,
            amount: 0.0,
        }
    }
    pub fn raise_to(amount: Chips) -> Self {
        Self {
            action: Action::Raise,
            amount,
        }
    }
}

/// Everything a policy may look at when deciding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionContext<'a> {
    pub hole_cards: [Card; 2],
    pub board: &'a [Card],
    pub street: Street,
    pub position: Position,
    pub pot: Chips,
    /// Chips behind, not counting this street's bet
    pub stack: Chips,
    pub big_blind: Chips,
    /// Street bet-to-match
    pub current_bet: Chips,
    /// Chips this seat already has in on this street
    pub committed: Chips,
    pub facing_bet: bool,
    /// Chips needed to match the bet-to-match
    pub to_call: Chips,
    /// Postflop only: the button acts last
    pub in_position: bool,
    /// Postflop only: this seat made the last preflop raise
    pub preflop_aggressor: bool,
    /// Preflop only
    pub facing_3bet: bool,
    /// Preflop only
    pub facing_4bet: bool,
    /// Preflop only: the button completing its small blind
    pub first_to_act: bool,
}

/// A strategy plugged into the betting state machine.
///
/// ```
/// use headsup_engine::policy::{Decision, DecisionContext, DecisionPolicy};
///
/// struct AlwaysCall;
///
/// impl DecisionPolicy for AlwaysCall {
///     fn decide(&mut self, _ctx: &DecisionContext<'_>) -> Decision {
///         Decision::call()
///     }
///
///     fn name(&self) -> &str {
///         "always-call"
///     }
/// }
/// ```
pub trait DecisionPolicy: Send {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision;

    fn name(&self) -> &str;
}
