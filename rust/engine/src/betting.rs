//! One street of heads-up betting.
//!
//! A round is settled when every seat that can still act has acted since the
//! last raise and has matched the street's bet. Folding ends the round (and
//! the hand) immediately; all-in seats drop out of the rotation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::EngineError;
use crate::game::GameState;
use crate::player::{Chips, Position};
use crate::policy::{DecisionContext, DecisionPolicy};
use crate::rules::{resolve_action, ResolvedAction};

/// Safety stop for a policy that never lets the round settle.
pub const MAX_ROUND_ACTIONS: usize = 100;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs one betting round on `street`.
///
/// `policies` is indexed by seat. Returns `Ok(false)` when a fold ended the
/// hand and `Ok(true)` when the round settled (or nobody needed to act).
///
/// # Errors
///
/// [`EngineError::BettingRoundOverrun`] after [`MAX_ROUND_ACTIONS`] decisions
/// without the round settling.
pub fn run_round(
    street: Street,
    state: &mut GameState,
    policies: &mut [Box<dyn DecisionPolicy>; 2],
) -> Result<bool, EngineError> {
    if street != Street::Preflop {
        state.current_bet = 0.0;
        for p in &mut state.players {
            p.clear_street_bet();
        }
    }

    let order = state.action_order(street);
    if order.len() <= 1 {
        return Ok(true);
    }

    let mut acted = [false; 2];
    // Raises made this street, blinds excluded
    let mut raises = 0usize;
    let mut decisions = 0usize;
    let mut turn = 0usize;

    loop {
        if is_settled(state, &order, &acted) {
            return Ok(true);
        }

        let seat = order[turn % order.len()];
        turn += 1;
        if !state.players[seat].can_act() {
            continue;
        }

        if decisions >= MAX_ROUND_ACTIONS {
            return Err(EngineError::BettingRoundOverrun {
                street: street.to_string(),
                limit: MAX_ROUND_ACTIONS,
            });
        }
        decisions += 1;

        let decision = {
            let ctx = build_context(state, seat, street, raises, acted[seat])?;
            policies[seat].decide(&ctx)
        };

        let player = &state.players[seat];
        let resolved = resolve_action(
            decision,
            player.current_bet(),
            player.stack(),
            state.current_bet,
        );
        debug!(
            street = %street,
            seat,
            action = ?decision.action,
            requested = decision.amount,
            resolved = ?resolved,
            "betting action"
        );

        let name = state.players[seat].name().to_string();
        match resolved {
            ResolvedAction::Fold => {
                state.players[seat].fold();
                state.log(format!("{} folds", name));
                return Ok(false);
            }
            ResolvedAction::Check => {
                state.log(format!("{} checks", name));
            }
            ResolvedAction::Call { all_in, .. } => {
                let target = state.current_bet;
                let added = commit_to(state, seat, street, target);
                state.log(format!("{} calls ${:.2}{}", name, added, all_in_suffix(all_in)));
            }
            ResolvedAction::Raise { total, all_in, .. } => {
                commit_to(state, seat, street, total);
                state.current_bet = total;
                raises += 1;
                if street == Street::Preflop {
                    state.preflop_aggressor = Some(seat);
                }
                acted = [false; 2];
                state.log(format!("{} raises to ${:.2}{}", name, total, all_in_suffix(all_in)));
            }
        }
        acted[seat] = true;
    }
}

/// Moves the seat's street bet up to `total`; a short stack goes all-in.
fn commit_to(state: &mut GameState, seat: usize, street: Street, total: Chips) -> Chips {
    let added = state.players[seat].bet_to(total);
    state.pot += added;
    if street == Street::Preflop && added > 0.0 {
        state.players[seat].mark_voluntary();
    }
    added
}

fn all_in_suffix(all_in: bool) -> &'static str {
    if all_in {
        " (all-in)"
    } else {
        ""
    }
}

fn is_settled(state: &GameState, order: &[usize], acted: &[bool; 2]) -> bool {
    order.iter().all(|&seat| {
        let p = &state.players[seat];
        !p.can_act() || (acted[seat] && p.current_bet() >= state.current_bet)
    })
}

fn build_context(
    state: &GameState,
    seat: usize,
    street: Street,
    raises: usize,
    has_acted: bool,
) -> Result<DecisionContext<'_>, EngineError> {
    let player = &state.players[seat];
    let hole_cards = player.hole_cards().ok_or_else(|| {
        EngineError::InvalidHand(format!("{} has no hole cards", player.name()))
    })?;
    let to_call = (state.current_bet - player.current_bet()).max(0.0);
    let preflop = street == Street::Preflop;

    // The button's first decision, facing only the big blind, is an open
    let first_to_act =
        preflop && raises == 0 && !has_acted && player.position() == Position::Button;
    let facing_bet = to_call > 0.0 && !first_to_act;

    Ok(DecisionContext {
        hole_cards,
        board: &state.board,
        street,
        position: player.position(),
        pot: state.pot,
        stack: player.stack(),
        big_blind: state.config.big_blind,
        current_bet: state.current_bet,
        committed: player.current_bet(),
        facing_bet,
        to_call,
        in_position: !preflop && player.position() == Position::Button,
        preflop_aggressor: !preflop && state.preflop_aggressor == Some(seat),
        facing_3bet: preflop && facing_bet && raises == 2,
        facing_4bet: preflop && facing_bet && raises >= 3,
        first_to_act,
    })
}
