use crate::player::Chips;
use crate::policy::{Action, Decision};

/// The stake change a decision produces once betting rules are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedAction {
    Fold,
    /// No chips move. Also produced by a call with nothing to match.
    Check,
    /// Match the bet-to-match, or as much of it as the stack allows.
    Call { additional: Chips, all_in: bool },
    /// New street total above the bet-to-match.
    Raise {
        additional: Chips,
        total: Chips,
        all_in: bool,
    },
}

/// Minimum-raise floor: a raise always targets at least twice the bet-to-match.
///
/// ```
/// use headsup_engine::rules::raise_target;
///
/// assert_eq!(raise_target(25.0, 10.0), 25.0);
/// assert_eq!(raise_target(15.0, 10.0), 20.0);
/// assert_eq!(raise_target(0.0, 0.0), 0.0);
/// ```
pub fn raise_target(requested: Chips, bet_to_match: Chips) -> Chips {
    let requested = if requested.is_finite() {
        requested.max(0.0)
    } else {
        0.0
    };
    requested.max(bet_to_match * 2.0)
}

/// Converts a policy [`Decision`] into the chips that actually move.
///
/// Bets are clamped to the stack; a raise that cannot exceed the current
/// bet-to-match after clamping is a call.
///
/// # Arguments
///
/// * `decision` - What the policy asked for
/// * `committed` - Chips the player already has in on this street
/// * `stack` - Chips behind
/// * `bet_to_match` - The street's current bet
///
/// # Examples
///
/// ```
/// use headsup_engine::policy::Decision;
/// use headsup_engine::rules::{resolve_action, ResolvedAction};
///
/// // Facing 30 with 10 already in: a call adds 20
/// let r = resolve_action(Decision::call(), 10.0, 500.0, 30.0);
/// assert_eq!(r, ResolvedAction::Call { additional: 20.0, all_in: false });
///
/// // Short stack calls all-in
/// let r = resolve_action(Decision::call(), 0.0, 12.0, 30.0);
/// assert_eq!(r, ResolvedAction::Call { additional: 12.0, all_in: true });
///
/// // Raise below the floor is lifted to twice the bet
/// let r = resolve_action(Decision::raise_to(40.0), 0.0, 500.0, 30.0);
/// assert_eq!(r, ResolvedAction::Raise { additional: 60.0, total: 60.0, all_in: false });
/// ```
///
/// ```
/// use headsup_engine::policy::Decision;
/// use headsup_engine::rules::{resolve_action, ResolvedAction};
///
/// // All-in short of the bet-to-match only calls
/// let r = resolve_action(Decision::raise_to(100.0), 0.0, 25.0, 30.0);
/// assert_eq!(r, ResolvedAction::Call { additional: 25.0, all_in: true });
///
/// // Nothing to call is a check
/// assert_eq!(resolve_action(Decision::call(), 10.0, 90.0, 10.0), ResolvedAction::Check);
/// ```
pub fn resolve_action(
    decision: Decision,
    committed: Chips,
    stack: Chips,
    bet_to_match: Chips,
) -> ResolvedAction {
    match decision.action {
        Action::Fold => ResolvedAction::Fold,
        Action::Check => ResolvedAction::Check,
        Action::Call => {
            let owed = (bet_to_match - committed).max(0.0);
            if owed <= 0.0 {
                return ResolvedAction::Check;
            }
            let additional = owed.min(stack);
            ResolvedAction::Call {
                additional,
                all_in: additional >= stack,
            }
        }
        Action::Raise => {
            let target = raise_target(decision.amount, bet_to_match);
            let additional = (target - committed).max(0.0).min(stack);
            let total = committed + additional;
            let all_in = additional >= stack;
            if total > bet_to_match {
                ResolvedAction::Raise {
                    additional,
                    total,
                    all_in,
                }
            } else if additional > 0.0 {
                ResolvedAction::Call { additional, all_in }
            } else {
                ResolvedAction::Check
            }
        }
    }
}
