//! Tight-aggressive (TAG) policy.
//!
//! Preflop it opens the top 60% of hands for 3 big blinds from the button,
//! 3-bets premiums, 4-bets all-in with a narrow range and treats any raise of
//! a quarter of its stack or more as shove-or-fold. Postflop play is keyed on
//! position and the made-hand class from the strength classifier.
//!
//! # Examples
//!
//! ```
//! use headsup_ai::TightAggressive;
//! use headsup_engine::betting::Street;
//! use headsup_engine::cards::parse_cards;
//! use headsup_engine::player::Position;
//! use headsup_engine::policy::{Action, DecisionContext, DecisionPolicy};
//!
//! let hole = parse_cards("As Ah").unwrap();
//! let ctx = DecisionContext {
//!     hole_cards: [hole[0], hole[1]],
//!     board: &[],
//!     street: Street::Preflop,
//!     position: Position::Button,
//!     pot: 15.0,
//!     stack: 995.0,
//!     big_blind: 10.0,
//!     current_bet: 10.0,
//!     committed: 5.0,
//!     facing_bet: false,
//!     to_call: 5.0,
//!     in_position: false,
//!     preflop_aggressor: false,
//!     facing_3bet: false,
//!     facing_4bet: false,
//!     first_to_act: true,
//! };
//! let decision = TightAggressive::new(7).decide(&ctx);
//! assert_eq!(decision.action, Action::Raise);
//! assert_eq!(decision.amount, 30.0);
//! ```

use headsup_engine::betting::Street;
use headsup_engine::cards::{Card, Rank};
use headsup_engine::player::Chips;
use headsup_engine::policy::{Decision, DecisionContext, DecisionPolicy};
use headsup_engine::strength::{
    evaluate_postflop, is_medium, is_premium, is_strong, preflop_strength, HandClass,
    MEDIUM_THRESHOLD,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Open-raise size in big blinds.
const OPEN_RAISE_BB: f64 = 3.0;
/// A raise of this share of the stack commits us: shove or fold.
const COMMIT_FRACTION: f64 = 0.25;
/// Multiplier on the faced bet for a 3-bet.
const THREE_BET_FACTOR: f64 = 3.0;
const CBET_LARGE: f64 = 0.5;
const CBET_SMALL: f64 = 0.33;
/// Value bet when checked to without the lead.
const VALUE_BET: f64 = 0.66;

const STRAIGHT_OR_BETTER: u8 = 5;
const TRIPS: u8 = 4;
const TWO_PAIR: u8 = 3;

#[derive(Debug, Clone)]
pub struct TightAggressive {
    rng: ChaCha20Rng,
}

impl TightAggressive {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn preflop(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        let strength = preflop_strength(ctx.hole_cards);
        let premium = is_premium(strength);
        let strong = is_strong(strength);
        let facing = ctx.facing_bet || ctx.facing_3bet || ctx.facing_4bet;

        if facing {
            let raise_amount = ctx.current_bet;
            if raise_amount >= ctx.stack * COMMIT_FRACTION {
                if ctx.facing_4bet || raise_amount >= ctx.stack {
                    return if premium {
                        Decision::call()
                    } else {
                        Decision::fold()
                    };
                }
                return if premium || strong {
                    shove(ctx)
                } else {
                    Decision::fold()
                };
            }
            if ctx.facing_4bet {
                return if premium {
                    Decision::call()
                } else {
                    Decision::fold()
                };
            }
            if ctx.facing_3bet {
                if is_four_bet_hand(ctx.hole_cards) {
                    return shove(ctx);
                }
                return if strong {
                    Decision::call()
                } else {
                    Decision::fold()
                };
            }
            if premium {
                return Decision::raise_to(raise_amount * THREE_BET_FACTOR);
            }
            return if strong || is_medium(strength) {
                Decision::call()
            } else {
                Decision::fold()
            };
        }

        if ctx.first_to_act {
            return if strength >= MEDIUM_THRESHOLD {
                Decision::raise_to(OPEN_RAISE_BB * ctx.big_blind)
            } else {
                Decision::fold()
            };
        }

        // Big blind option after a limp
        Decision::check()
    }

    fn postflop(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        let Ok(strength) = evaluate_postflop(ctx.hole_cards, ctx.board) else {
            return check_or_fold(ctx);
        };
        let class = strength.class;
        let score = strength.score();
        let has_draw = strength.draws.any();

        match ctx.street {
            Street::Flop => self.flop(ctx, class, score, has_draw),
            Street::Turn => turn(ctx, class, score),
            Street::River => river(ctx, class, score),
            Street::Preflop => check_or_fold(ctx),
        }
    }

    fn flop(
        &mut self,
        ctx: &DecisionContext<'_>,
        class: HandClass,
        score: u8,
        has_draw: bool,
    ) -> Decision {
        if ctx.in_position {
            if ctx.facing_bet {
                return if top_pair_or_better(class) {
                    Decision::call()
                } else {
                    Decision::fold()
                };
            }
            if ctx.preflop_aggressor {
                let fraction = if self.rng.random::<f64>() < 0.5 {
                    CBET_LARGE
                } else {
                    CBET_SMALL
                };
                return Decision::raise_to(ctx.pot * fraction);
            }
            return if top_pair_or_better(class) {
                Decision::raise_to(ctx.pot * VALUE_BET)
            } else {
                Decision::check()
            };
        }

        // Out of position: check-raise all-in, check-call or check-fold
        if score >= TWO_PAIR {
            if ctx.facing_bet {
                shove(ctx)
            } else {
                Decision::check()
            }
        } else if matches!(class, HandClass::Overpair | HandClass::TopPair) || has_draw {
            check_or_call(ctx)
        } else {
            check_or_fold(ctx)
        }
    }
}

fn turn(ctx: &DecisionContext<'_>, class: HandClass, score: u8) -> Decision {
    let pair_plus =
        matches!(class, HandClass::Overpair | HandClass::TopPair) || score >= TWO_PAIR;
    if ctx.in_position {
        if !pair_plus {
            return check_or_fold(ctx);
        }
        return if ctx.facing_bet {
            Decision::call()
        } else {
            Decision::raise_to(ctx.pot)
        };
    }

    if score >= STRAIGHT_OR_BETTER {
        if ctx.facing_bet {
            shove(ctx)
        } else {
            Decision::check()
        }
    } else if pair_plus {
        check_or_call(ctx)
    } else {
        check_or_fold(ctx)
    }
}

fn river(ctx: &DecisionContext<'_>, class: HandClass, score: u8) -> Decision {
    let showdown_value = matches!(
        class,
        HandClass::Overpair | HandClass::TopPair | HandClass::TwoPair | HandClass::Strong
    );
    if score >= STRAIGHT_OR_BETTER {
        // In position we jam; out of position we check and jam over a bet
        return if ctx.in_position || ctx.facing_bet {
            shove(ctx)
        } else {
            Decision::check()
        };
    }
    if ctx.in_position {
        if !ctx.facing_bet {
            return Decision::check();
        }
        return if showdown_value || score == TRIPS {
            Decision::call()
        } else {
            Decision::fold()
        };
    }
    if showdown_value || score == TWO_PAIR || score == TRIPS {
        check_or_call(ctx)
    } else {
        check_or_fold(ctx)
    }
}

impl DecisionPolicy for TightAggressive {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        match ctx.street {
            Street::Preflop => self.preflop(ctx),
            _ => self.postflop(ctx),
        }
    }

    fn name(&self) -> &str {
        "tag"
    }
}

/// AA, KK, QQ, JJ, AK and A5s.
fn is_four_bet_hand(hole: [Card; 2]) -> bool {
    let (a, b) = (hole[0].rank, hole[1].rank);
    let suited = hole[0].suit == hole[1].suit;
    match (a.max(b), a.min(b)) {
        (hi, lo) if hi == lo => matches!(hi, Rank::Ace | Rank::King | Rank::Queen | Rank::Jack),
        (Rank::Ace, Rank::King) => true,
        (Rank::Ace, Rank::Five) => suited,
        _ => false,
    }
}

fn top_pair_or_better(class: HandClass) -> bool {
    matches!(
        class,
        HandClass::MadeHand
            | HandClass::Strong
            | HandClass::TwoPair
            | HandClass::Overpair
            | HandClass::TopPair
    )
}

/// Whole stack in, as a street total.
fn shove(ctx: &DecisionContext<'_>) -> Decision {
    let total: Chips = ctx.stack + ctx.committed;
    Decision::raise_to(total)
}

fn check_or_call(ctx: &DecisionContext<'_>) -> Decision {
    if ctx.facing_bet {
        Decision::call()
    } else {
        Decision::check()
    }
}

fn check_or_fold(ctx: &DecisionContext<'_>) -> Decision {
    if ctx.facing_bet {
        Decision::fold()
    } else {
        Decision::check()
    }
}
