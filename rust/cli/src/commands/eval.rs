//! Hand evaluation command.
//!
//! Evaluates 5 to 7 cards and prints the category, tiebreak ranks and best
//! five. With `--hole` the two hole cards also get the set/trips and
//! board-chop metadata, preflop strength and the postflop class the
//! policies act on.

use std::io::Write;

use headsup_engine::cards::{Card, parse_cards};
use headsup_engine::hand::{TripsType, evaluate, evaluate_with_hole};
use headsup_engine::strength::{
    Draws, HandClass, PairStrength, PreflopTier, evaluate_postflop, preflop_strength,
};

use crate::error::CliError;
use crate::formatters::format_board;

/// # Errors
///
/// `CliError::InvalidInput` for unparseable or duplicate cards, a card
/// count outside 5..=7, or a `--hole` that is not two cards.
pub fn handle_eval_command(
    cards: &[String],
    hole: Option<&[String]>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut all = parse_cards(&cards.join(" "))?;
    let hole = match hole {
        Some(tokens) => {
            let parsed = parse_cards(&tokens.join(" "))?;
            let pair: [Card; 2] = parsed.as_slice().try_into().map_err(|_| {
                CliError::InvalidInput(format!("--hole takes 2 cards, got {}", parsed.len()))
            })?;
            for c in pair {
                if !all.contains(&c) {
                    all.push(c);
                }
            }
            Some(pair)
        }
        None => None,
    };
    if !(5..=7).contains(&all.len()) {
        return Err(CliError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            all.len()
        )));
    }

    let eval = match hole {
        Some(pair) => evaluate_with_hole(&all, &pair)?,
        None => evaluate(&all)?,
    };
    let category = eval.category();
    let tiebreak: Vec<String> = eval.rank.tiebreak.iter().map(u8::to_string).collect();

    writeln!(out, "Cards: {}", format_board(&all))?;
    writeln!(out, "Hand: {}", eval.describe())?;
    writeln!(out, "Category: {} ({})", category.name(), category.value())?;
    writeln!(out, "Tiebreak: {}", tiebreak.join(", "))?;
    writeln!(out, "Best five: {}", format_board(&eval.best_five))?;
    if let Some(tt) = eval.metadata.trips_type {
        let label = match tt {
            TripsType::Set => "set",
            TripsType::Trips => "trips",
        };
        writeln!(out, "Three of a kind: {}", label)?;
    }
    if let Some(chop) = eval.metadata.board_chop {
        writeln!(out, "Board chop: {}", if chop { "yes" } else { "no" })?;
    }

    if let Some(pair) = hole {
        let board: Vec<Card> = all.iter().copied().filter(|c| !pair.contains(c)).collect();
        let strength = preflop_strength(pair);
        writeln!(
            out,
            "Preflop strength: {:.2} ({})",
            strength,
            tier_label(PreflopTier::from_strength(strength))
        )?;
        let post = evaluate_postflop(pair, &board)?;
        writeln!(out, "Class: {}", class_label(post.class))?;
        if let Some(p) = post.pair {
            writeln!(out, "Pair: {}", pair_label(p))?;
        }
        writeln!(out, "Draws: {}", draws_label(&post.draws))?;
    }
    Ok(())
}

fn tier_label(tier: PreflopTier) -> &'static str {
    match tier {
        PreflopTier::Premium => "premium",
        PreflopTier::Strong => "strong",
        PreflopTier::Medium => "medium",
        PreflopTier::Weak => "weak",
    }
}

fn class_label(class: HandClass) -> &'static str {
    match class {
        HandClass::MadeHand => "made hand",
        HandClass::Strong => "strong",
        HandClass::TwoPair => "two pair",
        HandClass::Overpair => "overpair",
        HandClass::TopPair => "top pair",
        HandClass::SecondPair => "second pair",
        HandClass::ThirdPair => "third pair",
        HandClass::Underpair => "underpair",
        HandClass::HighCard => "high card",
    }
}

fn pair_label(pair: PairStrength) -> &'static str {
    match pair {
        PairStrength::Overpair => "overpair",
        PairStrength::TopPair => "top pair",
        PairStrength::SecondPair => "second pair",
        PairStrength::ThirdPair => "third pair",
        PairStrength::Underpair => "underpair",
        PairStrength::NoPair => "no pair",
    }
}

fn draws_label(draws: &Draws) -> String {
    let mut names = Vec::new();
    if draws.flush_draw {
        names.push("flush draw");
    }
    if draws.open_ended {
        names.push("open-ended");
    }
    if draws.gutshot {
        names.push("gutshot");
    }
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(cards: &[&str], hole: Option<&[&str]>) -> Result<String, CliError> {
        let cards: Vec<String> = cards.iter().map(|s| s.to_string()).collect();
        let hole: Option<Vec<String>> = hole.map(|h| h.iter().map(|s| s.to_string()).collect());
        let mut out = Vec::new();
        handle_eval_command(&cards, hole.as_deref(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn labels_cover_draws() {
        assert_eq!(draws_label(&Draws::default()), "none");
        let d = Draws {
            flush_draw: true,
            open_ended: false,
            gutshot: true,
        };
        assert_eq!(draws_label(&d), "flush draw, gutshot");
    }

    #[test]
    fn hole_cards_are_added_when_missing() {
        let text = run(&["Kh", "7c", "2d"], Some(&["Ah", "Kd"])).unwrap();
        assert!(text.contains("Category: One Pair (2)"));
        assert!(text.contains("Class: top pair"));
        assert!(text.contains("Pair: top pair"));
    }

    #[test]
    fn rejects_wrong_counts() {
        assert!(matches!(
            run(&["As", "Ks", "Qs", "Js"], None),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            run(&["As", "Ks", "Qs", "Js", "10s", "9s", "8s", "7s"], None),
            Err(CliError::InvalidInput(_))
        ));
    }
}
