//! Single-hand command handler: plays one hand and prints its action log.

use std::io::Write;

use crate::commands::{parse_strategies, policy_seeds, resolve_config};
use crate::error::CliError;
use crate::formatters::format_chips;
use crate::simulation::{SimulationParams, run_simulation};

/// # Errors
///
/// Unknown strategy names, invalid configuration or an engine error.
pub fn handle_hand_command(
    agent_a: &str,
    agent_b: &str,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let [strategy_a, strategy_b] = parse_strategies(agent_a, agent_b)?;
    let cfg = resolve_config(|cfg| {
        if let Some(s) = seed {
            cfg.seed = Some(s);
        }
    })?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let params = SimulationParams {
        hands: 1,
        starting_stack: cfg.starting_stack,
        table: cfg.table(),
        seed,
    };
    let [seed_a, seed_b] = policy_seeds(seed);
    let result = run_simulation(&params, strategy_a.build(seed_a), strategy_b.build(seed_b))?;
    let hand = result
        .hands
        .first()
        .ok_or_else(|| CliError::Engine("no hand was played".to_string()))?;

    writeln!(out, "Hand #1 (seed {})", seed)?;
    for line in &hand.actions {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out)?;
    if hand.board.is_empty() {
        writeln!(out, "Board: -")?;
    } else {
        writeln!(out, "Board: {}", hand.board.join(" "))?;
    }
    match hand.winners.as_slice() {
        [winner] => writeln!(
            out,
            "Result: {} wins {} ({})",
            winner,
            format_chips(hand.amount_won),
            hand.description
        )?,
        winners => writeln!(
            out,
            "Result: {} split {} ({})",
            winners.join(" and "),
            format_chips(hand.amount_won),
            hand.description
        )?,
    }
    writeln!(
        out,
        "Stacks: {} {}, {} {}",
        result.agent_a.agent_name,
        format_chips(hand.stacks_after[0]),
        result.agent_b.agent_name,
        format_chips(hand.stacks_after[1])
    )?;
    Ok(())
}
