//! Simulation command handler.
//!
//! Plays a run of hands between two strategies and prints per-agent
//! statistics, either as a text report or as one JSON document.

use std::io::Write;

use chrono::SecondsFormat;
use headsup_engine::player::Chips;
use tracing::info;

use crate::commands::{parse_strategies, policy_seeds, resolve_config};
use crate::error::CliError;
use crate::formatters::{format_chips, format_percent, format_signed_chips};
use crate::simulation::{
    HandSummary, SimulationParams, SimulationResult, SimulationStats, run_simulation,
};
use crate::ui;

/// Parsed `sim` flags. `None` leaves the configured value in place.
#[derive(Debug, Clone, Default)]
pub struct SimArgs {
    pub agent_a: String,
    pub agent_b: String,
    pub hands: Option<u32>,
    pub seed: Option<u64>,
    pub stack: Option<f64>,
    pub small_blind: Option<f64>,
    pub big_blind: Option<f64>,
    pub json: bool,
    pub verbose: bool,
}

/// # Errors
///
/// Unknown strategy names, invalid configuration, or a run aborted by the
/// engine.
pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let [strategy_a, strategy_b] = parse_strategies(&args.agent_a, &args.agent_b)?;
    let cfg = resolve_config(|cfg| {
        if let Some(h) = args.hands {
            cfg.hands = h;
        }
        if let Some(s) = args.seed {
            cfg.seed = Some(s);
        }
        if let Some(s) = args.stack {
            cfg.starting_stack = s;
        }
        if let Some(sb) = args.small_blind {
            cfg.small_blind = sb;
        }
        if let Some(bb) = args.big_blind {
            cfg.big_blind = bb;
        }
    })?;

    let seed = cfg.seed.unwrap_or_else(rand::random);
    let params = SimulationParams {
        hands: cfg.hands,
        starting_stack: cfg.starting_stack,
        table: cfg.table(),
        seed,
    };
    let [seed_a, seed_b] = policy_seeds(seed);
    info!(%strategy_a, %strategy_b, hands = params.hands, seed, "starting simulation");
    let result = run_simulation(&params, strategy_a.build(seed_a), strategy_b.build(seed_b))?;

    if let Some(reason) = &result.stopped_early {
        ui::display_warning(
            err,
            &format!(
                "Simulation stopped after {} of {} hands: {}",
                result.hands_played(),
                result.hands_requested,
                reason
            ),
        )?;
    }

    if args.json {
        write_json(out, &result, &params, args.verbose)
    } else {
        if args.verbose {
            for hand in &result.hands {
                write_hand_line(out, hand, &result)?;
            }
        }
        write_report(out, &result, &params)
    }
}

fn write_hand_line(
    out: &mut dyn Write,
    hand: &HandSummary,
    result: &SimulationResult,
) -> Result<(), CliError> {
    match hand.winners.as_slice() {
        [winner] => writeln!(
            out,
            "Hand {}: {} wins {} ({})",
            hand.hand_number,
            winner,
            format_chips(hand.amount_won),
            hand.description
        )?,
        winners => writeln!(
            out,
            "Hand {}: {} split {} ({})",
            hand.hand_number,
            winners.join(" and "),
            format_chips(hand.amount_won),
            hand.description
        )?,
    }
    writeln!(
        out,
        "  {}: {}, {}: {}",
        result.agent_a.agent_name,
        format_chips(hand.stacks_after[0]),
        result.agent_b.agent_name,
        format_chips(hand.stacks_after[1])
    )?;
    Ok(())
}

fn write_report(
    out: &mut dyn Write,
    result: &SimulationResult,
    params: &SimulationParams,
) -> Result<(), CliError> {
    ui::write_header(out, "Simulation Results")?;
    writeln!(
        out,
        "Agents: {} vs {}",
        result.agent_a.agent_name, result.agent_b.agent_name
    )?;
    writeln!(
        out,
        "Hands played: {} of {}",
        result.hands_played(),
        result.hands_requested
    )?;
    writeln!(out, "Seed: {}", result.seed)?;
    writeln!(
        out,
        "Blinds: {}/{}, starting stack {}",
        format_chips(params.table.small_blind),
        format_chips(params.table.big_blind),
        format_chips(params.starting_stack)
    )?;
    let duration = result.duration_seconds();
    if duration > 0.0 {
        writeln!(
            out,
            "Duration: {:.2} seconds ({:.1} hands/sec)",
            duration,
            f64::from(result.hands_played()) / duration
        )?;
    } else {
        writeln!(out, "Duration: {:.2} seconds", duration)?;
    }
    if let Some(reason) = &result.stopped_early {
        writeln!(out, "Stopped early: {}", reason)?;
    }

    write_agent(out, &result.agent_a, result.final_stacks[0], result.big_blind)?;
    write_agent(out, &result.agent_b, result.final_stacks[1], result.big_blind)?;
    Ok(())
}

fn write_agent(
    out: &mut dyn Write,
    stats: &SimulationStats,
    final_stack: Chips,
    big_blind: Chips,
) -> Result<(), CliError> {
    writeln!(out)?;
    writeln!(out, "{}:", stats.agent_name)?;
    writeln!(
        out,
        "  Hands won: {} ({})",
        stats.hands_won,
        format_percent(stats.win_rate())
    )?;
    writeln!(out, "  Hands split: {}", stats.hands_split)?;
    writeln!(out, "  Total profit: {}", format_signed_chips(stats.total_profit))?;
    writeln!(out, "  Avg profit/hand: {}", format_signed_chips(stats.avg_profit()))?;
    writeln!(out, "  bb/100: {:.2}", stats.bb_per_100(big_blind))?;
    writeln!(out, "  VPIP: {}", format_percent(stats.vpip()))?;
    writeln!(
        out,
        "  Showdown win rate: {} ({}/{})",
        format_percent(stats.showdown_win_rate()),
        stats.showdowns_won,
        stats.showdowns_total
    )?;
    writeln!(out, "  Final stack: {}", format_chips(final_stack))?;
    Ok(())
}

fn stats_json(stats: &SimulationStats, final_stack: Chips, big_blind: Chips) -> serde_json::Value {
    serde_json::json!({
        "name": stats.agent_name,
        "hands_dealt": stats.hands_dealt,
        "hands_won": stats.hands_won,
        "hands_lost": stats.hands_lost,
        "hands_split": stats.hands_split,
        "win_rate": stats.win_rate(),
        "total_profit": stats.total_profit,
        "avg_profit": stats.avg_profit(),
        "bb_per_100": stats.bb_per_100(big_blind),
        "showdowns_total": stats.showdowns_total,
        "showdowns_won": stats.showdowns_won,
        "showdown_win_rate": stats.showdown_win_rate(),
        "vpip_hands": stats.vpip_hands,
        "vpip": stats.vpip(),
        "final_stack": final_stack,
    })
}

fn write_json(
    out: &mut dyn Write,
    result: &SimulationResult,
    params: &SimulationParams,
    include_hands: bool,
) -> Result<(), CliError> {
    let mut doc = serde_json::json!({
        "hands_requested": result.hands_requested,
        "hands_played": result.hands_played(),
        "seed": result.seed,
        "small_blind": params.table.small_blind,
        "big_blind": params.table.big_blind,
        "starting_stack": params.starting_stack,
        "stopped_early": result.stopped_early,
        "start_time": result.start_time.to_rfc3339_opts(SecondsFormat::Millis, true),
        "end_time": result.end_time.to_rfc3339_opts(SecondsFormat::Millis, true),
        "duration_seconds": result.duration_seconds(),
        "agents": [
            stats_json(&result.agent_a, result.final_stacks[0], result.big_blind),
            stats_json(&result.agent_b, result.final_stacks[1], result.big_blind),
        ],
    });
    if include_hands {
        doc["hands"] = serde_json::to_value(&result.hands).map_err(std::io::Error::other)?;
    }
    let json_str = serde_json::to_string_pretty(&doc).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
